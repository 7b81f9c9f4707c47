//! Radial layout shared by every generation stage.

use landfall_core::{CellCoord, GenerationConfig};

/// Region a cell falls into based on its distance to the grid center.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Within the flat landing pad radius.
    Pad,
    /// Between the pad and the map boundary.
    Band,
    /// Beyond the map boundary.
    Outside,
}

/// Circular boundary and landing pad placed on a square grid.
///
/// The center sits between cells for even sides, so distances are measured
/// from the continuous midpoint rather than from any single cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialLayout {
    side: u32,
    center: f64,
    pad_radius: f64,
    map_radius: f64,
}

impl RadialLayout {
    /// Derives the layout from a sanitized configuration.
    #[must_use]
    pub fn from_config(config: &GenerationConfig) -> Self {
        let side = config.grid_side();
        Self {
            side,
            center: (f64::from(side) - 1.0) / 2.0,
            pad_radius: config.center_flat_radius(),
            map_radius: f64::from(config.overall_map_radius()),
        }
    }

    /// Side length of the square grid.
    #[must_use]
    pub const fn side(&self) -> u32 {
        self.side
    }

    /// Continuous center coordinate shared by both axes.
    #[must_use]
    pub const fn center(&self) -> f64 {
        self.center
    }

    /// Euclidean distance from the cell's integer coordinates to the center.
    #[must_use]
    pub fn distance_to_center(&self, cell: CellCoord) -> f64 {
        let dx = f64::from(cell.x()) - self.center;
        let dy = f64::from(cell.y()) - self.center;
        dx.hypot(dy)
    }

    /// Classifies the cell by its distance to the center.
    #[must_use]
    pub fn zone(&self, cell: CellCoord) -> Zone {
        let distance = self.distance_to_center(cell);
        if distance <= self.pad_radius {
            Zone::Pad
        } else if distance <= self.map_radius {
            Zone::Band
        } else {
            Zone::Outside
        }
    }

    /// Reports whether the cell belongs to the landing pad.
    #[must_use]
    pub fn in_pad(&self, cell: CellCoord) -> bool {
        self.distance_to_center(cell) <= self.pad_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landfall_core::GenerationSettings;

    fn layout(radius: i32, flat: f64) -> RadialLayout {
        RadialLayout::from_config(&GenerationConfig::new(&GenerationSettings {
            overall_map_radius: radius,
            center_flat_radius: flat,
            ..GenerationSettings::default()
        }))
    }

    #[test]
    fn center_sits_between_cells_for_even_sides() {
        let layout = layout(2, 1.0);
        assert_eq!(layout.side(), 4);
        assert!((layout.center() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn zones_follow_distance_thresholds() {
        let layout = layout(2, 1.0);
        assert_eq!(layout.zone(CellCoord::new(1, 1)), Zone::Pad);
        assert_eq!(layout.zone(CellCoord::new(0, 1)), Zone::Band);
        assert_eq!(layout.zone(CellCoord::new(0, 0)), Zone::Outside);
        assert!(layout.in_pad(CellCoord::new(2, 2)));
        assert!(!layout.in_pad(CellCoord::new(3, 2)));
    }

    #[test]
    fn corners_fall_outside_large_maps() {
        let layout = layout(8, 2.0);
        assert_eq!(layout.zone(CellCoord::new(0, 0)), Zone::Outside);
        assert_eq!(layout.zone(CellCoord::new(15, 15)), Zone::Outside);
        assert_eq!(layout.zone(CellCoord::new(0, 8)), Zone::Band);
    }
}
