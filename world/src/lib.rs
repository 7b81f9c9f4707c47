#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative tile storage for Landfall terrain.
//!
//! The grid is a flat, row-major array of value-type [`Tile`]s. Every read
//! and write goes through a [`CellCoord`], so generation stages never hold a
//! handle to a tile across a mutation.

mod geometry;

pub use geometry::{RadialLayout, Zone};

use landfall_core::{CellCoord, GenerationConfig, Tile};

/// Square grid of tiles laid over the radial map layout.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    layout: RadialLayout,
    landing_pad_height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Allocates a grid sized for the configuration with every tile empty.
    ///
    /// Callers populate it with the heightfield initializer before any other
    /// stage reads from it.
    #[must_use]
    pub fn new(config: &GenerationConfig) -> Self {
        let layout = RadialLayout::from_config(config);
        let side = usize::try_from(layout.side()).unwrap_or(0);
        Self {
            layout,
            landing_pad_height: config.landing_pad_height(),
            tiles: vec![Tile::EMPTY; side.saturating_mul(side)],
        }
    }

    /// Radial layout the grid was sized for.
    #[must_use]
    pub const fn layout(&self) -> &RadialLayout {
        &self.layout
    }

    /// Number of columns, equal to the number of rows.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.layout.side()
    }

    /// Number of rows, equal to the number of columns.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.layout.side()
    }

    /// Height the landing pad is held at.
    #[must_use]
    pub const fn landing_pad_height(&self) -> i32 {
        self.landing_pad_height
    }

    /// Tile stored at the cell, or `None` outside the grid.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<Tile> {
        self.index(cell).map(|index| self.tiles[index])
    }

    /// Overwrites the tile at the cell. Returns `false` outside the grid.
    pub fn set(&mut self, cell: CellCoord, tile: Tile) -> bool {
        match self.index(cell) {
            Some(index) => {
                self.tiles[index] = tile;
                true
            }
            None => false,
        }
    }

    /// Row-major iterator over every cell coordinate.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let width = self.width();
        let height = self.height();
        (0..height).flat_map(move |y| (0..width).map(move |x| CellCoord::new(x, y)))
    }

    /// Row-major iterator over every cell and its tile.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Tile)> + '_ {
        self.cells().zip(self.tiles.iter().copied())
    }

    /// Tiles in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[Tile] {
        &self.tiles
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.x() < self.width() && cell.y() < self.height() {
            let x = usize::try_from(cell.x()).ok()?;
            let y = usize::try_from(cell.y()).ok()?;
            let width = usize::try_from(self.width()).ok()?;
            Some(y * width + x)
        } else {
            None
        }
    }
}

/// Query functions that provide read-only summaries of a grid.
pub mod query {
    use landfall_core::{CellCoord, Tile, TileKind};

    use super::TileGrid;

    /// Tally of tiles per kind.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KindCounts {
        /// Number of ground tiles.
        pub ground: u32,
        /// Number of stair tiles.
        pub stair: u32,
        /// Number of empty tiles.
        pub empty: u32,
    }

    /// Counts tiles of every kind.
    #[must_use]
    pub fn kind_counts(grid: &TileGrid) -> KindCounts {
        let mut counts = KindCounts::default();
        for tile in grid.as_slice() {
            match tile.kind() {
                TileKind::Ground => counts.ground += 1,
                TileKind::Stair => counts.stair += 1,
                TileKind::Empty => counts.empty += 1,
            }
        }
        counts
    }

    /// Lowest and highest surface among non-empty tiles.
    #[must_use]
    pub fn height_bounds(grid: &TileGrid) -> Option<(i32, i32)> {
        grid.as_slice()
            .iter()
            .filter(|tile| !tile.is_empty())
            .map(Tile::height)
            .fold(None, |bounds, height| match bounds {
                None => Some((height, height)),
                Some((low, high)) => Some((low.min(height), high.max(height))),
            })
    }

    /// Stair tiles with their coordinates in row-major order.
    #[must_use]
    pub fn stairs(grid: &TileGrid) -> Vec<(CellCoord, Tile)> {
        grid.iter()
            .filter(|(_, tile)| tile.kind() == TileKind::Stair)
            .collect()
    }

    /// Landing pad cells in row-major order.
    #[must_use]
    pub fn pad_cells(grid: &TileGrid) -> Vec<CellCoord> {
        grid.cells()
            .filter(|cell| grid.layout().in_pad(*cell))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landfall_core::{Direction, GenerationSettings, TileKind};

    fn grid(radius: i32) -> TileGrid {
        TileGrid::new(&GenerationConfig::new(&GenerationSettings {
            overall_map_radius: radius,
            center_flat_radius: 1.0,
            ..GenerationSettings::default()
        }))
    }

    #[test]
    fn new_grid_is_square_and_empty() {
        let grid = grid(3);
        assert_eq!(grid.width(), 6);
        assert_eq!(grid.height(), 6);
        assert_eq!(grid.as_slice().len(), 36);
        assert!(grid.as_slice().iter().all(Tile::is_empty));
    }

    #[test]
    fn writes_are_addressed_by_coordinate() {
        let mut grid = grid(2);
        assert!(grid.set(CellCoord::new(3, 1), Tile::ground(4)));
        assert!(!grid.set(CellCoord::new(4, 1), Tile::ground(4)));
        assert_eq!(grid.tile(CellCoord::new(3, 1)), Some(Tile::ground(4)));
        assert_eq!(grid.as_slice()[7], Tile::ground(4));
        assert_eq!(grid.tile(CellCoord::new(0, 4)), None);
    }

    #[test]
    fn iteration_is_row_major() {
        let grid = grid(1);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 1),
            ]
        );
    }

    #[test]
    fn queries_summarise_tiles() {
        let mut grid = grid(2);
        assert!(grid.set(CellCoord::new(0, 1), Tile::ground(-2)));
        assert!(grid.set(CellCoord::new(1, 1), Tile::stair(3, Direction::East)));
        let counts = query::kind_counts(&grid);
        assert_eq!(counts.ground, 1);
        assert_eq!(counts.stair, 1);
        assert_eq!(counts.empty, 14);
        assert_eq!(query::height_bounds(&grid), Some((-2, 3)));

        let stairs = query::stairs(&grid);
        assert_eq!(stairs.len(), 1);
        assert_eq!(stairs[0].1.kind(), TileKind::Stair);
        assert_eq!(query::pad_cells(&grid).len(), 4);
    }
}
