#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Landfall terrain generator.
//!
//! This crate defines the vocabulary every stage agrees on. The world crate
//! owns the tile storage, the generation systems mutate it strictly in
//! sequence, and each system reports what it did through [`Event`] values so
//! adapters and tests can observe a run without reaching into the grid.

mod config;

pub use config::{
    DrawRange, GenerationConfig, GenerationSettings, NoiseConfig, NoiseSettings, PlatformConfig,
    PlatformSettings, StairFloor, NOISE_SCALE_EPSILON,
};

use serde::{Deserialize, Serialize};

/// Surface classification of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Walkable flat ground.
    Ground,
    /// Walkable single step ascending toward the tile's direction.
    Stair,
    /// Absent terrain outside the playable circle.
    Empty,
}

/// Compass directions on the tile grid.
///
/// `North` points toward increasing `y`, `East` toward increasing `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Toward increasing `y`.
    North,
    /// Toward increasing `x`.
    East,
    /// Toward decreasing `y`.
    South,
    /// Toward decreasing `x`.
    West,
}

impl Direction {
    /// Canonical ordering of the four directions before any shuffle is applied.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit step along the grid axes as `(dx, dy)`.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// Terrain state of one grid cell.
///
/// A stair always carries a direction; the constructors make any other
/// combination unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    height: i32,
    kind: TileKind,
    direction: Option<Direction>,
}

impl Tile {
    /// Tile describing absent terrain.
    pub const EMPTY: Tile = Tile {
        height: 0,
        kind: TileKind::Empty,
        direction: None,
    };

    /// Creates a flat ground tile at the provided height.
    #[must_use]
    pub const fn ground(height: i32) -> Self {
        Self {
            height,
            kind: TileKind::Ground,
            direction: None,
        }
    }

    /// Creates a stair tile at the provided height ascending toward `direction`.
    #[must_use]
    pub const fn stair(height: i32, direction: Direction) -> Self {
        Self {
            height,
            kind: TileKind::Stair,
            direction: Some(direction),
        }
    }

    /// Surface height of the tile. Meaningless for empty tiles.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Surface classification of the tile.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Direction a stair ascends toward, `None` for every other kind.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Reports whether the tile is absent terrain.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.kind, TileKind::Empty)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Location of a single grid cell expressed as `x` and `y` indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Neighbouring cell one step toward `direction`, if it stays inside a
    /// `width` by `height` grid.
    #[must_use]
    pub fn step(self, direction: Direction, width: u32, height: u32) -> Option<CellCoord> {
        let (dx, dy) = direction.offset();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        if x < width && y < height {
            Some(CellCoord::new(x, y))
        } else {
            None
        }
    }
}

/// Axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: CellCoord,
    width: u32,
    length: u32,
}

impl CellRect {
    /// Constructs a rectangle from its lowest corner and extent.
    #[must_use]
    pub const fn new(origin: CellCoord, width: u32, length: u32) -> Self {
        Self {
            origin,
            width,
            length,
        }
    }

    /// Corner with the smallest `x` and `y`.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Extent along `x`.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Extent along `y`.
    #[must_use]
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// Iterates the covered cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let origin = self.origin;
        let width = self.width;
        (0..self.length).flat_map(move |dy| {
            (0..width).map(move |dx| CellCoord::new(origin.x() + dx, origin.y() + dy))
        })
    }
}

/// Reasons the platform stamper discards a drawn platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformSkip {
    /// The drawn width or length was zero or negative.
    DegenerateSize,
    /// The footprint is larger than the grid along at least one axis.
    DoesNotFit,
}

/// Observations emitted by the generation stages as they mutate the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The heightfield initializer repopulated every cell.
    HeightfieldInitialized {
        /// Grid side length in cells.
        side: u32,
        /// Cells assigned to the landing pad.
        pad_cells: u32,
        /// Cells assigned a noise-derived height.
        band_cells: u32,
        /// Cells outside the playable circle.
        empty_cells: u32,
    },
    /// A platform was stamped onto the grid.
    PlatformStamped {
        /// Zero-based index of the platform within the run.
        index: u32,
        /// Footprint drawn for the platform.
        region: CellRect,
        /// Surface height written to the footprint.
        height: i32,
        /// Cells that were actually overwritten.
        cells: u32,
    },
    /// A platform draw was discarded without touching the grid.
    PlatformSkipped {
        /// Zero-based index of the platform within the run.
        index: u32,
        /// Reason the platform was discarded.
        reason: PlatformSkip,
    },
    /// A ground tile was converted into a stair.
    StairPlaced {
        /// One-based relaxation pass that placed the stair.
        pass: u32,
        /// Cell that became the stair.
        cell: CellCoord,
        /// Direction the stair ascends toward.
        direction: Direction,
        /// Height of the tile before it was converted.
        from_height: i32,
        /// Height of the stair after conversion.
        height: i32,
    },
    /// A relaxation pass finished scanning the grid.
    RelaxationPassCompleted {
        /// One-based index of the pass.
        pass: u32,
        /// Stairs placed during the pass.
        mutations: u32,
    },
}
