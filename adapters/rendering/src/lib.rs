#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Landfall adapters.
//!
//! A column `(x, y)` is solid at level `h` when its tile is not empty and
//! `h` does not exceed the tile height. Only solid cells with at least one
//! non-solid axis neighbour are exposed, and only exposed cells are worth
//! materializing. Stair surfaces are oriented with a fixed quarter-turn
//! table keyed by the stair direction.

use anyhow::Result as AnyResult;
use glam::{Quat, Vec3};
use landfall_core::{CellCoord, Direction, Tile, TileKind};
use landfall_world::{query, TileGrid};

/// RGBA color used when presenting blocks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

const GROUND_COLOR: Color = Color::from_rgb_u8(0x5b, 0x6e, 0x3a);
const STAIR_COLOR: Color = Color::from_rgb_u8(0x8a, 0x7b, 0x63);

/// Kind of block materialized for an exposed cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Plain terrain block.
    Ground,
    /// Stair block sitting on top of a stair column.
    Stair {
        /// Direction the stair ascends toward.
        direction: Direction,
    },
}

/// One exposed cell that should be instantiated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneBlock {
    /// Column the block belongs to.
    pub cell: CellCoord,
    /// Vertical level of the block.
    pub level: i32,
    /// Block kind.
    pub kind: BlockKind,
    /// Orientation about the vertical axis.
    pub rotation: Quat,
    /// Tint suggested for the block.
    pub color: Color,
}

impl SceneBlock {
    /// World-space center of the block for the provided edge length, with
    /// grid `y` mapped onto world `z` and levels onto world `y`.
    #[must_use]
    pub fn translation(&self, block_size: f32) -> Vec3 {
        Vec3::new(
            self.cell.x() as f32 * block_size,
            self.level as f32 * block_size,
            self.cell.y() as f32 * block_size,
        )
    }
}

/// Exposed blocks of a grid together with its vertical extent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Blocks grouped by column in row-major order, bottom to top within each
    /// column.
    pub blocks: Vec<SceneBlock>,
    /// Lowest materialized level, `None` when the grid has no terrain.
    pub floor: Option<i32>,
    /// Highest surface level, `None` when the grid has no terrain.
    pub ceiling: Option<i32>,
}

impl Scene {
    /// Collects every exposed solid cell between the lowest terrain level and
    /// each column's surface.
    #[must_use]
    pub fn from_grid(grid: &TileGrid) -> Self {
        let Some((floor, ceiling)) = query::height_bounds(grid) else {
            return Self::default();
        };

        let mut blocks = Vec::new();
        for (cell, tile) in grid.iter() {
            if tile.is_empty() {
                continue;
            }
            for level in exposure_base(grid, cell, tile, floor)..=tile.height() {
                if !is_exposed(grid, cell, level) {
                    continue;
                }
                blocks.push(block_for(cell, tile, level, floor, ceiling));
            }
        }

        Self {
            blocks,
            floor: Some(floor),
            ceiling: Some(ceiling),
        }
    }

    /// Number of stair blocks in the scene.
    #[must_use]
    pub fn stair_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|block| matches!(block.kind, BlockKind::Stair { .. }))
            .count()
    }
}

/// Lowest level of a column that can be exposed.
///
/// Solid columns extend downward without end, so a level below every side
/// neighbour's surface and below the column's own surface is enclosed on all
/// six sides. Empty or off-grid neighbours count as the grid floor.
fn exposure_base(grid: &TileGrid, cell: CellCoord, tile: Tile, floor: i32) -> i32 {
    Direction::ALL
        .iter()
        .map(|&direction| {
            cell.step(direction, grid.width(), grid.height())
                .and_then(|neighbor| grid.tile(neighbor))
                .filter(|neighbor| !neighbor.is_empty())
                .map_or(floor, |neighbor| neighbor.height())
        })
        .fold(tile.height(), i32::min)
        .max(floor)
}

fn block_for(cell: CellCoord, tile: Tile, level: i32, floor: i32, ceiling: i32) -> SceneBlock {
    let surface = level == tile.height();
    let (kind, rotation, base) = match (tile.kind(), tile.direction()) {
        (TileKind::Stair, Some(direction)) if surface => (
            BlockKind::Stair { direction },
            stair_rotation(direction),
            STAIR_COLOR,
        ),
        _ => (BlockKind::Ground, Quat::IDENTITY, GROUND_COLOR),
    };

    let span = (ceiling - floor).max(1) as f32;
    let shade = (level - floor) as f32 / span * 0.5;
    SceneBlock {
        cell,
        level,
        kind,
        rotation,
        color: base.lighten(shade),
    }
}

/// Reports whether the cell at `level` in column `(x, y)` is solid.
#[must_use]
pub fn is_solid(grid: &TileGrid, x: i64, y: i64, level: i32) -> bool {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return false;
    };
    grid.tile(CellCoord::new(x, y))
        .is_some_and(|tile| !tile.is_empty() && level <= tile.height())
}

/// Reports whether a solid cell has at least one non-solid axis neighbour.
#[must_use]
pub fn is_exposed(grid: &TileGrid, cell: CellCoord, level: i32) -> bool {
    let x = i64::from(cell.x());
    let y = i64::from(cell.y());
    if !is_solid(grid, x, y, level) {
        return false;
    }

    let horizontal = Direction::ALL.iter().any(|direction| {
        let (dx, dy) = direction.offset();
        !is_solid(grid, x + i64::from(dx), y + i64::from(dy), level)
    });
    horizontal
        || !is_solid(grid, x, y, level.saturating_add(1))
        || !is_solid(grid, x, y, level.saturating_sub(1))
}

/// Quarter-turn about the vertical axis that faces a stair model authored
/// toward north in the provided direction.
#[must_use]
pub fn stair_rotation(direction: Direction) -> Quat {
    let quarter_turns = match direction {
        Direction::North => 0.0,
        Direction::East => 1.0,
        Direction::South => 2.0,
        Direction::West => 3.0,
    };
    Quat::from_rotation_y(quarter_turns * std::f32::consts::FRAC_PI_2)
}

/// Backend capable of presenting a generated grid.
pub trait RenderingBackend {
    /// Presents the grid and its exposed-block scene.
    fn present(&mut self, grid: &TileGrid, scene: &Scene) -> AnyResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use landfall_core::{GenerationConfig, GenerationSettings};

    fn grid_with(tiles: &[(u32, u32, Tile)]) -> TileGrid {
        let config = GenerationConfig::new(&GenerationSettings {
            overall_map_radius: 2,
            center_flat_radius: 0.0,
            ..GenerationSettings::default()
        });
        let mut grid = TileGrid::new(&config);
        for &(x, y, tile) in tiles {
            assert!(grid.set(CellCoord::new(x, y), tile));
        }
        grid
    }

    #[test]
    fn solidity_follows_column_height() {
        let grid = grid_with(&[(1, 1, Tile::ground(2))]);
        assert!(is_solid(&grid, 1, 1, 2));
        assert!(is_solid(&grid, 1, 1, -10));
        assert!(!is_solid(&grid, 1, 1, 3));
        assert!(!is_solid(&grid, 0, 0, 0));
        assert!(!is_solid(&grid, -1, 1, 0));
    }

    #[test]
    fn buried_cells_are_not_exposed() {
        let tiles: Vec<_> = (0..4)
            .flat_map(|y| (0..4).map(move |x| (x, y, Tile::ground(3))))
            .collect();
        let grid = grid_with(&tiles);
        assert!(is_exposed(&grid, CellCoord::new(1, 1), 3));
        assert!(!is_exposed(&grid, CellCoord::new(1, 1), 2));
        assert!(is_exposed(&grid, CellCoord::new(0, 1), 2));
    }

    #[test]
    fn rotation_table_turns_in_quarter_steps() {
        let forward = Vec3::Z;
        let cases = [
            (Direction::North, Vec3::Z),
            (Direction::East, Vec3::X),
            (Direction::South, Vec3::NEG_Z),
            (Direction::West, Vec3::NEG_X),
        ];
        for (direction, expected) in cases {
            let rotated = stair_rotation(direction) * forward;
            assert!(
                rotated.abs_diff_eq(expected, 1e-5),
                "{direction:?} rotated to {rotated:?}"
            );
        }
    }

    #[test]
    fn lighten_moves_towards_white() {
        let color = Color::from_rgb_u8(0, 0, 0).lighten(0.5);
        assert!((color.red - 0.5).abs() < f32::EPSILON);
        assert!((color.alpha - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn scene_marks_stair_surface_only() {
        let grid = grid_with(&[
            (1, 1, Tile::stair(1, Direction::East)),
            (2, 1, Tile::ground(2)),
        ]);
        let scene = Scene::from_grid(&grid);

        assert_eq!(scene.floor, Some(1));
        assert_eq!(scene.ceiling, Some(2));
        assert_eq!(scene.stair_count(), 1);

        let stair = scene
            .blocks
            .iter()
            .find(|block| matches!(block.kind, BlockKind::Stair { .. }))
            .expect("stair block present");
        assert_eq!(stair.cell, CellCoord::new(1, 1));
        assert_eq!(stair.level, 1);
        assert_eq!(
            stair.kind,
            BlockKind::Stair {
                direction: Direction::East
            }
        );
        assert!(stair
            .translation(2.0)
            .abs_diff_eq(Vec3::new(2.0, 2.0, 2.0), 1e-6));
        assert_eq!(scene.blocks.len(), 3);
    }

    #[test]
    fn enclosed_columns_start_at_their_lowest_neighbour() {
        let tall = 1_000_000;
        let tiles: Vec<_> = (0..4)
            .flat_map(|y| (0..4).map(move |x| (x, y, Tile::ground(tall))))
            .collect();
        let mut grid = grid_with(&tiles);
        assert!(grid.set(CellCoord::new(2, 1), Tile::ground(tall - 3)));

        let center = CellCoord::new(1, 1);
        let center_tile = grid.tile(center).expect("in grid");
        assert_eq!(exposure_base(&grid, center, center_tile, 0), tall - 3);

        let lowered = CellCoord::new(2, 1);
        let lowered_tile = grid.tile(lowered).expect("in grid");
        assert_eq!(exposure_base(&grid, lowered, lowered_tile, 0), tall - 3);

        let edge = CellCoord::new(0, 1);
        let edge_tile = grid.tile(edge).expect("in grid");
        assert_eq!(exposure_base(&grid, edge, edge_tile, 0), 0);
    }

    #[test]
    fn empty_grid_yields_empty_scene() {
        let grid = grid_with(&[]);
        assert_eq!(Scene::from_grid(&grid), Scene::default());
    }
}
