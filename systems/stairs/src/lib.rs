#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stair synthesizer that relaxes height discontinuities into walkable steps.
//!
//! Each pass scans the grid in row-major order. Every non-empty cell shuffles
//! the four compass directions with the shared generator and inspects its
//! neighbours in that order. A lower ground tile beside a higher tile may be
//! raised to one unit below its anchor and turned into a stair facing it.
//! Raising a tile can open a one-unit gap against another neighbour, which a
//! later pass converts in turn, so staircases unfold one level per pass.
//!
//! Draw order is part of the contract: one shuffle per non-empty cell per
//! pass, then one gate draw per eligible neighbour, interleaved with the
//! scan. Any reordering changes the terrain produced for a seed.

use landfall_core::{CellCoord, Direction, Event, GenerationConfig, StairFloor, Tile, TileKind};
use landfall_world::TileGrid;
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info, trace};

/// Passes added on top of the configured height range.
pub const ITERATION_BUFFER: u32 = 5;
/// Fewest passes the synthesizer is ever allowed.
pub const MIN_ITERATIONS: u32 = 3;

/// Upper bound on relaxation passes for a configuration.
///
/// Sized from the worst-case height range so that a staircase spanning it can
/// unfold one step per pass.
#[must_use]
pub fn iteration_cap(config: &GenerationConfig) -> u32 {
    config
        .platforms()
        .height()
        .max()
        .unsigned_abs()
        .saturating_add(config.landing_pad_height().unsigned_abs())
        .saturating_add(config.noise().amplitude().unsigned_abs())
        .saturating_add(ITERATION_BUFFER)
        .max(MIN_ITERATIONS)
}

/// Outcome of a relaxation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RelaxationReport {
    /// Passes executed, including the final pass that made no changes.
    pub passes: u32,
    /// Stairs placed across every pass.
    pub mutations: u32,
    /// Whether the run ended on a pass without mutations rather than the cap.
    pub converged: bool,
}

/// Pure system that converts discontinuities into stair tiles.
#[derive(Clone, Copy, Debug)]
pub struct Stairs {
    probability: f64,
    floor: StairFloor,
    iteration_cap: u32,
}

impl Stairs {
    /// Creates a synthesizer using the configuration's probability, floor
    /// policy and derived iteration cap.
    #[must_use]
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            probability: config.stair_probability(),
            floor: config.stair_floor(),
            iteration_cap: iteration_cap(config),
        }
    }

    /// Overrides the iteration cap, still honouring [`MIN_ITERATIONS`].
    #[must_use]
    pub fn with_iteration_cap(mut self, iteration_cap: u32) -> Self {
        self.iteration_cap = iteration_cap.max(MIN_ITERATIONS);
        self
    }

    /// Maximum number of passes a run may execute.
    #[must_use]
    pub const fn iteration_cap(&self) -> u32 {
        self.iteration_cap
    }

    /// Runs passes until one makes no changes or the cap is reached.
    pub fn relax<R>(
        &self,
        grid: &mut TileGrid,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> RelaxationReport
    where
        R: Rng + ?Sized,
    {
        let cells: Vec<CellCoord> = grid.cells().collect();
        let mut report = RelaxationReport::default();

        for pass in 1..=self.iteration_cap {
            let mutations = self.run_pass(pass, &cells, grid, rng, out_events);
            out_events.push(Event::RelaxationPassCompleted { pass, mutations });
            debug!(pass, mutations, "relaxation pass completed");

            report.passes = pass;
            report.mutations = report.mutations.saturating_add(mutations);
            if mutations == 0 {
                report.converged = true;
                break;
            }
        }

        info!(
            passes = report.passes,
            mutations = report.mutations,
            converged = report.converged,
            cap = self.iteration_cap,
            "stair relaxation finished"
        );
        report
    }

    fn run_pass<R>(
        &self,
        pass: u32,
        cells: &[CellCoord],
        grid: &mut TileGrid,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> u32
    where
        R: Rng + ?Sized,
    {
        let width = grid.width();
        let height = grid.height();
        let mut mutations = 0;

        for &cell in cells {
            if grid.tile(cell).map_or(true, |tile| tile.is_empty()) {
                continue;
            }

            let mut order = Direction::ALL;
            order.shuffle(rng);

            for direction in order {
                let Some(neighbor) = cell.step(direction, width, height) else {
                    continue;
                };
                let (Some(current_tile), Some(neighbor_tile)) =
                    (grid.tile(cell), grid.tile(neighbor))
                else {
                    continue;
                };
                if current_tile.is_empty()
                    || neighbor_tile.is_empty()
                    || current_tile.height() == neighbor_tile.height()
                {
                    continue;
                }

                // The stair faces its higher neighbour.
                let (low, low_tile, high, high_tile, toward) =
                    if current_tile.height() < neighbor_tile.height() {
                        (cell, current_tile, neighbor, neighbor_tile, direction)
                    } else {
                        (
                            neighbor,
                            neighbor_tile,
                            cell,
                            current_tile,
                            direction.opposite(),
                        )
                    };

                let Some(target) = self.stair_height(grid, low, low_tile, high, high_tile) else {
                    continue;
                };

                if rng.gen::<f64>() >= self.probability {
                    continue;
                }

                let _ = grid.set(low, Tile::stair(target, toward));
                mutations += 1;
                trace!(
                    pass,
                    x = low.x(),
                    y = low.y(),
                    ?toward,
                    from = low_tile.height(),
                    to = target,
                    "stair placed"
                );
                out_events.push(Event::StairPlaced {
                    pass,
                    cell: low,
                    direction: toward,
                    from_height: low_tile.height(),
                    height: target,
                });

                // A cell that became a stair is claimed for this pass; a
                // converted neighbour leaves the current scan running.
                if low == cell {
                    break;
                }
            }
        }

        mutations
    }

    /// Height the low tile would take as a stair, or `None` when the pair is
    /// not eligible.
    fn stair_height(
        &self,
        grid: &TileGrid,
        low: CellCoord,
        low_tile: Tile,
        high: CellCoord,
        high_tile: Tile,
    ) -> Option<i32> {
        if low_tile.kind() != TileKind::Ground {
            return None;
        }
        if !matches!(high_tile.kind(), TileKind::Ground | TileKind::Stair) {
            return None;
        }

        let layout = grid.layout();
        if layout.in_pad(low) {
            return None;
        }
        if layout.in_pad(high) && high_tile.height() != grid.landing_pad_height() {
            return None;
        }

        // Covers both the exact one-unit gap and the raised base.
        let target = high_tile.height() - 1;
        self.floor.admits(target).then_some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landfall_core::{GenerationSettings, NoiseSettings, PlatformSettings};

    #[test]
    fn cap_grows_with_height_range() {
        let config = GenerationConfig::new(&GenerationSettings {
            landing_pad_height: -3,
            noise: NoiseSettings {
                amplitude: 2,
                ..NoiseSettings::default()
            },
            platforms: PlatformSettings {
                height: [1, 6],
                ..PlatformSettings::default()
            },
            ..GenerationSettings::default()
        });
        assert_eq!(iteration_cap(&config), 6 + 3 + 2 + ITERATION_BUFFER);
    }

    #[test]
    fn cap_is_floored() {
        let stairs = Stairs::new(&GenerationConfig::default()).with_iteration_cap(0);
        assert_eq!(stairs.iteration_cap(), MIN_ITERATIONS);
    }
}
