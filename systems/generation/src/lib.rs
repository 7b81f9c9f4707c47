#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Generation pipeline that runs the terrain stages in their fixed order.
//!
//! The heightfield initializer builds a fresh grid, the platform stamper
//! raises regions on it, and the stair synthesizer relaxes the result. All
//! stochastic draws come from one sequential generator, so a seeded run
//! reproduces the same grid exactly.

use landfall_core::{Event, GenerationConfig};
use landfall_system_heightfield::Heightfield;
use landfall_system_platforms::{PlatformReport, Platforms};
use landfall_system_stairs::{RelaxationReport, Stairs};
use landfall_world::{query, TileGrid};
use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, info_span};

/// Summary of a finished generation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationReport {
    /// Seed the generator was created from, `None` for injected generators.
    pub seed: Option<u64>,
    /// Platform stamping outcome.
    pub platforms: PlatformReport,
    /// Stair relaxation outcome.
    pub relaxation: RelaxationReport,
    /// Stair tiles present in the final grid.
    pub stair_tiles: u32,
}

/// Completed terrain together with everything observed while building it.
#[derive(Clone, Debug)]
pub struct Generation {
    grid: TileGrid,
    events: Vec<Event>,
    report: GenerationReport,
}

impl Generation {
    /// Final tile grid.
    #[must_use]
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Events emitted by every stage in the order they occurred.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Summary of the run.
    #[must_use]
    pub const fn report(&self) -> &GenerationReport {
        &self.report
    }

    /// Consumes the run, yielding the grid.
    #[must_use]
    pub fn into_grid(self) -> TileGrid {
        self.grid
    }
}

/// Entry point that owns stage ordering.
#[derive(Debug, Default)]
pub struct Generator;

impl Generator {
    /// Runs the pipeline with a ChaCha generator seeded from the
    /// configuration, or from OS entropy when no seed is configured.
    #[must_use]
    pub fn generate(&self, config: &GenerationConfig) -> Generation {
        let seed = config.seed().unwrap_or_else(|| OsRng.next_u64());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut generation = self.generate_with_rng(config, &mut rng);
        generation.report.seed = Some(seed);
        generation
    }

    /// Runs the pipeline drawing from an injected generator.
    pub fn generate_with_rng<R>(&self, config: &GenerationConfig, rng: &mut R) -> Generation
    where
        R: Rng + ?Sized,
    {
        let span = info_span!(
            "generate",
            radius = config.overall_map_radius(),
            flat_radius = config.center_flat_radius()
        );
        let _entered = span.enter();

        let mut events = Vec::new();
        let mut grid = Heightfield.initialize(config, &mut events);
        let platforms = Platforms.stamp(config, &mut grid, rng, &mut events);
        let relaxation = Stairs::new(config).relax(&mut grid, rng, &mut events);
        let stair_tiles = query::kind_counts(&grid).stair;

        info!(
            stamped = platforms.stamped,
            passes = relaxation.passes,
            stair_tiles,
            "terrain generated"
        );

        Generation {
            grid,
            events,
            report: GenerationReport {
                seed: None,
                platforms,
                relaxation,
                stair_tiles,
            },
        }
    }
}
