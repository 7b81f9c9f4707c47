#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Heightfield initializer that lays out the pad, the noise band and the
//! empty surroundings of a fresh grid.
//!
//! The stage is fully deterministic for a given configuration. It samples
//! coherent noise only and never touches the stochastic generator used by
//! later stages.

use landfall_core::{Event, GenerationConfig, NoiseConfig, Tile};
use landfall_world::{TileGrid, Zone};
use noise::{NoiseFn, Perlin};
use tracing::{debug, info};

/// Offset from a cell's corner to its centre, where noise is sampled.
///
/// Perlin noise is zero on every integer lattice point, so sampling cell
/// corners with a unit scale and whole offsets would flatten the band.
const CELL_CENTRE: f64 = 0.5;

/// Pure system that builds the base terrain of a generation run.
#[derive(Debug, Default)]
pub struct Heightfield;

impl Heightfield {
    /// Allocates a new grid for the configuration and assigns every cell its
    /// base tile.
    #[must_use]
    pub fn initialize(&self, config: &GenerationConfig, out_events: &mut Vec<Event>) -> TileGrid {
        let mut grid = TileGrid::new(config);
        let sampler = NoiseSampler::new(config.noise());
        let pad_height = config.landing_pad_height();

        let mut pad_cells = 0;
        let mut band_cells = 0;
        let mut empty_cells = 0;

        let cells: Vec<_> = grid.cells().collect();
        for cell in cells {
            let tile = match grid.layout().zone(cell) {
                Zone::Pad => {
                    pad_cells += 1;
                    Tile::ground(pad_height)
                }
                Zone::Band => {
                    band_cells += 1;
                    Tile::ground(sampler.height_offset(f64::from(cell.x()), f64::from(cell.y())))
                }
                Zone::Outside => {
                    empty_cells += 1;
                    Tile::EMPTY
                }
            };
            let _ = grid.set(cell, tile);
        }

        debug!(
            side = grid.width(),
            scale = config.noise().scale(),
            amplitude = config.noise().amplitude(),
            "heightfield sampled"
        );
        info!(pad_cells, band_cells, empty_cells, "heightfield initialized");

        out_events.push(Event::HeightfieldInitialized {
            side: grid.width(),
            pad_cells,
            band_cells,
            empty_cells,
        });
        grid
    }
}

/// Coherent noise remapped onto signed integer height offsets.
#[derive(Debug)]
struct NoiseSampler {
    perlin: Perlin,
    scale: f64,
    amplitude: i32,
    offset_x: f64,
    offset_y: f64,
}

impl NoiseSampler {
    fn new(config: &NoiseConfig) -> Self {
        Self {
            perlin: Perlin::new(config.seed()),
            scale: config.scale(),
            amplitude: config.amplitude(),
            offset_x: config.offset_x(),
            offset_y: config.offset_y(),
        }
    }

    /// Noise value in `[0, 1]` at the centre of the provided cell.
    fn sample(&self, x: f64, y: f64) -> f64 {
        let point = [
            (x + CELL_CENTRE + self.offset_x) / self.scale,
            (y + CELL_CENTRE + self.offset_y) / self.scale,
        ];
        ((self.perlin.get(point) + 1.0) / 2.0).clamp(0.0, 1.0)
    }

    fn height_offset(&self, x: f64, y: f64) -> i32 {
        if self.amplitude == 0 {
            return 0;
        }
        let centred = (self.sample(x, y) - 0.5) * 2.0 * f64::from(self.amplitude);
        centred.round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landfall_core::NoiseSettings;

    fn sampler(amplitude: i32) -> NoiseSampler {
        sampler_with(NoiseSettings {
            amplitude,
            ..NoiseSettings::default()
        })
    }

    fn sampler_with(noise: NoiseSettings) -> NoiseSampler {
        let settings = landfall_core::GenerationSettings {
            noise,
            ..landfall_core::GenerationSettings::default()
        };
        NoiseSampler::new(GenerationConfig::new(&settings).noise())
    }

    fn distinct_offsets(sampler: &NoiseSampler) -> Vec<i32> {
        let mut offsets: Vec<i32> = (0..24)
            .flat_map(|y| (0..24).map(move |x| (x, y)))
            .map(|(x, y)| sampler.height_offset(f64::from(x), f64::from(y)))
            .collect();
        offsets.sort_unstable();
        offsets.dedup();
        offsets
    }

    #[test]
    fn samples_stay_in_unit_interval() {
        let sampler = sampler(3);
        for x in 0..32 {
            for y in 0..32 {
                let value = sampler.sample(f64::from(x), f64::from(y));
                assert!((0.0..=1.0).contains(&value), "sample {value} out of range");
            }
        }
    }

    #[test]
    fn offsets_respect_amplitude() {
        let sampler = sampler(3);
        for x in 0..32 {
            for y in 0..32 {
                let offset = sampler.height_offset(f64::from(x), f64::from(y));
                assert!((-3..=3).contains(&offset), "offset {offset} exceeds amplitude");
            }
        }
    }

    #[test]
    fn lattice_aligned_settings_still_vary() {
        let sampler = sampler_with(NoiseSettings {
            scale: 1.0,
            amplitude: 8,
            offset_x: 0.0,
            offset_y: 0.0,
            seed: 0,
        });
        let offsets = distinct_offsets(&sampler);
        assert!(offsets.len() > 1, "band collapsed to {offsets:?}");
    }

    #[test]
    fn default_settings_vary() {
        assert!(distinct_offsets(&sampler(4)).len() > 1);
    }

    #[test]
    fn zero_amplitude_is_flat() {
        let sampler = sampler(0);
        assert_eq!(sampler.height_offset(4.0, 9.0), 0);
    }
}
