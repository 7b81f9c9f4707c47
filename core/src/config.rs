//! Generation parameters and their sanitization.
//!
//! [`GenerationSettings`] is the raw, deserializable surface that adapters
//! fill from files or flags. [`GenerationConfig`] is what the pipeline runs
//! on: every field has been clamped into range, so construction never fails
//! and a nonsensical input simply yields a smaller or plainer map.

use serde::{Deserialize, Serialize};

/// Smallest noise scale accepted before sampling coordinates are divided by it.
pub const NOISE_SCALE_EPSILON: f64 = 1e-4;

const DEFAULT_OVERALL_MAP_RADIUS: i32 = 16;
const DEFAULT_CENTER_FLAT_RADIUS: f64 = 4.0;
const DEFAULT_STAIR_PROBABILITY: f64 = 0.85;

/// Policy bounding how low a stair base may sit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StairFloor {
    /// Stairs may be placed at any height, including below zero.
    #[default]
    Unbounded,
    /// Stairs whose final height would fall below the bound are not placed.
    AtLeast(i32),
}

impl StairFloor {
    /// Reports whether a stair finishing at `height` is permitted.
    #[must_use]
    pub const fn admits(self, height: i32) -> bool {
        match self {
            Self::Unbounded => true,
            Self::AtLeast(floor) => height >= floor,
        }
    }
}

/// Inclusive integer range used for uniform draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrawRange {
    min: i32,
    max: i32,
}

impl DrawRange {
    /// Creates a range, swapping the bounds when they arrive reversed.
    #[must_use]
    pub const fn new(a: i32, b: i32) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn min(&self) -> i32 {
        self.min
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn max(&self) -> i32 {
        self.max
    }
}

/// Raw coherent-noise parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Divisor applied to cell coordinates before sampling. Noise is taken
    /// at cell centres; a scale that maps those centres onto whole numbers
    /// (`0.5`, `0.25`, ...) with matching offsets samples the noise lattice,
    /// where it is zero, and flattens the band.
    pub scale: f64,
    /// Largest height offset, in whole units, the noise may produce.
    pub amplitude: i32,
    /// Offset added to `x` before scaling.
    pub offset_x: f64,
    /// Offset added to `y` before scaling.
    pub offset_y: f64,
    /// Permutation seed of the noise function.
    pub seed: u32,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            scale: 8.0,
            amplitude: 2,
            offset_x: 0.37,
            offset_y: 0.61,
            seed: 0,
        }
    }
}

/// Raw platform parameters. Ranges are inclusive `[min, max]` pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformSettings {
    /// Number of platforms to attempt.
    pub count: u32,
    /// Footprint extent along `x`.
    pub width: [i32; 2],
    /// Footprint extent along `y`.
    pub length: [i32; 2],
    /// Surface height before the landing-pad lower bound is applied.
    pub height: [i32; 2],
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            count: 4,
            width: [2, 5],
            length: [2, 5],
            height: [1, 4],
        }
    }
}

/// Raw generation parameters as supplied by adapters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Radius of the playable circle; the grid side is twice this value.
    pub overall_map_radius: i32,
    /// Radius of the flat landing pad around the center.
    pub center_flat_radius: f64,
    /// Height of the landing pad surface.
    pub landing_pad_height: i32,
    /// Coherent-noise parameters for the terrain band.
    pub noise: NoiseSettings,
    /// Platform parameters.
    pub platforms: PlatformSettings,
    /// Chance that an eligible discontinuity becomes a stair.
    pub stair_probability: f64,
    /// Lower bound for stair heights.
    pub stair_floor: StairFloor,
    /// Seed for the stochastic generator; absent seeds draw from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            overall_map_radius: DEFAULT_OVERALL_MAP_RADIUS,
            center_flat_radius: DEFAULT_CENTER_FLAT_RADIUS,
            landing_pad_height: 0,
            noise: NoiseSettings::default(),
            platforms: PlatformSettings::default(),
            stair_probability: DEFAULT_STAIR_PROBABILITY,
            stair_floor: StairFloor::Unbounded,
            seed: None,
        }
    }
}

/// Sanitized coherent-noise parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseConfig {
    scale: f64,
    amplitude: i32,
    offset_x: f64,
    offset_y: f64,
    seed: u32,
}

impl NoiseConfig {
    fn sanitize(settings: &NoiseSettings) -> Self {
        let scale = if settings.scale.is_finite() {
            settings.scale.max(NOISE_SCALE_EPSILON)
        } else {
            NOISE_SCALE_EPSILON
        };
        Self {
            scale,
            amplitude: settings.amplitude.max(0),
            offset_x: finite_or_zero(settings.offset_x),
            offset_y: finite_or_zero(settings.offset_y),
            seed: settings.seed,
        }
    }

    /// Divisor applied to cell coordinates, never below [`NOISE_SCALE_EPSILON`].
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Largest absolute height offset produced by the noise.
    #[must_use]
    pub const fn amplitude(&self) -> i32 {
        self.amplitude
    }

    /// Offset added to `x` before scaling.
    #[must_use]
    pub const fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Offset added to `y` before scaling.
    #[must_use]
    pub const fn offset_y(&self) -> f64 {
        self.offset_y
    }

    /// Permutation seed of the noise function.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }
}

/// Sanitized platform parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlatformConfig {
    count: u32,
    width: DrawRange,
    length: DrawRange,
    height: DrawRange,
}

impl PlatformConfig {
    fn sanitize(settings: &PlatformSettings) -> Self {
        let [width_min, width_max] = settings.width;
        let [length_min, length_max] = settings.length;
        let [height_min, height_max] = settings.height;
        Self {
            count: settings.count,
            width: DrawRange::new(width_min, width_max),
            length: DrawRange::new(length_min, length_max),
            height: DrawRange::new(height_min, height_max),
        }
    }

    /// Number of platforms to attempt.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Inclusive range for the footprint extent along `x`.
    #[must_use]
    pub const fn width(&self) -> DrawRange {
        self.width
    }

    /// Inclusive range for the footprint extent along `y`.
    #[must_use]
    pub const fn length(&self) -> DrawRange {
        self.length
    }

    /// Inclusive range for the surface height, before the pad bound applies.
    #[must_use]
    pub const fn height(&self) -> DrawRange {
        self.height
    }
}

/// Immutable, sanitized parameters for one generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationConfig {
    overall_map_radius: u32,
    center_flat_radius: f64,
    landing_pad_height: i32,
    noise: NoiseConfig,
    platforms: PlatformConfig,
    stair_probability: f64,
    stair_floor: StairFloor,
    seed: Option<u64>,
}

impl GenerationConfig {
    /// Sanitizes raw settings by clamping every field into its valid range.
    #[must_use]
    pub fn new(settings: &GenerationSettings) -> Self {
        let overall_map_radius = u32::try_from(settings.overall_map_radius.max(1)).unwrap_or(1);
        let center_flat_radius = if settings.center_flat_radius.is_nan() {
            0.0
        } else {
            settings
                .center_flat_radius
                .clamp(0.0, f64::from(overall_map_radius))
        };
        let stair_probability = if settings.stair_probability.is_nan() {
            0.0
        } else {
            settings.stair_probability.clamp(0.0, 1.0)
        };

        Self {
            overall_map_radius,
            center_flat_radius,
            landing_pad_height: settings.landing_pad_height,
            noise: NoiseConfig::sanitize(&settings.noise),
            platforms: PlatformConfig::sanitize(&settings.platforms),
            stair_probability,
            stair_floor: settings.stair_floor,
            seed: settings.seed,
        }
    }

    /// Radius of the playable circle, at least one.
    #[must_use]
    pub const fn overall_map_radius(&self) -> u32 {
        self.overall_map_radius
    }

    /// Radius of the landing pad, within `[0, overall_map_radius]`.
    #[must_use]
    pub const fn center_flat_radius(&self) -> f64 {
        self.center_flat_radius
    }

    /// Height of the landing pad surface.
    #[must_use]
    pub const fn landing_pad_height(&self) -> i32 {
        self.landing_pad_height
    }

    /// Side length of the square grid, `2 × overall_map_radius`.
    #[must_use]
    pub const fn grid_side(&self) -> u32 {
        self.overall_map_radius.saturating_mul(2)
    }

    /// Coherent-noise parameters.
    #[must_use]
    pub const fn noise(&self) -> &NoiseConfig {
        &self.noise
    }

    /// Platform parameters.
    #[must_use]
    pub const fn platforms(&self) -> &PlatformConfig {
        &self.platforms
    }

    /// Chance that an eligible discontinuity becomes a stair, within `[0, 1]`.
    #[must_use]
    pub const fn stair_probability(&self) -> f64 {
        self.stair_probability
    }

    /// Lower bound for stair heights.
    #[must_use]
    pub const fn stair_floor(&self) -> StairFloor {
        self.stair_floor
    }

    /// Seed for the stochastic generator, if the run is reproducible.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(&GenerationSettings::default())
    }
}

impl From<GenerationSettings> for GenerationConfig {
    fn from(settings: GenerationSettings) -> Self {
        Self::new(&settings)
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
