use std::{
    fs,
    path::{Path, PathBuf},
};

use landfall_core::GenerationSettings;
use thiserror::Error;

/// Failure raised while loading generation settings from disk.
#[derive(Debug, Error)]
pub(crate) enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file {path}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The settings file is not valid TOML for the generation settings.
    #[error("failed to parse settings file {path}")]
    Parse {
        /// File that was requested.
        path: PathBuf,
        /// Underlying TOML failure.
        #[source]
        source: toml::de::Error,
    },
}

/// Command-line values that take precedence over the settings file.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    pub(crate) seed: Option<u64>,
    pub(crate) radius: Option<i32>,
    pub(crate) flat_radius: Option<f64>,
    pub(crate) pad_height: Option<i32>,
    pub(crate) platforms: Option<u32>,
    pub(crate) stair_probability: Option<f64>,
}

impl Overrides {
    /// Applies every provided value on top of `settings`.
    pub(crate) fn apply(&self, mut settings: GenerationSettings) -> GenerationSettings {
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(radius) = self.radius {
            settings.overall_map_radius = radius;
        }
        if let Some(flat_radius) = self.flat_radius {
            settings.center_flat_radius = flat_radius;
        }
        if let Some(pad_height) = self.pad_height {
            settings.landing_pad_height = pad_height;
        }
        if let Some(platforms) = self.platforms {
            settings.platforms.count = platforms;
        }
        if let Some(probability) = self.stair_probability {
            settings.stair_probability = probability;
        }
        settings
    }
}

/// Reads settings from a TOML file. Missing keys keep their defaults.
pub(crate) fn load(path: &Path) -> Result<GenerationSettings, SettingsError> {
    let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse(contents: &str) -> Result<GenerationSettings, toml::de::Error> {
    toml::from_str(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use landfall_core::StairFloor;

    #[test]
    fn partial_files_keep_defaults() {
        let settings = parse(
            r#"
            overall_map_radius = 10
            stair_floor = { at_least = -2 }

            [platforms]
            count = 9
            "#,
        )
        .expect("valid settings");

        assert_eq!(settings.overall_map_radius, 10);
        assert_eq!(settings.stair_floor, StairFloor::AtLeast(-2));
        assert_eq!(settings.platforms.count, 9);
        assert_eq!(
            settings.platforms.width,
            GenerationSettings::default().platforms.width
        );
        assert_eq!(settings.noise, GenerationSettings::default().noise);
    }

    #[test]
    fn overrides_replace_only_provided_values() {
        let base = GenerationSettings {
            overall_map_radius: 20,
            landing_pad_height: 3,
            ..GenerationSettings::default()
        };
        let overrides = Overrides {
            seed: Some(42),
            pad_height: Some(-1),
            platforms: Some(0),
            ..Overrides::default()
        };
        let merged = overrides.apply(base);

        assert_eq!(merged.seed, Some(42));
        assert_eq!(merged.landing_pad_height, -1);
        assert_eq!(merged.platforms.count, 0);
        assert_eq!(merged.overall_map_radius, 20);
    }

    #[test]
    fn missing_file_reports_read_error() {
        let path = std::env::temp_dir().join("landfall-settings-that-does-not-exist.toml");
        let error = load(&path).expect_err("file is absent");
        assert!(matches!(error, SettingsError::Read { .. }));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let path = std::env::temp_dir().join(format!(
            "landfall-malformed-settings-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "overall_map_radius = \"wide\"").expect("temp file writable");
        let error = load(&path).expect_err("radius must be an integer");
        let _ = fs::remove_file(&path);
        assert!(matches!(error, SettingsError::Parse { .. }));
    }
}
