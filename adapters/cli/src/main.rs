#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates Landfall mission terrain.

mod output;
mod settings;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use landfall_core::{GenerationConfig, GenerationSettings};
use landfall_rendering::Scene;
use landfall_system_generation::Generator;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use output::OutputFormat;
use settings::Overrides;

/// Command-line arguments for the terrain generator.
#[derive(Debug, Parser)]
#[command(name = "landfall", about = "Generates procedural mission terrain")]
struct CliArgs {
    /// TOML file with generation settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for the generator; omitted seeds draw from OS entropy.
    #[arg(long)]
    seed: Option<u64>,
    /// Radius of the playable circle in cells.
    #[arg(long, allow_negative_numbers = true)]
    radius: Option<i32>,
    /// Radius of the flat landing pad around the center.
    #[arg(long, allow_negative_numbers = true)]
    flat_radius: Option<f64>,
    /// Height of the landing pad surface.
    #[arg(long, allow_negative_numbers = true)]
    pad_height: Option<i32>,
    /// Number of platforms to attempt.
    #[arg(long)]
    platforms: Option<u32>,
    /// Chance that an eligible discontinuity becomes a stair.
    #[arg(long)]
    stair_probability: Option<f64>,
    /// Output presentation.
    #[arg(long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
}

impl CliArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            radius: self.radius,
            flat_radius: self.flat_radius,
            pad_height: self.pad_height,
            platforms: self.platforms,
            stair_probability: self.stair_probability,
        }
    }

    fn settings(&self) -> Result<GenerationSettings> {
        let base = match &self.config {
            Some(path) => settings::load(path)
                .with_context(|| format!("could not load settings from {}", path.display()))?,
            None => GenerationSettings::default(),
        };
        Ok(self.overrides().apply(base))
    }
}

/// Entry point for the Landfall command-line interface.
fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    let settings = args.settings()?;
    debug!(?settings, "resolved settings");

    let config = GenerationConfig::new(&settings);
    let generation = Generator.generate(&config);
    let scene = Scene::from_grid(generation.grid());
    info!(
        seed = ?generation.report().seed,
        exposed_blocks = scene.blocks.len(),
        "presenting terrain"
    );

    let stdout = io::stdout();
    args.format
        .backend(stdout.lock(), *generation.report())
        .present(generation.grid(), &scene)
        .context("could not write terrain")
}
