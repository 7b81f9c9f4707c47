use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use landfall_core::{Direction, Tile, TileKind};
use landfall_rendering::{RenderingBackend, Scene};
use landfall_system_generation::GenerationReport;
use landfall_world::{query, TileGrid};
use serde::Serialize;

/// Presentation selected on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Top-down character map, north at the top.
    #[default]
    Ascii,
    /// Full tile grid as JSON.
    Json,
    /// Counts and run statistics.
    Summary,
}

impl OutputFormat {
    /// Builds the backend writing this format to `out`.
    pub(crate) fn backend<'a, W>(
        self,
        out: W,
        report: GenerationReport,
    ) -> Box<dyn RenderingBackend + 'a>
    where
        W: Write + 'a,
    {
        match self {
            Self::Ascii => Box::new(AsciiBackend { out }),
            Self::Json => Box::new(JsonBackend { out, report }),
            Self::Summary => Box::new(SummaryBackend { out, report }),
        }
    }
}

/// Character used for a tile in the ASCII map.
///
/// Ground shows the last digit of its height, stairs show an arrow toward
/// the side they ascend to, and empty tiles show a space.
fn glyph(tile: Tile) -> char {
    match (tile.kind(), tile.direction()) {
        (TileKind::Empty, _) => ' ',
        (TileKind::Stair, Some(Direction::North)) => '^',
        (TileKind::Stair, Some(Direction::East)) => '>',
        (TileKind::Stair, Some(Direction::South)) => 'v',
        (TileKind::Stair, Some(Direction::West)) => '<',
        (TileKind::Stair, None) => '?',
        (TileKind::Ground, _) => {
            let digit = tile.height().rem_euclid(10) as u32;
            char::from_digit(digit, 10).unwrap_or('#')
        }
    }
}

struct AsciiBackend<W> {
    out: W,
}

impl<W: Write> RenderingBackend for AsciiBackend<W> {
    fn present(&mut self, grid: &TileGrid, _scene: &Scene) -> Result<()> {
        let width = grid.width() as usize;
        for row in grid.as_slice().chunks(width.max(1)).rev() {
            let line: String = row.iter().map(|tile| glyph(*tile)).collect();
            writeln!(self.out, "{}", line.trim_end()).context("failed to write map row")?;
        }
        self.out.flush().context("failed to flush map")
    }
}

#[derive(Serialize)]
struct TerrainDocument<'a> {
    seed: Option<u64>,
    width: u32,
    height: u32,
    landing_pad_height: i32,
    stair_tiles: u32,
    passes: u32,
    converged: bool,
    exposed_blocks: usize,
    rows: Vec<&'a [Tile]>,
}

struct JsonBackend<W> {
    out: W,
    report: GenerationReport,
}

impl<W: Write> RenderingBackend for JsonBackend<W> {
    fn present(&mut self, grid: &TileGrid, scene: &Scene) -> Result<()> {
        let width = grid.width() as usize;
        let document = TerrainDocument {
            seed: self.report.seed,
            width: grid.width(),
            height: grid.height(),
            landing_pad_height: grid.landing_pad_height(),
            stair_tiles: self.report.stair_tiles,
            passes: self.report.relaxation.passes,
            converged: self.report.relaxation.converged,
            exposed_blocks: scene.blocks.len(),
            rows: grid.as_slice().chunks(width.max(1)).collect(),
        };
        serde_json::to_writer_pretty(&mut self.out, &document)
            .context("failed to serialize terrain")?;
        writeln!(self.out).context("failed to terminate terrain document")?;
        self.out.flush().context("failed to flush terrain document")
    }
}

struct SummaryBackend<W> {
    out: W,
    report: GenerationReport,
}

impl<W: Write> RenderingBackend for SummaryBackend<W> {
    fn present(&mut self, grid: &TileGrid, scene: &Scene) -> Result<()> {
        let counts = query::kind_counts(grid);
        let report = &self.report;
        let seed = report
            .seed
            .map_or_else(|| "injected".to_owned(), |seed| seed.to_string());
        let bounds = query::height_bounds(grid)
            .map_or_else(|| "none".to_owned(), |(low, high)| format!("{low}..={high}"));

        writeln!(self.out, "seed: {seed}")?;
        writeln!(self.out, "grid: {}x{}", grid.width(), grid.height())?;
        writeln!(
            self.out,
            "tiles: {} ground, {} stair, {} empty",
            counts.ground, counts.stair, counts.empty
        )?;
        writeln!(self.out, "pad cells: {}", query::pad_cells(grid).len())?;
        writeln!(self.out, "heights: {bounds}")?;
        writeln!(
            self.out,
            "platforms: {} stamped, {} skipped",
            report.platforms.stamped, report.platforms.skipped
        )?;
        writeln!(
            self.out,
            "relaxation: {} passes, {} stairs, {}",
            report.relaxation.passes,
            report.relaxation.mutations,
            if report.relaxation.converged {
                "converged"
            } else {
                "hit iteration cap"
            }
        )?;
        writeln!(
            self.out,
            "exposed blocks: {} ({} stair)",
            scene.blocks.len(),
            scene.stair_count()
        )?;
        self.out.flush().context("failed to flush summary")
    }
}
