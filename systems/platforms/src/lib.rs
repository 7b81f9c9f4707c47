#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Platform stamper that raises rectangular regions above the base terrain.
//!
//! Platforms are drawn independently and may overlap; a later stamp simply
//! overwrites an earlier one. Cells on the landing pad, beyond the map
//! boundary, or already empty are never touched.
//!
//! Draw order per platform is fixed: width, length, height, then the anchor
//! `x` and `y` unless the platform was discarded after the size draws.

use landfall_core::{CellCoord, CellRect, Event, GenerationConfig, PlatformSkip, Tile};
use landfall_world::{TileGrid, Zone};
use rand::Rng;
use tracing::{debug, info};

/// Outcome of a stamping run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlatformReport {
    /// Platforms written to the grid.
    pub stamped: u32,
    /// Platforms discarded before touching the grid.
    pub skipped: u32,
}

/// Pure system that stamps configured platforms onto a populated grid.
#[derive(Debug, Default)]
pub struct Platforms;

impl Platforms {
    /// Draws and stamps every configured platform using the shared generator.
    pub fn stamp<R>(
        &self,
        config: &GenerationConfig,
        grid: &mut TileGrid,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> PlatformReport
    where
        R: Rng + ?Sized,
    {
        let platforms = config.platforms();
        let width_range = platforms.width();
        let length_range = platforms.length();
        let height_low = config
            .landing_pad_height()
            .max(platforms.height().min());
        let height_high = platforms.height().max().max(height_low);

        let mut report = PlatformReport::default();
        for index in 0..platforms.count() {
            let width = rng.gen_range(width_range.min()..=width_range.max());
            let length = rng.gen_range(length_range.min()..=length_range.max());
            let height = rng.gen_range(height_low..=height_high);

            let region = match place(grid, width, length, rng) {
                Ok(region) => region,
                Err(reason) => {
                    debug!(index, width, length, ?reason, "platform skipped");
                    report.skipped += 1;
                    out_events.push(Event::PlatformSkipped { index, reason });
                    continue;
                }
            };

            let cells = stamp_region(grid, region, height);
            debug!(
                index,
                x = region.origin().x(),
                y = region.origin().y(),
                width,
                length,
                height,
                cells,
                "platform stamped"
            );
            report.stamped += 1;
            out_events.push(Event::PlatformStamped {
                index,
                region,
                height,
                cells,
            });
        }

        info!(
            stamped = report.stamped,
            skipped = report.skipped,
            "platforms stamped"
        );
        report
    }
}

fn place<R>(grid: &TileGrid, width: i32, length: i32, rng: &mut R) -> Result<CellRect, PlatformSkip>
where
    R: Rng + ?Sized,
{
    let (Ok(width), Ok(length)) = (u32::try_from(width), u32::try_from(length)) else {
        return Err(PlatformSkip::DegenerateSize);
    };
    if width == 0 || length == 0 {
        return Err(PlatformSkip::DegenerateSize);
    }
    if width > grid.width() || length > grid.height() {
        return Err(PlatformSkip::DoesNotFit);
    }

    let x = rng.gen_range(0..=grid.width() - width);
    let y = rng.gen_range(0..=grid.height() - length);
    Ok(CellRect::new(CellCoord::new(x, y), width, length))
}

/// Overwrites every stampable footprint cell, returning how many changed hands.
fn stamp_region(grid: &mut TileGrid, region: CellRect, height: i32) -> u32 {
    let mut written = 0;
    for cell in region.cells() {
        if grid.layout().zone(cell) != Zone::Band {
            continue;
        }
        match grid.tile(cell) {
            Some(tile) if !tile.is_empty() => {
                if grid.set(cell, Tile::ground(height)) {
                    written += 1;
                }
            }
            _ => {}
        }
    }
    written
}
