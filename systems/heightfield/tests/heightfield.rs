use landfall_core::{
    Event, GenerationConfig, GenerationSettings, NoiseSettings, PlatformSettings, TileKind,
};
use landfall_system_heightfield::Heightfield;
use landfall_world::{TileGrid, Zone};

fn config(radius: i32, flat: f64, pad_height: i32, amplitude: i32) -> GenerationConfig {
    GenerationConfig::new(&GenerationSettings {
        overall_map_radius: radius,
        center_flat_radius: flat,
        landing_pad_height: pad_height,
        noise: NoiseSettings {
            amplitude,
            ..NoiseSettings::default()
        },
        platforms: PlatformSettings {
            count: 0,
            ..PlatformSettings::default()
        },
        ..GenerationSettings::default()
    })
}

#[test]
fn zones_receive_their_base_tiles() {
    let config = config(12, 3.0, 5, 4);
    let mut events = Vec::new();
    let grid = Heightfield.initialize(&config, &mut events);

    assert_eq!(grid.width(), 24);
    for (cell, tile) in grid.iter() {
        match grid.layout().zone(cell) {
            Zone::Pad => {
                assert_eq!(tile.kind(), TileKind::Ground);
                assert_eq!(tile.height(), 5);
                assert_eq!(tile.direction(), None);
            }
            Zone::Band => {
                assert_eq!(tile.kind(), TileKind::Ground);
                assert!((-4..=4).contains(&tile.height()));
            }
            Zone::Outside => assert!(tile.is_empty()),
        }
    }
}

#[test]
fn scenario_without_noise_is_flat() {
    let config = config(2, 1.0, 0, 0);
    let mut events = Vec::new();
    let grid = Heightfield.initialize(&config, &mut events);

    assert_eq!(grid.width(), 4);
    assert!(grid
        .iter()
        .filter(|(_, tile)| !tile.is_empty())
        .all(|(_, tile)| tile.height() == 0));

    assert_eq!(
        events,
        vec![Event::HeightfieldInitialized {
            side: 4,
            pad_cells: 4,
            band_cells: 8,
            empty_cells: 4,
        }]
    );
}

#[test]
fn identical_configuration_reproduces_heights() {
    let config = config(10, 2.0, 0, 3);
    let first = Heightfield.initialize(&config, &mut Vec::new());
    let second = Heightfield.initialize(&config, &mut Vec::new());
    assert_eq!(first, second);
}

fn band_heights(grid: &TileGrid) -> Vec<i32> {
    grid.iter()
        .filter(|(cell, _)| grid.layout().zone(*cell) == Zone::Band)
        .map(|(_, tile)| tile.height())
        .collect()
}

fn noise_config(noise: NoiseSettings) -> GenerationConfig {
    GenerationConfig::new(&GenerationSettings {
        overall_map_radius: 12,
        center_flat_radius: 3.0,
        noise,
        ..GenerationSettings::default()
    })
}

#[test]
fn noise_band_is_not_flat() {
    let config = config(12, 3.0, 0, 4);
    let grid = Heightfield.initialize(&config, &mut Vec::new());

    let mut heights = band_heights(&grid);
    heights.sort_unstable();
    heights.dedup();
    assert!(heights.len() >= 2, "band collapsed to {heights:?}");
}

#[test]
fn noise_seed_and_offset_reshape_the_band() {
    let base = NoiseSettings {
        amplitude: 4,
        ..NoiseSettings::default()
    };
    let reference = band_heights(&Heightfield.initialize(
        &noise_config(base.clone()),
        &mut Vec::new(),
    ));

    let reseeded = band_heights(&Heightfield.initialize(
        &noise_config(NoiseSettings {
            seed: base.seed + 1,
            ..base.clone()
        }),
        &mut Vec::new(),
    ));
    assert_ne!(reference, reseeded, "noise seed had no effect");

    let shifted = band_heights(&Heightfield.initialize(
        &noise_config(NoiseSettings {
            offset_x: base.offset_x + 3.7,
            ..base
        }),
        &mut Vec::new(),
    ));
    assert_ne!(reference, shifted, "noise offset had no effect");
}
