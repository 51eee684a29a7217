use hexworld::config::WorldGenConfig;
use hexworld::export;
use hexworld::hex::AxialCoord;
use hexworld::seeds::WorldSeeds;
use hexworld::tile::generate_tile_from_text;
use hexworld::world::HexWorld;

fn config(radius: i32) -> WorldGenConfig {
    let mut config = WorldGenConfig::default();
    config.layout.layout_radius = radius;
    config
}

#[test]
fn test_same_seed_same_tile() {
    let config = WorldGenConfig::default();
    let a = generate_tile_from_text(&config, "seed-test", AxialCoord::new(1, 2));
    let b = generate_tile_from_text(&config, "seed-test", AxialCoord::new(1, 2));
    assert_eq!(a.biome, b.biome);
    assert_eq!(a.palette, b.palette);
    assert_eq!(a.position, b.position);
    assert_eq!(a.relief_index.to_bits(), b.relief_index.to_bits());
    assert_eq!(a.variant, b.variant);
}

#[test]
fn test_world_matches_single_tile_generation() {
    let config = config(5);
    let world = HexWorld::generate(&config, WorldSeeds::from_text("seed-test"));
    let coord = AxialCoord::new(1, 2);
    let alone = generate_tile_from_text(&config, "seed-test", coord);
    assert_eq!(world.tile(coord), Some(&alone));
}

#[test]
fn test_parallel_generation_is_stable() {
    let config = config(10);
    let seeds = WorldSeeds::from_master(0xC0FFEE);
    let a = HexWorld::generate(&config, seeds);
    let b = HexWorld::generate(&config, seeds);
    assert_eq!(a.tiles(), b.tiles());
    assert_eq!(
        export::tiles_to_json(&a).unwrap(),
        export::tiles_to_json(&b).unwrap()
    );
}

#[test]
fn test_different_seeds_differ() {
    let config = config(6);
    let a = HexWorld::generate(&config, WorldSeeds::from_text("alpha"));
    let b = HexWorld::generate(&config, WorldSeeds::from_text("beta"));
    assert_ne!(a.tiles(), b.tiles());
}

#[test]
fn test_presets_generate() {
    for config in [WorldGenConfig::archipelago(), WorldGenConfig::highlands()] {
        let mut config = config;
        config.layout.layout_radius = 4;
        let world = HexWorld::generate(&config, WorldSeeds::from_master(7));
        assert_eq!(world.len(), 61);
        for tile in world.tiles() {
            assert_eq!(tile.palette, tile.biome.palette());
        }
    }
}
