//! Single-tile generation
//!
//! `(config, seeds, coord)` fully determines a [`Tile`]: raw fields, derived
//! relief and climate, final elevation, biome with palette, world position
//! and a render variant drawn from the tile's own RNG stream.

use serde::Serialize;

use crate::biome::{self, Biome, BiomePalette, BiomeThresholds};
use crate::config::WorldGenConfig;
use crate::derived::{self, clamp01, ClimateResult, DerivedConfig, DerivedContext};
use crate::fields::{FieldSampler, TileFields};
use crate::grid::WorldPos;
use crate::hex::AxialCoord;
use crate::rng::Mulberry32;
use crate::seeds::WorldSeeds;

/// Number of render variants per biome.
pub const VARIANT_COUNT: i32 = 4;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub coord: AxialCoord,
    pub position: WorldPos,
    pub fields: TileFields,
    pub relief_index: f32,
    pub climate: ClimateResult,
    /// Final normalized elevation
    pub elevation: f32,
    pub slope: f32,
    pub biome: Biome,
    pub palette: BiomePalette,
    /// Mesh/texture variant in `0..VARIANT_COUNT`
    pub variant: i32,
}

impl Tile {
    pub fn is_water(&self) -> bool {
        self.biome.is_water()
    }
}

/// Generates tiles for one `(config, seeds)` pair.
///
/// Holds the seeded noise layers so a world does not rebuild them per tile.
pub struct TileGenerator<'a> {
    config: &'a WorldGenConfig,
    seeds: WorldSeeds,
    sampler: FieldSampler,
    thresholds: BiomeThresholds,
}

impl<'a> TileGenerator<'a> {
    pub fn new(config: &'a WorldGenConfig, seeds: WorldSeeds) -> Self {
        Self {
            config,
            seeds,
            sampler: FieldSampler::new(&seeds, &config.noise, &config.layout),
            thresholds: BiomeThresholds::new(config.sea_level),
        }
    }

    pub fn seeds(&self) -> &WorldSeeds {
        &self.seeds
    }

    pub fn generate(&self, coord: AxialCoord) -> Tile {
        let fields = self.sampler.sample(coord);
        self.generate_from_fields(coord, fields)
    }

    /// Build a tile from caller-supplied raw fields.
    pub fn generate_from_fields(&self, coord: AxialCoord, fields: TileFields) -> Tile {
        let cfg = self.config;
        let derived_cfg = DerivedConfig {
            sea_level: cfg.sea_level,
            relief: &cfg.relief,
            climate: &cfg.climate,
        };
        let mut ctx = DerivedContext::new(fields, cfg.region_bias(coord));
        let derived = derived::compute_derived_fields(&mut ctx, &derived_cfg);
        let relief = derived.relief_index;

        let elevation = clamp01(clamp01(fields.macro_elevation) + (relief - 0.5) * cfg.relief.elevation_gain);
        let slope = clamp01(fields.macro_slope) * (0.5 + relief);
        let signed_latitude = (clamp01(fields.latitude_normalized) - 0.5) * 2.0;
        let sample = biome::map_biome(elevation, slope, Some(signed_latitude), &self.thresholds);

        let (x, z) = self.sampler.world_xz(coord);
        let position = WorldPos::new(x, elevation as f64 * cfg.layout.height_scale, z);

        let mut rng = Mulberry32::new(self.seeds.tile_seed(coord));
        let variant = rng.next_int(0, VARIANT_COUNT - 1);

        Tile {
            coord,
            position,
            fields,
            relief_index: relief,
            climate: derived.climate,
            elevation,
            slope,
            biome: sample.biome,
            palette: sample.palette,
            variant,
        }
    }
}

/// Generate one tile. Prefer [`TileGenerator`] when generating many.
pub fn generate_tile(config: &WorldGenConfig, seeds: &WorldSeeds, coord: AxialCoord) -> Tile {
    TileGenerator::new(config, *seeds).generate(coord)
}

/// Generate one tile from a text seed.
pub fn generate_tile_from_text(config: &WorldGenConfig, seed: &str, coord: AxialCoord) -> Tile {
    generate_tile(config, &WorldSeeds::from_text(seed), coord)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_is_deterministic() {
        let config = WorldGenConfig::default();
        let a = generate_tile_from_text(&config, "seed-test", AxialCoord::new(1, 2));
        let b = generate_tile_from_text(&config, "seed-test", AxialCoord::new(1, 2));
        assert_eq!(a, b);
        assert_eq!(a.elevation.to_bits(), b.elevation.to_bits());
        assert_eq!(a.position.x.to_bits(), b.position.x.to_bits());
    }

    #[test]
    fn test_palette_matches_biome() {
        let config = WorldGenConfig::default();
        let generator = TileGenerator::new(&config, WorldSeeds::from_master(99));
        for q in -4..=4 {
            let tile = generator.generate(AxialCoord::new(q, -q / 2));
            assert_eq!(tile.palette, tile.biome.palette());
            assert!((0..VARIANT_COUNT).contains(&tile.variant));
            assert!((0.0..=1.0).contains(&tile.elevation));
        }
    }

    #[test]
    fn test_position_uses_layout() {
        let mut config = WorldGenConfig::default();
        config.layout.spacing_factor = 2.0;
        config.layout.height_scale = 10.0;
        let tile = generate_tile(&config, &WorldSeeds::from_master(5), AxialCoord::new(2, 0));
        assert!((tile.position.x - 6.0).abs() < 1e-9);
        assert!((tile.position.y - tile.elevation as f64 * 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_supplied_fields() {
        let config = WorldGenConfig::default();
        let generator = TileGenerator::new(&config, WorldSeeds::from_master(1));
        let underwater = TileFields {
            macro_elevation: 0.05,
            plate_edge_distance: 1.0,
            latitude_normalized: 0.5,
            ..TileFields::default()
        };
        let tile = generator.generate_from_fields(AxialCoord::ORIGIN, underwater);
        assert_eq!(tile.biome, Biome::DeepWater);
        assert!(tile.is_water());
    }
}
