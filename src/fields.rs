//! Raw per-tile noise fields
//!
//! [`FieldSampler`] produces [`TileFields`] for any axial coordinate from
//! seeded Perlin layers sampled at the tile's projected world position.
//! Sampling is a pure function of `(seeds, config, coord)`.

use noise::{NoiseFn, Perlin, Seedable};
use serde::{Deserialize, Serialize};

use crate::config::{LayoutConfig, NoiseConfig};
use crate::hex::{self, AxialCoord};
use crate::seeds::WorldSeeds;

/// Raw scalar bag for one tile. Values are nominally in [0,1] but are not
/// clamped here; consumers clamp on read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TileFields {
    pub macro_elevation: f32,
    pub macro_slope: f32,
    /// 0 on a plate boundary, rising to 1 in plate interiors
    pub plate_edge_distance: f32,
    pub medium_detail_abs: f32,
    pub ridge_strength: f32,
    /// 0 and 1 are the poles, 0.5 the equator
    pub latitude_normalized: f32,
}

// =============================================================================
// FIELD SAMPLER
// =============================================================================

/// Finite-difference step for the macro slope, in world units.
const SLOPE_STEP: f64 = 0.5;

/// Width of the plate boundary band in raw noise units.
const PLATE_BAND: f64 = 0.35;

pub struct FieldSampler {
    macro_noise: Perlin,
    plate_noise: Perlin,
    detail_noise: Perlin,
    ridge_noise: Perlin,
    noise: NoiseConfig,
    hex_size: f64,
    spacing_factor: f64,
    /// World-space half extent of the layout along Z, for latitude
    half_extent_z: f64,
}

impl FieldSampler {
    pub fn new(seeds: &WorldSeeds, noise: &NoiseConfig, layout: &LayoutConfig) -> Self {
        let radius = layout.layout_radius.max(1) as f64;
        let (_, extent) = hex::axial_to_xz(0.0, radius, layout.hex_size);
        Self {
            macro_noise: Perlin::new(1).set_seed(seeds.macro_terrain),
            plate_noise: Perlin::new(1).set_seed(seeds.plates),
            detail_noise: Perlin::new(1).set_seed(seeds.detail),
            ridge_noise: Perlin::new(1).set_seed(seeds.ridges),
            noise: noise.clone(),
            hex_size: layout.hex_size,
            spacing_factor: layout.spacing_factor,
            half_extent_z: (extent * layout.spacing_factor).abs().max(f64::EPSILON),
        }
    }

    /// Projected world XZ position of a tile (spacing applied).
    pub fn world_xz(&self, coord: AxialCoord) -> (f64, f64) {
        let (x, z) = hex::axial_to_xz(coord.q as f64, coord.r as f64, self.hex_size);
        (x * self.spacing_factor, z * self.spacing_factor)
    }

    pub fn sample(&self, coord: AxialCoord) -> TileFields {
        let (x, z) = self.world_xz(coord);

        let macro_elevation = self.macro_elevation(x, z);

        // Central differences over the continuous macro field
        let dx = self.macro_elevation(x + SLOPE_STEP, z) - self.macro_elevation(x - SLOPE_STEP, z);
        let dz = self.macro_elevation(x, z + SLOPE_STEP) - self.macro_elevation(x, z - SLOPE_STEP);
        let gradient = (dx * dx + dz * dz).sqrt() / (2.0 * SLOPE_STEP);
        let macro_slope = (gradient * self.noise.slope_gain).min(1.0);

        let plate = self.plate_noise.get([x * self.noise.plate_frequency, z * self.noise.plate_frequency]);
        let plate_edge_distance = (plate.abs() / PLATE_BAND).min(1.0);

        let detail = self.detail_noise.get([x * self.noise.detail_frequency, z * self.noise.detail_frequency]);
        let medium_detail_abs = detail.abs().min(1.0);

        let ridge = self.ridge_noise.get([x * self.noise.ridge_frequency, z * self.noise.ridge_frequency]);
        let ridge_strength = (1.0 - ridge.abs()).max(0.0).powi(2);

        let latitude_normalized = (0.5 + z / (2.0 * self.half_extent_z)).clamp(0.0, 1.0);

        TileFields {
            macro_elevation: macro_elevation as f32,
            macro_slope: macro_slope as f32,
            plate_edge_distance: plate_edge_distance as f32,
            medium_detail_abs: medium_detail_abs as f32,
            ridge_strength: ridge_strength as f32,
            latitude_normalized: latitude_normalized as f32,
        }
    }

    /// fBm macro elevation mapped from [-1,1] to [0,1].
    fn macro_elevation(&self, x: f64, z: f64) -> f64 {
        let freq = self.noise.macro_frequency;
        let n = fbm_noise(
            &self.macro_noise,
            x * freq,
            z * freq,
            self.noise.macro_octaves,
            self.noise.persistence,
            self.noise.lacunarity,
        );
        (n * 0.5 + 0.5 + self.noise.elevation_bias).clamp(0.0, 1.0)
    }
}

/// Fractional Brownian Motion noise
fn fbm_noise(
    noise: &impl NoiseFn<f64, 2>,
    x: f64,
    y: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves.max(1) {
        total += amplitude * noise.get([x * frequency, y * frequency]);
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    total / max_value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler(seed: &str) -> FieldSampler {
        FieldSampler::new(
            &WorldSeeds::from_text(seed),
            &NoiseConfig::default(),
            &LayoutConfig::default(),
        )
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let a = sampler("seed-test").sample(AxialCoord::new(1, 2));
        let b = sampler("seed-test").sample(AxialCoord::new(1, 2));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fields_in_unit_range() {
        let s = sampler("range");
        for q in -10..=10 {
            for r in -10..=10 {
                let f = s.sample(AxialCoord::new(q * 3, r * 3));
                for v in [
                    f.macro_elevation,
                    f.macro_slope,
                    f.plate_edge_distance,
                    f.medium_detail_abs,
                    f.ridge_strength,
                    f.latitude_normalized,
                ] {
                    assert!((0.0..=1.0).contains(&v), "{:?}", f);
                }
            }
        }
    }

    #[test]
    fn test_latitude_follows_world_z() {
        let s = sampler("lat");
        assert!((s.sample(AxialCoord::ORIGIN).latitude_normalized - 0.5).abs() < 1e-6);
        let south = s.sample(AxialCoord::new(0, 10)).latitude_normalized;
        let north = s.sample(AxialCoord::new(0, -10)).latitude_normalized;
        assert!(south > 0.5);
        assert!(north < 0.5);
    }

    #[test]
    fn test_seeds_change_fields() {
        let coord = AxialCoord::new(7, -3);
        assert_ne!(sampler("one").sample(coord), sampler("two").sample(coord));
    }
}
