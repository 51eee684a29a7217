//! Derived per-tile fields: relief index and climate
//!
//! Both are computed from raw [`TileFields`] at most once per tile and cached
//! on the [`DerivedContext`]. Climate reads the relief index, so relief is
//! always resolved first.

use serde::{Deserialize, Serialize};

use crate::config::{ClimateConfig, RegionBias, ReliefConfig, MIN_RELIEF_EXPONENT};
use crate::fields::TileFields;

/// Climate scalars of one tile, all in [0,1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimateResult {
    pub temperature: f32,
    pub moisture: f32,
    pub ocean_proximity: f32,
    /// Normalized latitude the climate was computed for (0.5 = equator)
    pub latitude: f32,
}

/// Output of [`compute_derived_fields`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedFields {
    pub relief_index: f32,
    pub climate: ClimateResult,
}

/// Layer configuration consumed by the pipeline.
#[derive(Clone, Copy, Debug)]
pub struct DerivedConfig<'a> {
    pub sea_level: f32,
    pub relief: &'a ReliefConfig,
    pub climate: &'a ClimateConfig,
}

/// Per-tile accumulator. Create one per tile generation call.
#[derive(Clone, Debug)]
pub struct DerivedContext {
    pub fields: TileFields,
    pub region: RegionBias,
    relief_index: Option<f32>,
    climate: Option<ClimateResult>,
}

impl DerivedContext {
    pub fn new(fields: TileFields, region: RegionBias) -> Self {
        Self {
            fields,
            region,
            relief_index: None,
            climate: None,
        }
    }

    /// Relief index, computed on first call.
    pub fn relief_index(&mut self, cfg: &DerivedConfig<'_>) -> f32 {
        if let Some(relief) = self.relief_index {
            return relief;
        }
        let relief = compute_relief_index(&self.fields, &self.region, cfg.relief);
        self.relief_index = Some(relief);
        relief
    }

    /// Climate, computed on first call (resolving relief first).
    pub fn climate(&mut self, cfg: &DerivedConfig<'_>) -> ClimateResult {
        if let Some(climate) = self.climate {
            return climate;
        }
        let relief = self.relief_index(cfg);
        let climate = compute_climate(&self.fields, &self.region, relief, cfg);
        self.climate = Some(climate);
        climate
    }

    pub fn is_relief_cached(&self) -> bool {
        self.relief_index.is_some()
    }

    pub fn is_climate_cached(&self) -> bool {
        self.climate.is_some()
    }
}

/// Resolve every derived field on the context and return them.
pub fn compute_derived_fields(ctx: &mut DerivedContext, cfg: &DerivedConfig<'_>) -> DerivedFields {
    let relief_index = ctx.relief_index(cfg);
    let climate = ctx.climate(cfg);
    DerivedFields { relief_index, climate }
}

/// Clamp to [0,1]; NaN reads as 0.
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

// =============================================================================
// RELIEF
// =============================================================================

fn compute_relief_index(fields: &TileFields, region: &RegionBias, cfg: &ReliefConfig) -> f32 {
    let weights = region.relief_weights.unwrap_or(cfg.weights);

    let blended = (1.0 - clamp01(fields.plate_edge_distance)) * weights.plate_edge
        + clamp01(fields.medium_detail_abs) * weights.medium_detail
        + clamp01(fields.macro_slope) * weights.macro_slope
        + clamp01(fields.ridge_strength) * weights.ridge;

    let multiplier = finite_or(region.relief_multiplier, 1.0);
    let bias = finite_or(region.relief_bias, 0.0) + finite_or(cfg.base_bias, 0.0);
    let shaped = clamp01(blended * multiplier + bias);

    let exponent =
        finite_or(cfg.exponent, ReliefConfig::default().exponent).max(MIN_RELIEF_EXPONENT);
    shaped.powf(exponent)
}

// =============================================================================
// CLIMATE
// =============================================================================

/// Temperature ocean proximity pulls towards.
const MILD_TEMPERATURE: f32 = 0.5;

fn compute_climate(
    fields: &TileFields,
    region: &RegionBias,
    relief_index: f32,
    cfg: &DerivedConfig<'_>,
) -> ClimateResult {
    let climate = cfg.climate;
    let latitude = clamp01(fields.latitude_normalized);
    let elevation = clamp01(fields.macro_elevation);
    let sea_level = clamp01(cfg.sea_level);

    let elevation_above_sea = (elevation - sea_level).max(0.0);
    let coast_width = if climate.coast_width > 0.0 { climate.coast_width } else { f32::EPSILON };
    let ocean_proximity = clamp01(1.0 - (elevation - sea_level).abs() / coast_width);

    // Warmest at the equator, cooling with altitude
    let base_temperature = 1.0 - (latitude - 0.5).abs() * 2.0;
    let lapsed = base_temperature - elevation_above_sea * climate.lapse_rate;
    let moderation = clamp01(ocean_proximity * climate.ocean_moderation);
    let temperature = clamp01(
        lapsed + (MILD_TEMPERATURE - lapsed) * moderation
            + climate.temperature_bias
            + finite_or(region.temperature_bias, 0.0),
    );

    // Relief dries the interior; the coast keeps its moisture
    let rain_shadow = relief_index * climate.rain_shadow_strength * (1.0 - ocean_proximity);
    let moisture = clamp01(
        ocean_proximity - rain_shadow - elevation_above_sea * climate.altitude_dryness
            + climate.moisture_bias
            + finite_or(region.moisture_bias, 0.0),
    );

    ClimateResult {
        temperature,
        moisture,
        ocean_proximity,
        latitude,
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
