//! World generation configuration
//!
//! An immutable parameter bag per generation run: sea level, hex layout,
//! relief/climate tuning, noise tuning and region overrides. Loaded from
//! JSON; every section falls back to its defaults when omitted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hex::AxialCoord;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// =============================================================================
// SECTIONS
// =============================================================================

/// Hex layout parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Hex radius in world units
    pub hex_size: f64,
    /// Number of rings around the origin in a generated world
    pub layout_radius: i32,
    /// Gap multiplier applied to projected positions (1.0 = touching hexes)
    pub spacing_factor: f64,
    /// World-space height of a tile at elevation 1.0
    pub height_scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hex_size: 1.0,
            layout_radius: 24,
            spacing_factor: 1.0,
            height_scale: 4.0,
        }
    }
}

/// Blend weights of the relief index inputs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliefWeights {
    /// Weight of `1 - plate_edge_distance`
    pub plate_edge: f32,
    pub medium_detail: f32,
    pub macro_slope: f32,
    pub ridge: f32,
}

impl Default for ReliefWeights {
    fn default() -> Self {
        Self {
            plate_edge: 0.42,
            medium_detail: 0.28,
            macro_slope: 0.2,
            ridge: 0.1,
        }
    }
}

/// Relief index tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliefConfig {
    pub weights: ReliefWeights,
    /// Added to every tile's relief before clamping
    pub base_bias: f32,
    /// Contrast exponent (never below `MIN_RELIEF_EXPONENT`)
    pub exponent: f32,
    /// How far relief pushes final elevation around the macro elevation
    pub elevation_gain: f32,
}

pub const MIN_RELIEF_EXPONENT: f32 = 0.25;

impl Default for ReliefConfig {
    fn default() -> Self {
        Self {
            weights: ReliefWeights::default(),
            base_bias: 0.0,
            exponent: 1.15,
            elevation_gain: 0.15,
        }
    }
}

/// Climate tuning. All scalars operate on normalized [0,1] fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    /// Temperature lost per unit of elevation above sea level
    pub lapse_rate: f32,
    /// Elevation distance from sea level over which ocean proximity fades
    pub coast_width: f32,
    /// How strongly ocean proximity pulls temperature towards mild
    pub ocean_moderation: f32,
    pub rain_shadow_strength: f32,
    /// Moisture lost per unit of elevation above sea level
    pub altitude_dryness: f32,
    pub temperature_bias: f32,
    pub moisture_bias: f32,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            lapse_rate: 0.8,
            coast_width: 0.12,
            ocean_moderation: 0.35,
            rain_shadow_strength: 0.6,
            altitude_dryness: 0.5,
            temperature_bias: 0.0,
            moisture_bias: 0.0,
        }
    }
}

/// Parameters of the field noise layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Base frequency for macro elevation (lower = larger continents)
    pub macro_frequency: f64,
    pub macro_octaves: u32,
    /// Amplitude decay per octave (0.0-1.0)
    pub persistence: f64,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
    pub plate_frequency: f64,
    pub detail_frequency: f64,
    pub ridge_frequency: f64,
    /// Scales the macro elevation gradient into a [0,1] slope
    pub slope_gain: f64,
    /// Shifts macro elevation up (more land) or down (more sea)
    pub elevation_bias: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            macro_frequency: 0.035,
            macro_octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
            plate_frequency: 0.012,
            detail_frequency: 0.12,
            ridge_frequency: 0.06,
            slope_gain: 6.0,
            elevation_bias: 0.0,
        }
    }
}

/// Per-region adjustments to the derived fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionBias {
    pub relief_multiplier: f32,
    pub relief_bias: f32,
    pub temperature_bias: f32,
    pub moisture_bias: f32,
    /// Replaces the configured relief weights inside the region
    pub relief_weights: Option<ReliefWeights>,
}

impl Default for RegionBias {
    fn default() -> Self {
        Self {
            relief_multiplier: 1.0,
            relief_bias: 0.0,
            temperature_bias: 0.0,
            moisture_bias: 0.0,
            relief_weights: None,
        }
    }
}

/// A hex disc that applies a [`RegionBias`] to the tiles it covers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionOverride {
    pub name: String,
    pub center: AxialCoord,
    pub radius: i32,
    #[serde(default)]
    pub bias: RegionBias,
}

impl RegionOverride {
    pub fn contains(&self, coord: AxialCoord) -> bool {
        self.center.distance(coord) <= self.radius
    }
}

// =============================================================================
// WORLD GEN CONFIG
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// Normalized elevation of the water line
    pub sea_level: f32,
    pub layout: LayoutConfig,
    pub relief: ReliefConfig,
    pub climate: ClimateConfig,
    pub noise: NoiseConfig,
    /// Checked in order; the first region containing a tile wins
    pub regions: Vec<RegionOverride>,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            sea_level: 0.42,
            layout: LayoutConfig::default(),
            relief: ReliefConfig::default(),
            climate: ClimateConfig::default(),
            noise: NoiseConfig::default(),
            regions: Vec::new(),
        }
    }
}

impl WorldGenConfig {
    /// Island-heavy world: higher sea, smaller landmasses.
    pub fn archipelago() -> Self {
        Self {
            sea_level: 0.55,
            noise: NoiseConfig {
                macro_frequency: 0.06,
                ..NoiseConfig::default()
            },
            ..Self::default()
        }
    }

    /// Rugged world with a mountainous core region.
    pub fn highlands() -> Self {
        Self {
            sea_level: 0.3,
            relief: ReliefConfig {
                exponent: 0.9,
                elevation_gain: 0.25,
                ..ReliefConfig::default()
            },
            regions: vec![RegionOverride {
                name: "spine".to_string(),
                center: AxialCoord::ORIGIN,
                radius: 6,
                bias: RegionBias {
                    relief_multiplier: 1.4,
                    relief_bias: 0.1,
                    temperature_bias: -0.1,
                    ..RegionBias::default()
                },
            }],
            ..Self::default()
        }
    }

    /// Bias for the tile at `coord`: the first matching region, or neutral.
    pub fn region_bias(&self, coord: AxialCoord) -> RegionBias {
        self.regions
            .iter()
            .find(|region| region.contains(coord))
            .map(|region| region.bias.clone())
            .unwrap_or_default()
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: WorldGenConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::debug!("loaded world config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.sea_level) {
            return Err(ConfigError::Invalid(format!(
                "sea_level must be within [0, 1], got {}",
                self.sea_level
            )));
        }
        if !(self.layout.hex_size.is_finite() && self.layout.hex_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "layout.hex_size must be positive, got {}",
                self.layout.hex_size
            )));
        }
        if !(self.layout.spacing_factor.is_finite() && self.layout.spacing_factor > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "layout.spacing_factor must be positive, got {}",
                self.layout.spacing_factor
            )));
        }
        if self.layout.layout_radius < 0 {
            return Err(ConfigError::Invalid(format!(
                "layout.layout_radius must not be negative, got {}",
                self.layout.layout_radius
            )));
        }
        if !(self.climate.coast_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "climate.coast_width must be positive, got {}",
                self.climate.coast_width
            )));
        }
        if self.noise.macro_octaves == 0 || self.noise.macro_octaves > 12 {
            return Err(ConfigError::Invalid(format!(
                "noise.macro_octaves must be within 1..=12, got {}",
                self.noise.macro_octaves
            )));
        }
        for region in &self.regions {
            if region.radius < 0 {
                return Err(ConfigError::Invalid(format!(
                    "region '{}' has a negative radius",
                    region.name
                )));
            }
        }
        if self.relief.exponent < MIN_RELIEF_EXPONENT {
            log::warn!(
                "relief.exponent {} is below {}, it will be raised",
                self.relief.exponent,
                MIN_RELIEF_EXPONENT
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        WorldGenConfig::default().validate().unwrap();
        WorldGenConfig::archipelago().validate().unwrap();
        WorldGenConfig::highlands().validate().unwrap();
    }

    #[test]
    fn test_default_relief_weights() {
        let w = ReliefWeights::default();
        assert_eq!((w.plate_edge, w.medium_detail, w.macro_slope, w.ridge), (0.42, 0.28, 0.2, 0.1));
        assert_eq!(ReliefConfig::default().exponent, 1.15);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = WorldGenConfig::from_json_str(r#"{ "sea_level": 0.5, "layout": { "layout_radius": 3 } }"#).unwrap();
        assert_eq!(config.sea_level, 0.5);
        assert_eq!(config.layout.layout_radius, 3);
        assert_eq!(config.layout.hex_size, 1.0);
        assert_eq!(config.relief, ReliefConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = WorldGenConfig::from_json_str(r#"{ "sea_level": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = WorldGenConfig::from_json_str(r#"{ "layout": { "hex_size": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = WorldGenConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_region_bias_lookup() {
        let config = WorldGenConfig::highlands();
        let inside = config.region_bias(AxialCoord::new(2, -1));
        assert_eq!(inside.relief_multiplier, 1.4);

        let outside = config.region_bias(AxialCoord::new(20, 0));
        assert_eq!(outside, RegionBias::default());
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.json");

        let config = WorldGenConfig::highlands();
        config.to_json_file(&path).unwrap();
        let loaded = WorldGenConfig::from_json_file(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = WorldGenConfig::from_json_file("/nonexistent/world.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
