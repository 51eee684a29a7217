//! Biome classification and render palettes
//!
//! [`map_biome`] is a total function of `(elevation, slope, latitude)`: any
//! input, including NaN, yields exactly one biome.

use serde::{Deserialize, Serialize};

use crate::derived::clamp01;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Biome {
    DeepWater,
    ShallowWater,
    Beach,
    #[default]
    Plains,
    Forest,
    Hill,
    Mountain,
    Snow,
    Tundra,
}

/// Render hints handed to the mesh builder.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiomePalette {
    /// Top face color, 0xRRGGBB
    pub top: u32,
    /// Side face color, 0xRRGGBB
    pub side: u32,
    pub y_scale: f32,
}

impl Biome {
    pub fn all() -> &'static [Biome] {
        &[
            Biome::DeepWater,
            Biome::ShallowWater,
            Biome::Beach,
            Biome::Plains,
            Biome::Forest,
            Biome::Hill,
            Biome::Mountain,
            Biome::Snow,
            Biome::Tundra,
        ]
    }

    pub fn palette(&self) -> BiomePalette {
        let (top, side, y_scale) = match self {
            Biome::DeepWater => (0x1B3B6F, 0x142C54, 0.2),
            Biome::ShallowWater => (0x2F6FA8, 0x24578A, 0.3),
            Biome::Beach => (0xE3D39A, 0xB8A873, 0.45),
            Biome::Plains => (0x7BB661, 0x5E8A47, 0.6),
            Biome::Forest => (0x3E7D3A, 0x2F5E2B, 0.8),
            Biome::Hill => (0x8C9A5B, 0x6B7545, 1.1),
            Biome::Mountain => (0x8A8580, 0x67625E, 1.6),
            Biome::Snow => (0xF2F4F7, 0xC9CED6, 1.8),
            Biome::Tundra => (0xA7B3A0, 0x7E8878, 0.7),
        };
        BiomePalette { top, side, y_scale }
    }

    pub fn is_water(&self) -> bool {
        matches!(self, Biome::DeepWater | Biome::ShallowWater)
    }

    /// Tiles that block sight lines.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Biome::Mountain | Biome::Snow)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Biome::DeepWater => "deepWater",
            Biome::ShallowWater => "shallowWater",
            Biome::Beach => "beach",
            Biome::Plains => "plains",
            Biome::Forest => "forest",
            Biome::Hill => "hill",
            Biome::Mountain => "mountain",
            Biome::Snow => "snow",
            Biome::Tundra => "tundra",
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Biome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Biome::all()
            .iter()
            .find(|b| b.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown biome '{}'", s))
    }
}

/// Palette for a biome name; unknown names get the default biome's palette.
pub fn palette_for_name(name: &str) -> BiomePalette {
    name.parse::<Biome>().unwrap_or_default().palette()
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

pub const MOUNTAIN_THRESHOLD: f32 = 0.9;
pub const HILL_THRESHOLD: f32 = 0.75;
pub const FOREST_THRESHOLD: f32 = 0.60;
pub const MOUNTAIN_SLOPE: f32 = 0.35;
pub const HILL_SLOPE: f32 = 0.18;
pub const SNOW_ELEVATION: f32 = 0.88;
pub const SNOW_LATITUDE: f32 = 0.7;

/// Water and shore cut-offs for a given sea level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeThresholds {
    pub sea_level: f32,
    pub deep_water: f32,
    pub beach: f32,
}

impl BiomeThresholds {
    pub fn new(sea_level: f32) -> Self {
        let sea_level = clamp01(sea_level);
        Self {
            sea_level,
            deep_water: (sea_level * 0.25).max(0.01),
            beach: (sea_level + 0.06).min(0.95),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeSample {
    pub biome: Biome,
    pub palette: BiomePalette,
}

/// Classify a tile. `lat` is signed (-1 and 1 are the poles); `None` and NaN
/// read as the equator.
pub fn map_biome(h: f32, slope: f32, lat: Option<f32>, thresholds: &BiomeThresholds) -> BiomeSample {
    let biome = classify(h, slope, lat, thresholds);
    BiomeSample { biome, palette: biome.palette() }
}

pub fn classify(h: f32, slope: f32, lat: Option<f32>, thresholds: &BiomeThresholds) -> Biome {
    let h = clamp01(h);
    let slope = if slope.is_nan() { 0.0 } else { slope.max(0.0) };
    let lat = lat.filter(|l| !l.is_nan()).unwrap_or(0.0);

    if h <= thresholds.deep_water {
        Biome::DeepWater
    } else if h <= thresholds.sea_level {
        Biome::ShallowWater
    } else if h <= thresholds.beach {
        Biome::Beach
    } else if h >= MOUNTAIN_THRESHOLD || slope > MOUNTAIN_SLOPE {
        if h > SNOW_ELEVATION || lat.abs() > SNOW_LATITUDE {
            Biome::Snow
        } else {
            Biome::Mountain
        }
    } else if h >= HILL_THRESHOLD || slope > HILL_SLOPE {
        Biome::Hill
    } else if h >= FOREST_THRESHOLD {
        Biome::Forest
    } else {
        Biome::Plains
    }
}
