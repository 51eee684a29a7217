//! ASCII rendering for hex worlds
//!
//! Flat-top hexes are laid out in doubled-row coordinates
//! (`row = 2r + q`, `col = q`), so neighboring columns interleave half a row
//! apart and the printed map keeps the hex shape.

use std::fmt::Write;

use crate::biome::Biome;
use crate::hex::AxialCoord;
use crate::tile::Tile;
use crate::world::HexWorld;

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AsciiMode {
    /// Show biome characters
    #[default]
    Biome,
    /// Show elevation gradient
    Height,
    /// Show temperature gradient
    Temperature,
    /// Show moisture gradient
    Moisture,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Biome => "Biome",
            AsciiMode::Height => "Height",
            AsciiMode::Temperature => "Temperature",
            AsciiMode::Moisture => "Moisture",
        }
    }

    pub fn all() -> &'static [AsciiMode] {
        &[
            AsciiMode::Biome,
            AsciiMode::Height,
            AsciiMode::Temperature,
            AsciiMode::Moisture,
        ]
    }
}

impl std::str::FromStr for AsciiMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AsciiMode::all()
            .iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown ascii mode '{}'", s))
    }
}

/// Get ASCII character for a biome
pub fn biome_char(biome: Biome) -> char {
    match biome {
        Biome::DeepWater => '~',
        Biome::ShallowWater => '.',
        Biome::Beach => ':',
        Biome::Plains => '"',
        Biome::Forest => 'T',
        Biome::Hill => 'n',
        Biome::Mountain => '^',
        Biome::Snow => 'A',
        Biome::Tundra => ',',
    }
}

/// Gradient character for a normalized value.
fn gradient_char(value: f32, chars: &[char]) -> char {
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    let idx = (v * (chars.len() - 1) as f32) as usize;
    chars[idx.min(chars.len() - 1)]
}

pub fn height_char(elevation: f32) -> char {
    gradient_char(elevation, &['~', '.', '-', '=', '+', '*', '#', '%', '^', 'A', 'M'])
}

pub fn temperature_char(temperature: f32) -> char {
    gradient_char(temperature, &['#', '=', '-', '.', ',', ';', ':', '+', '*', '@'])
}

pub fn moisture_char(moisture: f32) -> char {
    gradient_char(moisture, &['_', '.', '-', ':', ';', '=', '+', '#', '%', '~'])
}

pub fn tile_char(tile: &Tile, mode: AsciiMode) -> char {
    match mode {
        AsciiMode::Biome => biome_char(tile.biome),
        AsciiMode::Height => height_char(tile.elevation),
        AsciiMode::Temperature => temperature_char(tile.climate.temperature),
        AsciiMode::Moisture => moisture_char(tile.climate.moisture),
    }
}

/// Render a world to an ASCII string, one line per doubled row.
pub fn render_ascii_map(world: &HexWorld, mode: AsciiMode) -> String {
    let radius = world.radius();
    let width = (2 * radius + 1) as usize;
    let mut result = String::with_capacity((2 * width + 1) * (4 * radius + 1) as usize);

    for row in -2 * radius..=2 * radius {
        let mut line = String::with_capacity(2 * width);
        for q in -radius..=radius {
            let ch = if (row - q).rem_euclid(2) == 0 {
                world
                    .tile(AxialCoord::new(q, (row - q) / 2))
                    .map_or(' ', |tile| tile_char(tile, mode))
            } else {
                ' '
            };
            line.push(ch);
            line.push(' ');
        }
        result.push_str(line.trim_end());
        result.push('\n');
    }

    result
}

pub fn render_ascii(world: &HexWorld) -> String {
    render_ascii_map(world, AsciiMode::Biome)
}

/// Generate legend for biome characters
pub fn biome_legend() -> String {
    let mut legend = String::from("=== BIOME LEGEND ===\n");
    for biome in Biome::all() {
        let _ = writeln!(legend, "  {} {}", biome_char(*biome), biome);
    }
    legend
}

/// Per-biome tile counts with percentages, most common first.
pub fn biome_summary(world: &HexWorld) -> String {
    let mut counts: Vec<(Biome, usize)> = world.biome_counts().into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let total = world.len().max(1) as f32;
    let mut summary = String::new();
    for (biome, count) in counts {
        let _ = writeln!(
            summary,
            "  {} {:<13} {:>6} ({:5.1}%)",
            biome_char(biome),
            biome.name(),
            count,
            100.0 * count as f32 / total
        );
    }
    summary
}
