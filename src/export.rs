//! Tile hand-off and image export
//!
//! JSON render records for the mesh builder, plus PNG rasters of the world
//! sampled through the inverse hex projection.

use std::fs;
use std::io;
use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use serde::Serialize;
use thiserror::Error;

use crate::biome::Biome;
use crate::tile::Tile;
use crate::world::HexWorld;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Color of pixels that fall outside every tile.
const BACKGROUND: [u8; 3] = [16, 16, 24];

/// What the renderer needs per tile.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTile {
    pub q: i32,
    pub r: i32,
    pub biome: Biome,
    pub top: u32,
    pub side: u32,
    pub y_scale: f32,
    pub variant: i32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<&Tile> for RenderTile {
    fn from(tile: &Tile) -> Self {
        Self {
            q: tile.coord.q,
            r: tile.coord.r,
            biome: tile.biome,
            top: tile.palette.top,
            side: tile.palette.side,
            y_scale: tile.palette.y_scale,
            variant: tile.variant,
            x: tile.position.x,
            y: tile.position.y,
            z: tile.position.z,
        }
    }
}

pub fn render_tiles(world: &HexWorld) -> Vec<RenderTile> {
    world.tiles().iter().map(RenderTile::from).collect()
}

/// Render records as a pretty-printed JSON array, in spiral order.
pub fn tiles_to_json(world: &HexWorld) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&render_tiles(world))?)
}

pub fn export_tiles_json<P: AsRef<Path>>(world: &HexWorld, path: P) -> Result<(), ExportError> {
    let json = tiles_to_json(world)?;
    fs::write(path.as_ref(), json)?;
    log::info!("wrote {} tiles to {}", world.len(), path.as_ref().display());
    Ok(())
}

// =============================================================================
// PNG EXPORT
// =============================================================================

/// Rasterize the world top-down with each tile's biome top color.
/// `pixels_per_unit` is the number of pixels per world unit.
pub fn render_biome_image(world: &HexWorld, pixels_per_unit: f64) -> RgbImage {
    render_world_image(world, pixels_per_unit, |tile| rgb(tile.palette.top))
}

/// Rasterize the world elevation with a spectral colormap.
pub fn render_elevation_image(world: &HexWorld, pixels_per_unit: f64) -> RgbImage {
    render_world_image(world, pixels_per_unit, |tile| spectral_colormap(tile.elevation))
}

pub fn export_biome_png<P: AsRef<Path>>(
    world: &HexWorld,
    path: P,
    pixels_per_unit: f64,
) -> Result<(), ExportError> {
    let img = render_biome_image(world, pixels_per_unit);
    img.save(path.as_ref())?;
    log::info!("wrote {}x{} biome map to {}", img.width(), img.height(), path.as_ref().display());
    Ok(())
}

pub fn export_elevation_png<P: AsRef<Path>>(
    world: &HexWorld,
    path: P,
    pixels_per_unit: f64,
) -> Result<(), ExportError> {
    let img = render_elevation_image(world, pixels_per_unit);
    img.save(path.as_ref())?;
    log::info!("wrote {}x{} elevation map to {}", img.width(), img.height(), path.as_ref().display());
    Ok(())
}

fn render_world_image(
    world: &HexWorld,
    pixels_per_unit: f64,
    color: impl Fn(&Tile) -> [u8; 3],
) -> RgbImage {
    let scale = if pixels_per_unit > 0.0 { pixels_per_unit } else { 1.0 };
    let bounds = world.bounds();
    let min_x = bounds.x - bounds.w;
    let min_z = bounds.y - bounds.h;
    let width = ((bounds.w * 2.0 * scale).ceil() as u32).max(1);
    let height = ((bounds.h * 2.0 * scale).ceil() as u32).max(1);

    let mut img: RgbImage = ImageBuffer::new(width, height);
    for py in 0..height {
        for px in 0..width {
            // Sample at the pixel center
            let x = min_x + (px as f64 + 0.5) / scale;
            let z = min_z + (py as f64 + 0.5) / scale;
            let c = world.tile_at_world(x, z).map_or(BACKGROUND, &color);
            img.put_pixel(px, py, Rgb(c));
        }
    }
    img
}

fn rgb(hex: u32) -> [u8; 3] {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
}

/// Spectral colormap (matplotlib style): dark blue -> cyan -> green -> yellow -> orange -> red
fn spectral_colormap(t: f32) -> [u8; 3] {
    let colors: [[f32; 3]; 11] = [
        [0.37, 0.31, 0.64],
        [0.20, 0.53, 0.74],
        [0.40, 0.76, 0.65],
        [0.67, 0.87, 0.64],
        [0.90, 0.96, 0.60],
        [1.00, 1.00, 0.75],
        [1.00, 0.88, 0.55],
        [0.99, 0.68, 0.38],
        [0.96, 0.43, 0.26],
        [0.84, 0.24, 0.31],
        [0.62, 0.00, 0.26],
    ];

    let t_scaled = t.clamp(0.0, 1.0) * 10.0;
    let idx = (t_scaled as usize).min(9);
    let frac = t_scaled - idx as f32;
    let (c1, c2) = (colors[idx], colors[idx + 1]);
    let lerp = |i: usize| ((c1[i] + (c2[i] - c1[i]) * frac) * 255.0) as u8;
    [lerp(0), lerp(1), lerp(2)]
}
