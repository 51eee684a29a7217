//! Hex world generation library
//!
//! Coordinate math, grids, deterministic RNG, derived terrain fields, biome
//! classification, pathfinding and spatial queries for hex-tile worlds.
//! Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod biome;
pub mod config;
pub mod derived;
pub mod export;
pub mod fields;
pub mod grid;
pub mod hex;
pub mod nav;
pub mod quadtree;
pub mod rng;
pub mod seeds;
pub mod tile;
pub mod world;

pub use biome::{map_biome, Biome, BiomePalette};
pub use config::WorldGenConfig;
pub use grid::{Grid, GridCell, HexGrid, SquareGrid, WorldPos};
pub use hex::AxialCoord;
pub use nav::Nav;
pub use seeds::WorldSeeds;
pub use tile::{generate_tile, Tile};
pub use world::HexWorld;
