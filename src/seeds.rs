//! Seed management for world generation
//!
//! Provides separate seeds for each noise layer plus per-tile seeds, all
//! derived from one 32-bit master seed with integer mixing only. Nothing here
//! depends on `std`'s hasher, whose output is not guaranteed across releases.

use crate::hex::AxialCoord;

const FNV_OFFSET: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Seeds for all world generation layers.
///
/// Each layer gets its own seed, derived from the master seed by default.
/// Individual seeds can be overridden for experimentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldSeeds {
    /// Master seed (also drives per-tile seeds)
    pub master: u32,
    /// Continental shape and macro elevation
    pub macro_terrain: u32,
    /// Plate boundary bands
    pub plates: u32,
    /// Medium-frequency detail noise
    pub detail: u32,
    /// Ridge noise
    pub ridges: u32,
}

impl WorldSeeds {
    /// Create seeds from a master seed, deriving all layer seeds deterministically.
    pub fn from_master(master: u32) -> Self {
        Self {
            master,
            macro_terrain: derive_seed(master, "macro_terrain"),
            plates: derive_seed(master, "plates"),
            detail: derive_seed(master, "detail"),
            ridges: derive_seed(master, "ridges"),
        }
    }

    /// Seeds from a text seed such as `"seed-test"`.
    pub fn from_text(text: &str) -> Self {
        Self::from_master(hash_str(text))
    }

    /// Seeds from a 64-bit integer (folded to 32 bits).
    pub fn from_u64(seed: u64) -> Self {
        Self::from_master(fmix32((seed as u32) ^ fmix32((seed >> 32) as u32)))
    }

    /// Create a builder for customizing individual seeds
    pub fn builder(master: u32) -> WorldSeedsBuilder {
        WorldSeedsBuilder::new(master)
    }

    /// Seed of the RNG stream owned by one tile.
    pub fn tile_seed(&self, coord: AxialCoord) -> u32 {
        let mut h = self.master ^ 0x9E37_79B9;
        h = fmix32(h ^ (coord.q as u32).wrapping_mul(0x85EB_CA6B));
        h = fmix32(h ^ (coord.r as u32).wrapping_mul(0xC2B2_AE35));
        h
    }
}

/// Builder for customizing individual seeds while deriving others from master
pub struct WorldSeedsBuilder {
    seeds: WorldSeeds,
}

impl WorldSeedsBuilder {
    pub fn new(master: u32) -> Self {
        Self {
            seeds: WorldSeeds::from_master(master),
        }
    }

    pub fn macro_terrain(mut self, seed: u32) -> Self {
        self.seeds.macro_terrain = seed;
        self
    }

    pub fn plates(mut self, seed: u32) -> Self {
        self.seeds.plates = seed;
        self
    }

    pub fn detail(mut self, seed: u32) -> Self {
        self.seeds.detail = seed;
        self
    }

    pub fn ridges(mut self, seed: u32) -> Self {
        self.seeds.ridges = seed;
        self
    }

    pub fn build(self) -> WorldSeeds {
        self.seeds
    }
}

/// Stable 32-bit hash of a string (FNV-1a with a murmur finalizer).
pub fn hash_str(text: &str) -> u32 {
    let mut h = FNV_OFFSET;
    for byte in text.bytes() {
        h ^= byte as u32;
        h = h.wrapping_mul(FNV_PRIME);
    }
    fmix32(h)
}

/// Derive a layer seed from the master seed and a layer name.
fn derive_seed(master: u32, system: &str) -> u32 {
    fmix32(master ^ hash_str(system).rotate_left(13))
}

/// Murmur3 finalizer.
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 13;
    h = h.wrapping_mul(0xC2B2_AE35);
    h ^= h >> 16;
    h
}

impl std::fmt::Display for WorldSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WorldSeeds {{ master: {}, macro_terrain: {}, plates: {}, detail: {}, ridges: {} }}",
            self.master, self.macro_terrain, self.plates, self.detail, self.ridges,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_derivation() {
        let seeds1 = WorldSeeds::from_master(12345);
        let seeds2 = WorldSeeds::from_master(12345);
        assert_eq!(seeds1, seeds2);
        assert_eq!(WorldSeeds::from_text("seed-test"), WorldSeeds::from_text("seed-test"));
    }

    #[test]
    fn test_different_layers_get_different_seeds() {
        let seeds = WorldSeeds::from_master(12345);
        assert_ne!(seeds.macro_terrain, seeds.plates);
        assert_ne!(seeds.plates, seeds.detail);
        assert_ne!(seeds.detail, seeds.ridges);
    }

    #[test]
    fn test_hash_str_is_stable() {
        // FNV-1a of the empty string is the offset basis
        assert_eq!(hash_str(""), fmix32(FNV_OFFSET));
        assert_ne!(hash_str("seed-a"), hash_str("seed-b"));
    }

    #[test]
    fn test_tile_seeds_vary_by_coordinate() {
        let seeds = WorldSeeds::from_text("tiles");
        let a = seeds.tile_seed(AxialCoord::new(1, 2));
        let b = seeds.tile_seed(AxialCoord::new(2, 1));
        let c = seeds.tile_seed(AxialCoord::new(1, 2));
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_builder_override() {
        let seeds = WorldSeeds::builder(12345).detail(99999).build();
        assert_eq!(seeds.detail, 99999);

        let default_seeds = WorldSeeds::from_master(12345);
        assert_eq!(seeds.macro_terrain, default_seeds.macro_terrain);
        assert_eq!(seeds.ridges, default_seeds.ridges);
    }
}
