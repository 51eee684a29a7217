//! World data container module
//!
//! A [`HexWorld`] is a hex-shaped patch of tiles around the origin, generated
//! in parallel and indexed by axial coordinate. It also hands out the
//! navigation, line-of-sight and spatial-query views over those tiles.

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;

use crate::biome::Biome;
use crate::config::WorldGenConfig;
use crate::grid::{Grid, GridCell, HexGrid, WorldPos};
use crate::hex::AxialCoord;
use crate::nav::{Nav, NavBounds};
use crate::quadtree::{Point, QuadTree, Rectangle};
use crate::seeds::WorldSeeds;
use crate::tile::{Tile, TileGenerator};

/// Leaf capacity of the tile quadtree.
const SPATIAL_CAPACITY: usize = 8;

/// All generated tiles bundled together
pub struct HexWorld {
    pub config: WorldGenConfig,
    /// Seeds used for generation (allows recreation)
    pub seeds: WorldSeeds,
    /// Tiles in spiral order from the origin
    tiles: Vec<Tile>,
    index: HashMap<AxialCoord, usize>,
}

impl HexWorld {
    /// Generate every tile within `config.layout.layout_radius` of the origin.
    pub fn generate(config: &WorldGenConfig, seeds: WorldSeeds) -> Self {
        let radius = config.layout.layout_radius.max(0);
        let grid = HexGrid::flat_top(config.layout.hex_size);
        let coords: Vec<AxialCoord> = grid
            .spiral(GridCell::new(0, 0), radius)
            .into_iter()
            .map(AxialCoord::from)
            .collect();
        log::debug!("generating {} tiles (radius {}) with {}", coords.len(), radius, seeds);

        let generator = TileGenerator::new(config, seeds);
        let tiles: Vec<Tile> = coords
            .par_iter()
            .map(|&coord| generator.generate(coord))
            .collect();

        let index = tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| (tile.coord, i))
            .collect();

        let world = Self {
            config: config.clone(),
            seeds,
            tiles,
            index,
        };
        log::info!(
            "generated world: {} tiles, {:.1}% water",
            world.tiles.len(),
            world.water_fraction() * 100.0
        );
        world
    }

    /// Convenience accessor for master seed
    pub fn seed(&self) -> u32 {
        self.seeds.master
    }

    pub fn radius(&self) -> i32 {
        self.config.layout.layout_radius.max(0)
    }

    pub fn tile(&self, coord: AxialCoord) -> Option<&Tile> {
        self.index.get(&coord).map(|&i| &self.tiles[i])
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile count per biome, in biome order.
    pub fn biome_counts(&self) -> BTreeMap<Biome, usize> {
        let mut counts = BTreeMap::new();
        for tile in &self.tiles {
            *counts.entry(tile.biome).or_insert(0) += 1;
        }
        counts
    }

    pub fn water_fraction(&self) -> f32 {
        if self.tiles.is_empty() {
            return 0.0;
        }
        let water = self.tiles.iter().filter(|t| t.is_water()).count();
        water as f32 / self.tiles.len() as f32
    }

    /// Check if a tile is coastal (land adjacent to water)
    pub fn is_coastal(&self, coord: AxialCoord) -> bool {
        match self.tile(coord) {
            Some(tile) if !tile.is_water() => coord
                .neighbors()
                .iter()
                .filter_map(|&n| self.tile(n))
                .any(|n| n.is_water()),
            _ => false,
        }
    }

    /// Flat-top hex grid whose cell centers are the tile positions, so the
    /// spacing factor is folded into the cell size.
    pub fn grid(&self) -> Grid {
        let layout = &self.config.layout;
        Grid::Hex(HexGrid::flat_top(layout.hex_size * layout.spacing_factor))
    }

    /// Walkable view of the world: water is blocked and the search never
    /// leaves the generated disc.
    pub fn nav(&self) -> Nav {
        let bounds = NavBounds::HexRadius {
            center: AxialCoord::ORIGIN,
            radius: self.radius(),
        };
        let mut nav = Nav::new(self.grid()).with_bounds(bounds);
        for tile in self.tiles.iter().filter(|t| t.is_water()) {
            nav.set_blocker(tile.coord.into(), true);
        }
        nav
    }

    /// Whether `b` is visible from `a`. Elevated tiles strictly between the
    /// two block the line; the endpoints themselves never do.
    pub fn line_of_sight(&self, a: AxialCoord, b: AxialCoord) -> bool {
        let line = self.grid().raycast_tile_line(a.into(), b.into());
        if line.len() <= 2 {
            return true;
        }
        line[1..line.len() - 1].iter().all(|&cell| {
            self.tile(cell.into())
                .map_or(true, |tile| !tile.biome.is_elevated())
        })
    }

    /// World-space XZ rectangle enclosing every tile position.
    pub fn bounds(&self) -> Rectangle {
        let mut min_x = f64::MAX;
        let mut min_z = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_z = f64::MIN;
        for tile in &self.tiles {
            min_x = min_x.min(tile.position.x);
            min_z = min_z.min(tile.position.z);
            max_x = max_x.max(tile.position.x);
            max_z = max_z.max(tile.position.z);
        }
        if self.tiles.is_empty() {
            return Rectangle::new(0.0, 0.0, 0.0, 0.0);
        }
        // Half-open containment would drop tiles on the max edges
        let pad = self.config.layout.hex_size.max(f64::EPSILON);
        Rectangle::from_bounds(min_x - pad, min_z - pad, max_x + pad, max_z + pad)
    }

    /// Quadtree over tile world positions (x, z), carrying the tile coord.
    pub fn spatial_index(&self) -> QuadTree<AxialCoord> {
        let mut tree = QuadTree::new(self.bounds(), SPATIAL_CAPACITY);
        for tile in &self.tiles {
            let inserted = tree.insert(Point::new(tile.position.x, tile.position.z, tile.coord));
            if !inserted {
                log::warn!("tile {} fell outside the world bounds", tile.coord);
            }
        }
        tree
    }

    /// Tiles whose world position lies inside `rect`.
    pub fn tiles_in_rect(&self, rect: &Rectangle) -> Vec<&Tile> {
        let tree = self.spatial_index();
        let mut tiles: Vec<&Tile> = tree
            .query_vec(rect)
            .into_iter()
            .filter_map(|p| self.tile(p.data))
            .collect();
        tiles.sort_by_key(|t| self.index[&t.coord]);
        tiles
    }

    /// Tile under a world-space XZ position, if it is part of the world.
    pub fn tile_at_world(&self, x: f64, z: f64) -> Option<&Tile> {
        let cell = self.grid().to_coord(WorldPos::new(x, 0.0, z));
        self.tile(cell.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::hex;

    fn small_config(radius: i32) -> WorldGenConfig {
        WorldGenConfig {
            layout: LayoutConfig {
                layout_radius: radius,
                ..LayoutConfig::default()
            },
            ..WorldGenConfig::default()
        }
    }

    #[test]
    fn test_world_tile_count() {
        let world = HexWorld::generate(&small_config(5), WorldSeeds::from_master(3));
        assert_eq!(world.len(), hex::hex_disc_size(5));
        assert_eq!(world.tiles()[0].coord, AxialCoord::ORIGIN);
        assert!(world.tile(AxialCoord::new(5, -5)).is_some());
        assert!(world.tile(AxialCoord::new(6, 0)).is_none());
    }

    #[test]
    fn test_biome_counts_sum() {
        let world = HexWorld::generate(&small_config(6), WorldSeeds::from_text("counts"));
        let total: usize = world.biome_counts().values().sum();
        assert_eq!(total, world.len());
    }

    #[test]
    fn test_nav_blocks_water() {
        let world = HexWorld::generate(&small_config(6), WorldSeeds::from_text("nav"));
        let nav = world.nav();
        for tile in world.tiles() {
            assert_eq!(nav.is_blocked(tile.coord.into()), tile.is_water());
        }
        assert!(!nav.is_walkable(GridCell::new(7, 0)));
    }

    #[test]
    fn test_line_of_sight_adjacent() {
        let world = HexWorld::generate(&small_config(3), WorldSeeds::from_master(11));
        assert!(world.line_of_sight(AxialCoord::ORIGIN, AxialCoord::ORIGIN));
        assert!(world.line_of_sight(AxialCoord::ORIGIN, AxialCoord::new(1, 0)));
    }

    #[test]
    fn test_elevated_tile_blocks_sight() {
        let mut world = HexWorld::generate(&small_config(3), WorldSeeds::from_master(11));
        let set_biome = |world: &mut HexWorld, coord: AxialCoord, biome: Biome| {
            let i = world.index[&coord];
            world.tiles[i].biome = biome;
        };
        for coord in [AxialCoord::ORIGIN, AxialCoord::new(2, 0), AxialCoord::new(0, 2)] {
            set_biome(&mut world, coord, Biome::Plains);
        }
        set_biome(&mut world, AxialCoord::new(1, 0), Biome::Mountain);
        set_biome(&mut world, AxialCoord::new(0, 1), Biome::Snow);

        assert!(!world.line_of_sight(AxialCoord::ORIGIN, AxialCoord::new(2, 0)));
        assert!(!world.line_of_sight(AxialCoord::new(2, 0), AxialCoord::ORIGIN));
        assert!(!world.line_of_sight(AxialCoord::ORIGIN, AxialCoord::new(0, 2)));
        // Ending on the peak is fine
        assert!(world.line_of_sight(AxialCoord::ORIGIN, AxialCoord::new(1, 0)));
        assert!(world.line_of_sight(AxialCoord::new(0, 2), AxialCoord::new(0, 1)));

        set_biome(&mut world, AxialCoord::new(1, 0), Biome::Plains);
        assert!(world.line_of_sight(AxialCoord::ORIGIN, AxialCoord::new(2, 0)));
    }

    #[test]
    fn test_spatial_index_holds_every_tile() {
        let world = HexWorld::generate(&small_config(6), WorldSeeds::from_master(8));
        let tree = world.spatial_index();
        assert_eq!(tree.len(), world.len());
        assert_eq!(world.tiles_in_rect(&world.bounds()).len(), world.len());
    }

    #[test]
    fn test_tiles_in_rect_matches_scan() {
        let world = HexWorld::generate(&small_config(6), WorldSeeds::from_master(8));
        let rect = Rectangle::new(1.0, -2.0, 4.0, 3.0);
        let found: Vec<AxialCoord> = world.tiles_in_rect(&rect).iter().map(|t| t.coord).collect();
        let expected: Vec<AxialCoord> = world
            .tiles()
            .iter()
            .filter(|t| rect.contains_xy(t.position.x, t.position.z))
            .map(|t| t.coord)
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_tile_at_world() {
        let world = HexWorld::generate(&small_config(4), WorldSeeds::from_master(2));
        let tile = &world.tiles()[10];
        let found = world.tile_at_world(tile.position.x, tile.position.z).unwrap();
        assert_eq!(found.coord, tile.coord);
    }

    #[test]
    fn test_grid_matches_tile_positions() {
        let mut config = small_config(4);
        config.layout.spacing_factor = 2.0;
        let world = HexWorld::generate(&config, WorldSeeds::from_master(2));
        let grid = world.grid();
        for tile in world.tiles() {
            let pos = grid.to_world(tile.coord.into());
            assert!((pos.x - tile.position.x).abs() < 1e-9);
            assert!((pos.z - tile.position.z).abs() < 1e-9);
            let found = world.tile_at_world(tile.position.x, tile.position.z).unwrap();
            assert_eq!(found.coord, tile.coord);
        }
    }
}
