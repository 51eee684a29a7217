//! Grid abstraction over square and hex tilings
//!
//! A closed set of grid variants dispatched by pattern match. Cells are
//! plain integer pairs: square grids read them as `(x, y)`, hex grids as
//! axial `(q = x, r = y)`.

use serde::{Deserialize, Serialize};

use crate::hex::{self, AxialCoord, FractionalAxial, HEX_DIRECTIONS};

/// Integer identity of a tile under a particular grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<AxialCoord> for GridCell {
    fn from(c: AxialCoord) -> Self {
        GridCell::new(c.q, c.r)
    }
}

impl From<GridCell> for AxialCoord {
    fn from(c: GridCell) -> Self {
        AxialCoord::new(c.x, c.y)
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// World-space position. `y` is up; tiles lie on the XZ plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldPos {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

// =============================================================================
// SQUARE GRID
// =============================================================================

/// Square tiling with 4-neighbor adjacency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SquareGrid {
    pub size: f64,
}

const SQUARE_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

impl SquareGrid {
    pub fn new(size: f64) -> Self {
        Self { size }
    }

    pub fn to_world(&self, cell: GridCell) -> WorldPos {
        WorldPos::new(cell.x as f64 * self.size, 0.0, cell.y as f64 * self.size)
    }

    pub fn to_coord(&self, pos: WorldPos) -> GridCell {
        if self.size == 0.0 {
            return GridCell::default();
        }
        GridCell::new(
            (pos.x / self.size).round() as i32,
            (pos.z / self.size).round() as i32,
        )
    }

    pub fn neighbors(&self, cell: GridCell) -> Vec<GridCell> {
        SQUARE_DIRECTIONS
            .iter()
            .map(|&(dx, dy)| GridCell::new(cell.x + dx, cell.y + dy))
            .collect()
    }

    /// Manhattan distance, the path length under 4-neighbor moves.
    pub fn distance(&self, a: GridCell, b: GridCell) -> i32 {
        (a.x - b.x).abs() + (a.y - b.y).abs()
    }

    /// Square perimeter at Chebyshev radius `radius`, clockwise from the
    /// top-left corner.
    pub fn ring(&self, center: GridCell, radius: i32) -> Vec<GridCell> {
        if radius <= 0 {
            return vec![center];
        }
        let side = 2 * radius;
        let mut cells = Vec::with_capacity(4 * side as usize);
        let left = center.x - radius;
        let right = center.x + radius;
        let top = center.y - radius;
        let bottom = center.y + radius;

        for i in 0..side {
            cells.push(GridCell::new(left + i, top));
        }
        for i in 0..side {
            cells.push(GridCell::new(right, top + i));
        }
        for i in 0..side {
            cells.push(GridCell::new(right - i, bottom));
        }
        for i in 0..side {
            cells.push(GridCell::new(left, bottom - i));
        }
        cells
    }

    pub fn spiral(&self, center: GridCell, radius: i32) -> Vec<GridCell> {
        (0..=radius.max(0))
            .flat_map(|k| self.ring(center, k))
            .collect()
    }

    /// 4-connected Bresenham walk from `a` to `b`, inclusive.
    ///
    /// Produces exactly `1 + dx + dy` cells; each step moves along one axis
    /// only, so consecutive cells always share an edge.
    pub fn raycast_tile_line(&self, a: GridCell, b: GridCell) -> Vec<GridCell> {
        let dx = (b.x - a.x).abs() as i64;
        let dy = (b.y - a.y).abs() as i64;
        let sx = if b.x >= a.x { 1 } else { -1 };
        let sy = if b.y >= a.y { 1 } else { -1 };

        let mut cells = Vec::with_capacity((1 + dx + dy) as usize);
        let mut current = a;
        cells.push(current);

        let (mut ix, mut iy) = (0i64, 0i64);
        while ix < dx || iy < dy {
            // Step along x while its next crossing comes first
            if (1 + 2 * ix) * dy < (1 + 2 * iy) * dx {
                current.x += sx;
                ix += 1;
            } else {
                current.y += sy;
                iy += 1;
            }
            cells.push(current);
        }
        cells
    }
}

// =============================================================================
// HEX GRID
// =============================================================================

/// Which way the hexes are rotated in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HexOrientation {
    /// Flat edge on top; `hex::axial_to_xz` as is.
    FlatTop,
    /// Pointed vertex on top; the flat-top projection with q/r and x/z
    /// transposed.
    #[default]
    PointyTop,
}

/// Hex tiling over axial coordinates with 6-neighbor adjacency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexGrid {
    pub size: f64,
    pub orientation: HexOrientation,
}

impl HexGrid {
    /// Pointy-top grid; `(1, 0)` lands on the world X axis at `sqrt(3) * size`.
    pub fn new(size: f64) -> Self {
        Self { size, orientation: HexOrientation::PointyTop }
    }

    /// Flat-top grid matching the world generator layout.
    pub fn flat_top(size: f64) -> Self {
        Self { size, orientation: HexOrientation::FlatTop }
    }

    pub fn to_world(&self, cell: GridCell) -> WorldPos {
        let (q, r) = (cell.x as f64, cell.y as f64);
        match self.orientation {
            HexOrientation::FlatTop => {
                let (x, z) = hex::axial_to_xz(q, r, self.size);
                WorldPos::new(x, 0.0, z)
            }
            HexOrientation::PointyTop => {
                let (z, x) = hex::axial_to_xz(r, q, self.size);
                WorldPos::new(x, 0.0, z)
            }
        }
    }

    pub fn to_fractional(&self, pos: WorldPos) -> FractionalAxial {
        match self.orientation {
            HexOrientation::FlatTop => hex::world_to_axial(pos.x, pos.z, self.size),
            HexOrientation::PointyTop => {
                let t = hex::world_to_axial(pos.z, pos.x, self.size);
                FractionalAxial::new(t.r, t.q)
            }
        }
    }

    pub fn to_coord(&self, pos: WorldPos) -> GridCell {
        self.to_fractional(pos).round().into()
    }

    pub fn neighbors(&self, cell: GridCell) -> Vec<GridCell> {
        let c = AxialCoord::from(cell);
        c.neighbors().iter().map(|&n| n.into()).collect()
    }

    pub fn distance(&self, a: GridCell, b: GridCell) -> i32 {
        hex::distance_axial(a.into(), b.into())
    }

    /// Hex ring at distance `radius`, starting at the southwest corner
    /// `center + direction[4] * radius`.
    pub fn ring(&self, center: GridCell, radius: i32) -> Vec<GridCell> {
        if radius <= 0 {
            return vec![center];
        }
        let mut cells = Vec::with_capacity(6 * radius as usize);
        let mut current = AxialCoord::from(center) + HEX_DIRECTIONS[4].scale(radius);
        for dir in HEX_DIRECTIONS {
            for _ in 0..radius {
                cells.push(current.into());
                current = current + dir;
            }
        }
        cells
    }

    pub fn spiral(&self, center: GridCell, radius: i32) -> Vec<GridCell> {
        (0..=radius.max(0))
            .flat_map(|k| self.ring(center, k))
            .collect()
    }

    /// Hex line from `a` to `b`: `N + 1` cube-rounded samples of the axial
    /// lerp, where `N` is the hex distance.
    pub fn raycast_tile_line(&self, a: GridCell, b: GridCell) -> Vec<GridCell> {
        let n = self.distance(a, b);
        if n == 0 {
            return vec![a];
        }
        // Tiny nudge so samples on a hex edge round consistently
        let start = FractionalAxial::new(a.x as f64 + 1e-6, a.y as f64 + 2e-6);
        let end = FractionalAxial::new(b.x as f64 + 1e-6, b.y as f64 + 2e-6);
        (0..=n)
            .map(|i| {
                let t = i as f64 / n as f64;
                FractionalAxial::lerp(start, end, t).round().into()
            })
            .collect()
    }
}

// =============================================================================
// GRID
// =============================================================================

/// A square or hex grid. The operation set is identical for both.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Grid {
    Square(SquareGrid),
    Hex(HexGrid),
}

impl Grid {
    pub fn square(size: f64) -> Self {
        Grid::Square(SquareGrid::new(size))
    }

    pub fn hex(size: f64) -> Self {
        Grid::Hex(HexGrid::new(size))
    }

    pub fn to_world(&self, cell: GridCell) -> WorldPos {
        match self {
            Grid::Square(g) => g.to_world(cell),
            Grid::Hex(g) => g.to_world(cell),
        }
    }

    pub fn to_coord(&self, pos: WorldPos) -> GridCell {
        match self {
            Grid::Square(g) => g.to_coord(pos),
            Grid::Hex(g) => g.to_coord(pos),
        }
    }

    pub fn neighbors(&self, cell: GridCell) -> Vec<GridCell> {
        match self {
            Grid::Square(g) => g.neighbors(cell),
            Grid::Hex(g) => g.neighbors(cell),
        }
    }

    pub fn distance(&self, a: GridCell, b: GridCell) -> i32 {
        match self {
            Grid::Square(g) => g.distance(a, b),
            Grid::Hex(g) => g.distance(a, b),
        }
    }

    pub fn ring(&self, center: GridCell, radius: i32) -> Vec<GridCell> {
        match self {
            Grid::Square(g) => g.ring(center, radius),
            Grid::Hex(g) => g.ring(center, radius),
        }
    }

    pub fn spiral(&self, center: GridCell, radius: i32) -> Vec<GridCell> {
        match self {
            Grid::Square(g) => g.spiral(center, radius),
            Grid::Hex(g) => g.spiral(center, radius),
        }
    }

    pub fn raycast_tile_line(&self, a: GridCell, b: GridCell) -> Vec<GridCell> {
        match self {
            Grid::Square(g) => g.raycast_tile_line(a, b),
            Grid::Hex(g) => g.raycast_tile_line(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const SQRT_3: f64 = 1.732_050_807_568_877_2;

    #[test]
    fn test_hex_to_world_scenario() {
        let grid = HexGrid::new(1.0);
        let pos = grid.to_world(GridCell::new(1, 0));
        assert!((pos.x - SQRT_3).abs() < 1e-9);
        assert_eq!(pos.y, 0.0);
        assert!(pos.z.abs() < 1e-9);

        let back = grid.to_coord(WorldPos::new(SQRT_3, 0.0, 0.0));
        assert_eq!(back, GridCell::new(1, 0));
    }

    #[test]
    fn test_hex_world_round_trip_both_orientations() {
        for grid in [HexGrid::new(1.5), HexGrid::flat_top(1.5)] {
            for c in grid.spiral(GridCell::new(2, -3), 5) {
                assert_eq!(grid.to_coord(grid.to_world(c)), c);
            }
        }
    }

    #[test]
    fn test_flat_top_uses_layout_formula() {
        let grid = HexGrid::flat_top(2.0);
        let pos = grid.to_world(GridCell::new(3, -1));
        let (x, z) = hex::axial_to_xz(3.0, -1.0, 2.0);
        assert_eq!((pos.x, pos.z), (x, z));
    }

    #[test]
    fn test_hex_ring_cardinality() {
        let grid = HexGrid::new(1.0);
        let center = GridCell::new(4, -2);
        assert_eq!(grid.ring(center, 0), vec![center]);

        for k in 1..=6 {
            let ring = grid.ring(center, k);
            assert_eq!(ring.len(), 6 * k as usize);
            let unique: HashSet<_> = ring.iter().collect();
            assert_eq!(unique.len(), ring.len());
            for c in &ring {
                assert_eq!(grid.distance(center, *c), k);
            }
        }
    }

    #[test]
    fn test_hex_ring_starts_southwest() {
        let grid = HexGrid::new(1.0);
        let ring = grid.ring(GridCell::new(0, 0), 2);
        assert_eq!(ring[0], GridCell::new(-2, 2));
    }

    #[test]
    fn test_hex_spiral_cardinality() {
        let grid = HexGrid::new(1.0);
        for radius in 0..=5 {
            let spiral = grid.spiral(GridCell::new(0, 0), radius);
            let r = radius as usize;
            assert_eq!(spiral.len(), 1 + 3 * r * (r + 1));
            let unique: HashSet<_> = spiral.iter().collect();
            assert_eq!(unique.len(), spiral.len());
        }
    }

    #[test]
    fn test_hex_raycast_is_continuous() {
        let grid = HexGrid::new(1.0);
        let a = GridCell::new(-3, 1);
        let b = GridCell::new(4, -5);
        let line = grid.raycast_tile_line(a, b);
        assert_eq!(line.len(), grid.distance(a, b) as usize + 1);
        assert_eq!(line[0], a);
        assert_eq!(*line.last().unwrap(), b);
        for pair in line.windows(2) {
            assert_eq!(grid.distance(pair[0], pair[1]), 1);
        }
    }

    #[test]
    fn test_degenerate_rays() {
        let c = GridCell::new(2, 2);
        assert_eq!(Grid::hex(1.0).raycast_tile_line(c, c), vec![c]);
        assert_eq!(Grid::square(1.0).raycast_tile_line(c, c), vec![c]);
    }

    #[test]
    fn test_square_raycast_cell_count() {
        let grid = SquareGrid::new(1.0);
        let cases = [((0, 0), (5, 2)), ((3, 3), (-2, 0)), ((0, 0), (0, 4)), ((1, 1), (4, 1))];
        for ((ax, ay), (bx, by)) in cases {
            let a = GridCell::new(ax, ay);
            let b = GridCell::new(bx, by);
            let line = grid.raycast_tile_line(a, b);
            assert_eq!(line.len() as i32, 1 + (bx - ax).abs() + (by - ay).abs());
            assert_eq!(line[0], a);
            assert_eq!(*line.last().unwrap(), b);
            for pair in line.windows(2) {
                assert_eq!(grid.distance(pair[0], pair[1]), 1);
            }
        }
    }

    #[test]
    fn test_square_ring_and_spiral() {
        let grid = SquareGrid::new(1.0);
        let center = GridCell::new(0, 0);
        assert_eq!(grid.ring(center, 0), vec![center]);

        let ring = grid.ring(center, 1);
        assert_eq!(ring.len(), 8);
        assert_eq!(ring[0], GridCell::new(-1, -1));
        assert_eq!(ring[1], GridCell::new(0, -1));
        assert_eq!(ring[2], GridCell::new(1, -1));

        let spiral = grid.spiral(center, 3);
        assert_eq!(spiral.len(), 49);
        let unique: HashSet<_> = spiral.iter().collect();
        assert_eq!(unique.len(), 49);
    }

    #[test]
    fn test_square_world_round_trip() {
        let grid = Grid::square(2.0);
        let c = GridCell::new(-3, 7);
        let pos = grid.to_world(c);
        assert_eq!(pos, WorldPos::new(-6.0, 0.0, 14.0));
        assert_eq!(grid.to_coord(pos), c);
    }

    #[test]
    fn test_neighbor_counts() {
        assert_eq!(Grid::square(1.0).neighbors(GridCell::new(0, 0)).len(), 4);
        assert_eq!(Grid::hex(1.0).neighbors(GridCell::new(0, 0)).len(), 6);
    }
}
