use std::collections::HashSet;

use hexworld::grid::{Grid, GridCell, HexGrid, WorldPos};
use hexworld::nav::{Nav, NavBounds};
use hexworld::quadtree::{Point, QuadTree, Rectangle};

#[test]
fn test_hex_grid_projection_scenario() {
    let grid = HexGrid::new(1.0);
    let pos = grid.to_world(GridCell::new(1, 0));
    assert!((pos.x - 3f64.sqrt()).abs() < 1e-9);
    assert!(pos.y.abs() < 1e-12);
    assert!(pos.z.abs() < 1e-9);
    assert_eq!(grid.to_coord(pos), GridCell::new(1, 0));
}

#[test]
fn test_hex_round_trip_through_world() {
    for grid in [HexGrid::new(2.5), HexGrid::flat_top(0.75)] {
        for cell in grid.spiral(GridCell::new(0, 0), 6) {
            assert_eq!(grid.to_coord(grid.to_world(cell)), cell);
        }
    }
}

#[test]
fn test_ring_and_spiral_cardinality() {
    let grid = Grid::hex(1.0);
    let center = GridCell::new(3, -2);
    for k in 1..=5 {
        let ring = grid.ring(center, k);
        let distinct: HashSet<GridCell> = ring.iter().copied().collect();
        assert_eq!(distinct.len(), 6 * k as usize);
        assert!(ring.iter().all(|&c| grid.distance(center, c) == k));
    }
    let spiral = grid.spiral(center, 4);
    assert_eq!(spiral.len(), 1 + 3 * 4 * 5);
}

#[test]
fn test_square_world_scaling() {
    let grid = Grid::square(2.0);
    assert_eq!(grid.to_world(GridCell::new(3, -1)), WorldPos::new(6.0, 0.0, -2.0));
    assert_eq!(grid.to_coord(WorldPos::new(5.1, 0.0, -2.9)), GridCell::new(3, -1));
}

#[test]
fn test_pathfinding_scenarios() {
    let nav = Nav::new(Grid::square(1.0));
    let path = nav.pathfind(GridCell::new(0, 0), GridCell::new(3, 0));
    assert_eq!(
        path,
        vec![
            GridCell::new(0, 0),
            GridCell::new(1, 0),
            GridCell::new(2, 0),
            GridCell::new(3, 0)
        ]
    );

    let bounds = NavBounds::Rect {
        min: GridCell::new(-5, -5),
        max: GridCell::new(5, 5),
    };
    let mut walled = Nav::new(Grid::square(1.0)).with_bounds(bounds);
    for y in -5..=5 {
        walled.set_blocker(GridCell::new(1, y), true);
    }
    assert!(walled.pathfind(GridCell::new(0, 0), GridCell::new(3, 0)).is_empty());
}

#[test]
fn test_quadtree_finds_each_point_once() {
    let boundary = Rectangle::new(0.0, 0.0, 100.0, 100.0);
    let mut tree = QuadTree::new(boundary, 4);
    let mut inserted = 0;
    for i in 0..40 {
        for j in 0..40 {
            let x = -99.0 + i as f64 * 4.9;
            let y = -99.0 + j as f64 * 4.9;
            if tree.insert(Point::new(x, y, (i, j))) {
                inserted += 1;
            }
        }
    }
    assert_eq!(inserted, 1600);

    let all = tree.query_vec(&boundary);
    let ids: HashSet<(i32, i32)> = all.iter().map(|p| p.data).collect();
    assert_eq!(all.len(), 1600);
    assert_eq!(ids.len(), 1600);
    assert!(!tree.insert(Point::new(100.0, 0.0, (-1, -1))));
}
