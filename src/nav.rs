//! Breadth-first pathfinding over any [`Grid`]
//!
//! Uniform edge cost. A [`Nav`] is bound to one grid for its lifetime;
//! blockers are keyed by cell value, not by formatted strings.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::grid::{Grid, GridCell};
use crate::hex::{self, AxialCoord};

/// Floor on expanded cells when no [`NavBounds`] are set, so an
/// unreachable goal on an infinite grid still terminates.
pub const DEFAULT_MAX_EXPANSIONS: usize = 65_536;

/// Unbounded searches may always expand this many cells per unit of
/// `(distance + 1)^2`, which covers the open disc out to the goal.
const EXPANSIONS_PER_AREA: usize = 8;

/// Area a search may enter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavBounds {
    /// Inclusive cell rectangle
    Rect { min: GridCell, max: GridCell },
    /// Hex disc around `center` (hex grids)
    HexRadius { center: AxialCoord, radius: i32 },
}

impl NavBounds {
    pub fn contains(&self, cell: GridCell) -> bool {
        match *self {
            NavBounds::Rect { min, max } => {
                cell.x >= min.x && cell.x <= max.x && cell.y >= min.y && cell.y <= max.y
            }
            NavBounds::HexRadius { center, radius } => {
                hex::distance_axial(center, cell.into()) <= radius
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Nav {
    grid: Grid,
    blockers: HashSet<GridCell>,
    bounds: Option<NavBounds>,
    max_expansions: usize,
}

impl Nav {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            blockers: HashSet::new(),
            bounds: None,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }

    pub fn with_bounds(mut self, bounds: NavBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Lower the floor on expansions for unbounded searches. Bounded
    /// searches are finite and never capped.
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions.max(1);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn set_blocker(&mut self, cell: GridCell, blocked: bool) {
        if blocked {
            self.blockers.insert(cell);
        } else {
            self.blockers.remove(&cell);
        }
    }

    pub fn is_blocked(&self, cell: GridCell) -> bool {
        self.blockers.contains(&cell)
    }

    pub fn blocker_count(&self) -> usize {
        self.blockers.len()
    }

    pub fn is_walkable(&self, cell: GridCell) -> bool {
        !self.is_blocked(cell) && self.bounds.map_or(true, |b| b.contains(cell))
    }

    /// Expansion cap for a search, `None` when bounds keep it finite.
    fn expansion_limit(&self, start: GridCell, goal: GridCell) -> Option<usize> {
        if self.bounds.is_some() {
            return None;
        }
        let span = self.grid.distance(start, goal).max(0) as usize + 1;
        let open_area = span.saturating_mul(span).saturating_mul(EXPANSIONS_PER_AREA);
        Some(self.max_expansions.max(open_area))
    }

    /// Shortest path from `start` to `goal`, both inclusive.
    ///
    /// Returns `[start]` when `start == goal` and an empty path when the goal
    /// cannot be reached.
    pub fn pathfind(&self, start: GridCell, goal: GridCell) -> Vec<GridCell> {
        if !self.is_walkable(start) || !self.is_walkable(goal) {
            return Vec::new();
        }

        let mut frontier = VecDeque::new();
        let mut came_from: HashMap<GridCell, Option<GridCell>> = HashMap::new();
        frontier.push_back(start);
        came_from.insert(start, None);

        let limit = self.expansion_limit(start, goal);
        let mut expanded = 0usize;
        let mut reached = false;
        while let Some(current) = frontier.pop_front() {
            if current == goal {
                reached = true;
                break;
            }
            expanded += 1;
            if let Some(limit) = limit.filter(|&limit| expanded > limit) {
                log::debug!("pathfind {} -> {} gave up after {} expansions", start, goal, limit);
                break;
            }
            for next in self.grid.neighbors(current) {
                if came_from.contains_key(&next) || !self.is_walkable(next) {
                    continue;
                }
                came_from.insert(next, Some(current));
                frontier.push_back(next);
            }
        }

        if !reached {
            return Vec::new();
        }

        let mut path = vec![goal];
        let mut current = goal;
        while let Some(Some(prev)) = came_from.get(&current) {
            path.push(*prev);
            current = *prev;
        }
        path.reverse();
        path
    }
}
