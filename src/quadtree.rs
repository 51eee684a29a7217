//! Point quadtree for broad-phase range queries
//!
//! Build once per epoch, query many times. Each point lives in exactly one
//! node: a node keeps up to `capacity` points, then splits once into NW, NE,
//! SW and SE quadrants and routes later inserts to the one containing them.

/// Axis-aligned rectangle given by its center and half extents.
/// Containment is half-open: `[x - w, x + w) x [y - h, y + h)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle covering `[min_x, max_x) x [min_y, max_y)`.
    pub fn from_bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        let w = (max_x - min_x) / 2.0;
        let h = (max_y - min_y) / 2.0;
        Self::new(min_x + w, min_y + h, w, h)
    }

    pub fn contains_xy(&self, px: f64, py: f64) -> bool {
        px >= self.x - self.w && px < self.x + self.w && py >= self.y - self.h && py < self.y + self.h
    }

    pub fn contains<T>(&self, point: &Point<T>) -> bool {
        self.contains_xy(point.x, point.y)
    }

    pub fn intersects(&self, other: &Rectangle) -> bool {
        !(other.x - other.w > self.x + self.w
            || other.x + other.w < self.x - self.w
            || other.y - other.h > self.y + self.h
            || other.y + other.h < self.y - self.h)
    }

    /// True when `other` lies entirely inside this rectangle.
    pub fn covers(&self, other: &Rectangle) -> bool {
        other.x - other.w >= self.x - self.w
            && other.x + other.w <= self.x + self.w
            && other.y - other.h >= self.y - self.h
            && other.y + other.h <= self.y + self.h
    }
}

/// A position with an attached payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Point<T> {
    pub x: f64,
    pub y: f64,
    pub data: T,
}

impl<T> Point<T> {
    pub fn new(x: f64, y: f64, data: T) -> Self {
        Self { x, y, data }
    }
}

/// Half-open node edges. Siblings share their inner edge values exactly, so
/// every point of the parent lands in exactly one child.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    fn from_rect(r: &Rectangle) -> Self {
        Self {
            min_x: r.x - r.w,
            min_y: r.y - r.h,
            max_x: r.x + r.w,
            max_y: r.y + r.h,
        }
    }

    fn contains_xy(&self, px: f64, py: f64) -> bool {
        px >= self.min_x && px < self.max_x && py >= self.min_y && py < self.max_y
    }

    fn intersects(&self, range: &Rectangle) -> bool {
        self.min_x <= range.x + range.w
            && range.x - range.w <= self.max_x
            && self.min_y <= range.y + range.h
            && range.y - range.h <= self.max_y
    }

    fn covered_by(&self, range: &Rectangle) -> bool {
        range.x - range.w <= self.min_x
            && self.max_x <= range.x + range.w
            && range.y - range.h <= self.min_y
            && self.max_y <= range.y + range.h
    }

    fn mid(&self) -> (f64, f64) {
        (
            self.min_x + (self.max_x - self.min_x) * 0.5,
            self.min_y + (self.max_y - self.min_y) * 0.5,
        )
    }

    /// Whether a split yields four non-empty quadrants.
    fn can_split(&self) -> bool {
        let (mx, my) = self.mid();
        self.min_x < mx && mx < self.max_x && self.min_y < my && my < self.max_y
    }

    /// NW, NE, SW, SE around the midpoint.
    fn quadrants(&self) -> [Bounds; 4] {
        let (mx, my) = self.mid();
        [
            Bounds { min_x: self.min_x, min_y: self.min_y, max_x: mx, max_y: my },
            Bounds { min_x: mx, min_y: self.min_y, max_x: self.max_x, max_y: my },
            Bounds { min_x: self.min_x, min_y: my, max_x: mx, max_y: self.max_y },
            Bounds { min_x: mx, min_y: my, max_x: self.max_x, max_y: self.max_y },
        ]
    }

    fn to_rect(self) -> Rectangle {
        Rectangle::from_bounds(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Nodes at this depth stop splitting and keep every point they receive.
pub const MAX_DEPTH: u32 = 32;

#[derive(Debug)]
pub struct QuadTree<T> {
    boundary: Rectangle,
    bounds: Bounds,
    capacity: usize,
    depth: u32,
    points: Vec<Point<T>>,
    children: Option<Box<[QuadTree<T>; 4]>>,
}

impl<T> QuadTree<T> {
    pub fn new(boundary: Rectangle, capacity: usize) -> Self {
        Self::node(boundary, Bounds::from_rect(&boundary), capacity.max(1), 0)
    }

    fn node(boundary: Rectangle, bounds: Bounds, capacity: usize, depth: u32) -> Self {
        Self {
            boundary,
            bounds,
            capacity,
            depth,
            points: Vec::with_capacity(capacity),
            children: None,
        }
    }

    pub fn boundary(&self) -> &Rectangle {
        &self.boundary
    }

    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    /// Insert a point. Returns `false` only when it lies outside the boundary.
    pub fn insert(&mut self, point: Point<T>) -> bool {
        if !self.bounds.contains_xy(point.x, point.y) {
            return false;
        }
        self.insert_contained(point);
        true
    }

    fn insert_contained(&mut self, point: Point<T>) {
        if self.children.is_none()
            && (self.points.len() < self.capacity
                || self.depth >= MAX_DEPTH
                || !self.bounds.can_split())
        {
            self.points.push(point);
            return;
        }

        let (capacity, depth, bounds) = (self.capacity, self.depth, self.bounds);
        let children = self.children.get_or_insert_with(|| {
            Box::new(bounds.quadrants().map(|q| QuadTree::node(q.to_rect(), q, capacity, depth + 1)))
        });

        // Route on the stored midpoint, not on the child rectangles
        let (mx, my) = bounds.mid();
        let index = usize::from(point.x >= mx) + 2 * usize::from(point.y >= my);
        children[index].insert_contained(point);
    }

    /// Append every point inside `range` to `found`.
    pub fn query<'a>(&'a self, range: &Rectangle, found: &mut Vec<&'a Point<T>>) {
        if !self.bounds.intersects(range) {
            return;
        }
        if self.bounds.covered_by(range) {
            self.collect_all(found);
            return;
        }
        for point in &self.points {
            if range.contains(point) {
                found.push(point);
            }
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query(range, found);
            }
        }
    }

    pub fn query_vec(&self, range: &Rectangle) -> Vec<&Point<T>> {
        let mut found = Vec::new();
        self.query(range, &mut found);
        found
    }

    pub fn len(&self) -> usize {
        let own = self.points.len();
        match &self.children {
            Some(children) => own + children.iter().map(|c| c.len()).sum::<usize>(),
            None => own,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn collect_all<'a>(&'a self, found: &mut Vec<&'a Point<T>>) {
        found.extend(self.points.iter());
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_all(found);
            }
        }
    }
}
