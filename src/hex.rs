//! Axial/cube hex coordinate math
//!
//! Flat-top layout. Axial `(q, r)` is the canonical tile identity; cube
//! `(x, y, z)` with `x + y + z == 0` is used for distance and rounding.

use serde::{Deserialize, Serialize};

// =============================================================================
// COORDINATE TYPES
// =============================================================================

/// Integer axial hex coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

/// Fractional axial coordinate, e.g. the result of an inverse projection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FractionalAxial {
    pub q: f64,
    pub r: f64,
}

/// Integer cube coordinate. Always satisfies `x + y + z == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubeCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// The six axial unit directions, clockwise starting East.
pub const HEX_DIRECTIONS: [AxialCoord; 6] = [
    AxialCoord { q: 1, r: 0 },
    AxialCoord { q: 1, r: -1 },
    AxialCoord { q: 0, r: -1 },
    AxialCoord { q: -1, r: 0 },
    AxialCoord { q: -1, r: 1 },
    AxialCoord { q: 0, r: 1 },
];

const SQRT_3: f64 = 1.732_050_807_568_877_2;

impl AxialCoord {
    pub const ORIGIN: AxialCoord = AxialCoord { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub fn to_cube(self) -> CubeCoord {
        axial_to_cube(self.q, self.r)
    }

    pub fn distance(self, other: AxialCoord) -> i32 {
        distance_axial(self, other)
    }

    /// Neighbor in direction `dir` (taken modulo 6).
    pub fn neighbor(self, dir: usize) -> AxialCoord {
        self + HEX_DIRECTIONS[dir % 6]
    }

    /// All six neighbors in direction order.
    pub fn neighbors(self) -> [AxialCoord; 6] {
        HEX_DIRECTIONS.map(|d| self + d)
    }

    pub fn scale(self, k: i32) -> AxialCoord {
        AxialCoord::new(self.q * k, self.r * k)
    }
}

impl std::ops::Add for AxialCoord {
    type Output = AxialCoord;

    fn add(self, rhs: AxialCoord) -> AxialCoord {
        AxialCoord::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl std::ops::Sub for AxialCoord {
    type Output = AxialCoord;

    fn sub(self, rhs: AxialCoord) -> AxialCoord {
        AxialCoord::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl std::fmt::Display for AxialCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl FractionalAxial {
    pub fn new(q: f64, r: f64) -> Self {
        Self { q, r }
    }

    pub fn round(self) -> AxialCoord {
        round_axial(self.q, self.r)
    }

    /// Linear interpolation in axial space.
    pub fn lerp(a: FractionalAxial, b: FractionalAxial, t: f64) -> FractionalAxial {
        FractionalAxial::new(a.q + (b.q - a.q) * t, a.r + (b.r - a.r) * t)
    }
}

impl From<AxialCoord> for FractionalAxial {
    fn from(c: AxialCoord) -> Self {
        FractionalAxial::new(c.q as f64, c.r as f64)
    }
}

// =============================================================================
// CONVERSIONS
// =============================================================================

pub fn axial_to_cube(q: i32, r: i32) -> CubeCoord {
    CubeCoord { x: q, y: -q - r, z: r }
}

pub fn cube_to_axial(cube: CubeCoord) -> AxialCoord {
    AxialCoord::new(cube.x, cube.z)
}

/// Snap a fractional axial coordinate to the nearest hex.
///
/// Each cube component is rounded independently, then the component with
/// the largest rounding error is rebuilt from the other two so the cube sum
/// stays zero.
pub fn round_axial(qf: f64, rf: f64) -> AxialCoord {
    let xf = qf;
    let zf = rf;
    let yf = -xf - zf;

    let mut rx = xf.round();
    let ry = yf.round();
    let mut rz = zf.round();

    let dx = (rx - xf).abs();
    let dy = (ry - yf).abs();
    let dz = (rz - zf).abs();

    if dx > dy && dx > dz {
        rx = -ry - rz;
    } else if dy <= dz {
        rz = -rx - ry;
    }
    // Otherwise y carried the largest error; it is implied by x and z.

    AxialCoord::new(rx as i32, rz as i32)
}

/// Hex distance: Chebyshev distance over cube coordinates.
pub fn distance_axial(a: AxialCoord, b: AxialCoord) -> i32 {
    let dq = a.q - b.q;
    let dr = a.r - b.r;
    ((dq.abs()) + (dr.abs()) + (dq + dr).abs()) / 2
}

/// Flat-top projection of an axial coordinate onto the world XZ plane.
pub fn axial_to_xz(q: f64, r: f64, hex_size: f64) -> (f64, f64) {
    let x = 1.5 * hex_size * q;
    let z = SQRT_3 * hex_size * (r + q / 2.0);
    (x, z)
}

/// Inverse of [`axial_to_xz`]. The result is fractional; callers round.
pub fn world_to_axial(x: f64, z: f64, hex_size: f64) -> FractionalAxial {
    if hex_size == 0.0 {
        return FractionalAxial::default();
    }
    let q = x / (1.5 * hex_size);
    let r = z / (SQRT_3 * hex_size) - q / 2.0;
    FractionalAxial::new(q, r)
}

/// Number of tiles in a hex disc of `radius` rings.
pub fn hex_disc_size(radius: i32) -> usize {
    if radius < 0 {
        return 0;
    }
    let r = radius as usize;
    1 + 3 * r * (r + 1)
}
