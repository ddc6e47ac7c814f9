//! Hex grid geometry with offset ("shoved-column") coordinates
//!
//! Odd columns are drawn half a hex lower than even columns, so the
//! neighbor offsets depend on column parity.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Offset hex coordinates (column `x`, row `y`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoordinate {
    pub x: i32,
    pub y: i32,
}

/// Largest coordinate any map may use; steps past it are off every map
pub const MAX_COORDINATE: i32 = 1 << 24;

/// Neighbor offsets (dx, dy), indexed by column parity (0 = even, 1 = odd)
/// Order: left, right, up, down, then the two parity-dependent diagonals
pub const NEIGHBOR_OFFSETS: [[(i32, i32); 6]; 2] = [
    // Even column: diagonals lean up
    [(-1, 0), (1, 0), (0, -1), (0, 1), (-1, -1), (1, -1)],
    // Odd column: diagonals lean down
    [(-1, 0), (1, 0), (0, -1), (0, 1), (-1, 1), (1, 1)],
];

impl HexCoordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Only non-negative coordinates address real map cells
    pub fn is_valid(&self) -> bool {
        self.x >= 0 && self.y >= 0
    }

    /// Valid and no further out than [`MAX_COORDINATE`]
    pub fn in_bounds(&self) -> bool {
        self.is_valid() && self.x <= MAX_COORDINATE && self.y <= MAX_COORDINATE
    }

    fn parity(&self) -> usize {
        (self.x & 1) as usize
    }

    /// The six adjacent hexes.
    ///
    /// Saturates at the `i32` limits, so a hex pinned there may list itself.
    pub fn neighbors(&self) -> [HexCoordinate; 6] {
        NEIGHBOR_OFFSETS[self.parity()]
            .map(|(dx, dy)| HexCoordinate::new(self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }

    pub fn is_adjacent_to(&self, other: HexCoordinate) -> bool {
        *self != other && self.neighbors().contains(&other)
    }

    /// Convert to cube coordinates (q, r, s) with q + r + s == 0
    pub fn to_cube(&self) -> (i64, i64, i64) {
        let x = i64::from(self.x);
        let q = x;
        let r = i64::from(self.y) - (x - (x & 1)) / 2;
        (q, r, -q - r)
    }

    /// Step distance between two hexes, saturating at `u32::MAX`
    pub fn distance_to(&self, other: HexCoordinate) -> u32 {
        let (q1, r1, s1) = self.to_cube();
        let (q2, r2, s2) = other.to_cube();
        let steps = ((q1 - q2).unsigned_abs() + (r1 - r2).unsigned_abs() + (s1 - s2).unsigned_abs()) / 2;
        u32::try_from(steps).unwrap_or(u32::MAX)
    }
}

impl std::fmt::Display for HexCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Free function form of [`HexCoordinate::neighbors`]
pub fn neighbors(hex: HexCoordinate) -> [HexCoordinate; 6] {
    hex.neighbors()
}

pub fn are_adjacent(a: HexCoordinate, b: HexCoordinate) -> bool {
    a.is_adjacent_to(b)
}

/// All hexes within `radius` steps of `center`, the center included.
///
/// Radius 0 yields 1 hex, radius 1 yields 7, radius 2 yields 19.
/// Negative coordinates are kept; callers filter with `is_valid` before
/// looking up terrain.
pub fn ring(center: HexCoordinate, radius: u32) -> FxHashSet<HexCoordinate> {
    let mut visited = FxHashSet::default();
    visited.insert(center);
    let mut frontier = vec![center];

    for _ in 0..radius {
        let mut next = Vec::with_capacity(frontier.len() * 6);
        for hex in &frontier {
            for neighbor in hex.neighbors() {
                if visited.insert(neighbor) {
                    next.push(neighbor);
                }
            }
        }
        frontier = next;
    }

    visited
}

/// Continuous position in world space
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
}

impl WorldPosition {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Default column pitch (flat-top hex of unit size)
pub const DEFAULT_COLUMN_PITCH: f32 = 1.5;
/// Default row pitch (sqrt(3) for a unit flat-top hex)
pub const DEFAULT_ROW_PITCH: f32 = 1.732_050_8;

/// Fixed spacing between hex centers in world units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexLayout {
    pub column_pitch: f32,
    pub row_pitch: f32,
}

impl Default for HexLayout {
    fn default() -> Self {
        Self {
            column_pitch: DEFAULT_COLUMN_PITCH,
            row_pitch: DEFAULT_ROW_PITCH,
        }
    }
}

impl HexLayout {
    /// Center of a hex in world space
    pub fn hex_to_world(&self, hex: HexCoordinate) -> WorldPosition {
        let shift = if hex.x & 1 == 1 { 0.5 } else { 0.0 };
        WorldPosition::new(
            hex.x as f32 * self.column_pitch,
            (hex.y as f32 + shift) * self.row_pitch,
        )
    }

    /// Nearest hex to a world position (column first, then row within it).
    ///
    /// Positions past the `i32` range clamp to it; the result then fails
    /// [`HexCoordinate::in_bounds`].
    pub fn world_to_hex(&self, pos: WorldPosition) -> HexCoordinate {
        let x = (pos.x / self.column_pitch).round() as i32;
        let shift = if x & 1 == 1 { 0.5 } else { 0.0 };
        let y = (pos.y / self.row_pitch - shift).round() as i32;
        HexCoordinate::new(x, y)
    }
}
