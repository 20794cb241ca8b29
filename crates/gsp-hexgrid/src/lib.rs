//! # Hex grid primitives
//!
//! Axial integer coordinates and the handful of operations every other
//! component builds on: L1 (hex) distance, the fixed six-neighbour set,
//! and the lexicographic coordinate ordering used everywhere the engine
//! needs a deterministic iteration order over a set of tiles.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An axial hex coordinate.
///
/// Ordering is lexicographic on `(x, y)` — this is the deterministic
/// coordinate ordering used for path-finder tie-breaks, drop ordering,
/// and damage accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Hex-grid (L1) distance: `(|x| + |y| + |x+y|) / 2`.
    pub fn distance(self, other: Coord) -> u32 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        (dx.abs() + dy.abs() + (dx + dy).abs()) as u32 / 2
    }

    /// The fixed six neighbour offsets of an axial hex grid, in a fixed
    /// order so callers that need a stable neighbour enumeration (e.g.
    /// the path-finder's edge expansion) get one for free.
    pub const NEIGHBOUR_OFFSETS: [(i32, i32); 6] =
        [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

    pub fn neighbours(self) -> impl Iterator<Item = Coord> {
        Self::NEIGHBOUR_OFFSETS
            .into_iter()
            .map(move |(dx, dy)| Coord::new(self.x + dx, self.y + dy))
    }

    /// All coordinates within L1 distance `radius` of `self`, inclusive,
    /// in lexicographic `(x, y)` order.
    pub fn ball(self, radius: u32) -> Vec<Coord> {
        let r = radius as i32;
        let mut out = Vec::new();
        for x in -r..=r {
            let y_lo = (-r - x).max(-r);
            let y_hi = (r - x).min(r);
            for y in y_lo..=y_hi {
                out.push(Coord::new(self.x + x, self.y + y));
            }
        }
        out.sort_by(coord_order);
        out
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        coord_order(self, other)
    }
}

/// Lexicographic `(x, y)` order, exposed as a free function for call
/// sites that sort by coordinate without owning a `Coord` `Vec` (e.g.
/// sorting `(Coord, T)` pairs by `.0`).
pub fn coord_order(a: &Coord, b: &Coord) -> Ordering {
    a.x.cmp(&b.x).then(a.y.cmp(&b.y))
}

/// Stable numeric key for the region a tile belongs to, used when the
/// map oracle itself doesn't carry a `region_id` for a coordinate.
/// Every caller that needs to group tiles by region (move processing,
/// ongoing-op finalisation) must derive the same key from the same
/// coordinate, so this lives here rather than being reimplemented
/// per crate.
pub fn region_key_for(coord: Coord) -> u64 {
    (((coord.x as i64) << 32) ^ (coord.y as i64)) as u64
}

#[cfg(test)]
mod tests;
