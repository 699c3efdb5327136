//! Integer grid geometry.
//!
//! The monastery is a rectangular tile map.  Agents move one tile per tick in
//! any of the eight compass directions, so the natural distance metric is
//! Chebyshev (king-move) distance.

use std::fmt;

/// A tile coordinate.  `x` grows east, `y` grows south.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Offsets of the eight neighbours, cardinals first.
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    ( 0, -1), ( 1,  0), ( 0,  1), (-1,  0),
    ( 1, -1), ( 1,  1), (-1,  1), (-1, -1),
];

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: `max(|dx|, |dy|)`.
    ///
    /// Symmetric, zero only for identical points, and equal to the number of
    /// single-tile moves an unobstructed agent needs.
    #[inline]
    pub fn chebyshev(self, other: Point) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.max(dy)
    }

    /// The point displaced by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// All eight neighbours, cardinal directions first.
    pub fn neighbours(self) -> impl Iterator<Item = Point> {
        NEIGHBOUR_OFFSETS.into_iter().map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// `true` when `other` is one diagonal step away.
    #[inline]
    pub fn is_diagonal_to(self, other: Point) -> bool {
        self.x != other.x && self.y != other.y
    }

    /// `true` when `other` is one of the eight neighbours (not `self`).
    #[inline]
    pub fn is_adjacent(self, other: Point) -> bool {
        self.chebyshev(other) == 1
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
