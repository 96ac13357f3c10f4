//! Grid coordinates.
//!
//! The world is a rectangular tile grid with `y` growing southwards, the
//! convention of the host engine.  All distances are Manhattan distances:
//! agents only move along the four cardinal directions.

use std::fmt;

/// A tile on the grid.
///
/// Serialized as a two-element array `[x, y]`, the shape the host engine uses
/// for every `location` attribute.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "(i32, i32)", into = "(i32, i32)"))]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance in tiles.
    #[inline]
    pub fn manhattan(self, other: Location) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The tile `(dx, dy)` away from `self`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Location {
        Location::new(self.x + dx, self.y + dy)
    }

    /// The tile one step in `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> Location {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }

    /// Index of the element of `points` closest to `self`.
    ///
    /// Ties keep the first minimum; `None` for an empty iterator.
    pub fn closest<I>(self, points: I) -> Option<usize>
    where
        I: IntoIterator<Item = Location>,
    {
        let mut best: Option<(usize, u32)> = None;
        for (idx, p) in points.into_iter().enumerate() {
            let d = self.manhattan(p);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((idx, d));
            }
        }
        best.map(|(idx, _)| idx)
    }
}

impl From<(i32, i32)> for Location {
    fn from((x, y): (i32, i32)) -> Self {
        Location::new(x, y)
    }
}

impl From<Location> for (i32, i32) {
    fn from(loc: Location) -> Self {
        (loc.x, loc.y)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the four single-tile moves.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// `(dx, dy)` of one step.  North is `-y`.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East  => (1, 0),
            Direction::South => (0, 1),
            Direction::West  => (-1, 0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East  => "east",
            Direction::South => "south",
            Direction::West  => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
