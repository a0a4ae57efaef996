//! Fixed field graph of the nine men's morris board
//!
//! Every field has up to four neighbors. Three fields connected in a
//! straight run (left/right or top/bottom) form a mill line.

use super::{Pos, FIELD_COUNT};

const N: u8 = u8::MAX;

const LEFT: [u8; FIELD_COUNT] = [
    N, 0, 1, N, 3, 4, N, 6, 7, N, 9, 10, N, 12, 13, N, 15, 16, N, 18, 19, N, 21, 22,
];
const RIGHT: [u8; FIELD_COUNT] = [
    1, 2, N, 4, 5, N, 7, 8, N, 10, 11, N, 13, 14, N, 16, 17, N, 19, 20, N, 22, 23, N,
];
const TOP: [u8; FIELD_COUNT] = [
    N, N, N, N, 1, N, N, 4, N, 0, 3, 6, 8, 5, 2, 11, N, 12, 10, 16, 13, 9, 19, 14,
];
const BOTTOM: [u8; FIELD_COUNT] = [
    9, 4, 14, 10, 7, 13, 11, N, 12, 21, 18, 15, 17, 20, 23, N, 19, N, N, 22, N, N, N, N,
];

/// All 16 mill lines: 8 horizontal followed by 8 vertical
pub const MILL_LINES: [[u8; 3]; 16] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [9, 10, 11],
    [12, 13, 14],
    [15, 16, 17],
    [18, 19, 20],
    [21, 22, 23],
    [0, 9, 21],
    [3, 10, 18],
    [6, 11, 15],
    [1, 4, 7],
    [16, 19, 22],
    [8, 12, 17],
    [5, 13, 20],
    [2, 14, 23],
];

/// Axis of a mill line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    #[inline]
    pub fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Neighbor towards the start of the line (left or top)
    #[inline]
    pub fn before(self, pos: Pos) -> Option<Pos> {
        match self {
            Axis::Horizontal => left(pos),
            Axis::Vertical => top(pos),
        }
    }

    /// Neighbor towards the end of the line (right or bottom)
    #[inline]
    pub fn after(self, pos: Pos) -> Option<Pos> {
        match self {
            Axis::Horizontal => right(pos),
            Axis::Vertical => bottom(pos),
        }
    }
}

#[inline]
fn lookup(table: &[u8; FIELD_COUNT], pos: Pos) -> Option<Pos> {
    match table[pos.to_index()] {
        N => None,
        idx => Some(Pos::new(idx)),
    }
}

#[inline]
pub fn left(pos: Pos) -> Option<Pos> {
    lookup(&LEFT, pos)
}

#[inline]
pub fn right(pos: Pos) -> Option<Pos> {
    lookup(&RIGHT, pos)
}

#[inline]
pub fn top(pos: Pos) -> Option<Pos> {
    lookup(&TOP, pos)
}

#[inline]
pub fn bottom(pos: Pos) -> Option<Pos> {
    lookup(&BOTTOM, pos)
}

/// Neighbors in the order left, right, top, bottom
pub fn neighbors(pos: Pos) -> impl Iterator<Item = Pos> {
    [left(pos), right(pos), top(pos), bottom(pos)]
        .into_iter()
        .flatten()
}

/// Whether two fields are directly connected
pub fn are_adjacent(a: Pos, b: Pos) -> bool {
    neighbors(a).any(|n| n == b)
}

/// The other two fields of the mill line through `pos` on `axis`.
///
/// Every field lies on exactly one line per axis.
pub fn line_partners(pos: Pos, axis: Axis) -> [Pos; 2] {
    match (axis.before(pos), axis.after(pos)) {
        (Some(b), Some(a)) => [b, a],
        (Some(b), None) => [b, axis.before(b).unwrap_or(b)],
        (None, Some(a)) => [a, axis.after(a).unwrap_or(a)],
        (None, None) => [pos, pos],
    }
}
