//! Board representation for nine men's morris

pub mod bitboard;
pub mod board;
pub mod topology;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;

/// Number of fields on the board
pub const FIELD_COUNT: usize = 24;

/// Stones each player brings into the game
pub const STONES_PER_PLAYER: u32 = 9;

/// Last turn index that still belongs to the placing phase.
/// 18 placements happen on turns 0..=17.
pub const LAST_PLACING_TURN: u32 = 17;

/// A player with this many stones (or fewer) may fly
pub const FLYING_STONES: u32 = 3;

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Index into per-color arrays
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Base-3 digit used by the state hash
    #[inline]
    pub fn hash_code(self) -> u64 {
        match self {
            Color::Black => 1,
            Color::White => 2,
        }
    }
}

/// Game phase of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Stones are brought onto empty fields
    Placing,
    /// Stones slide to adjacent fields (or fly with three stones left)
    Moving,
    /// The side to move just closed a mill and takes an opponent stone
    Removing,
}

/// Field on the board (0..24)
///
/// Numbering runs left to right, top to bottom:
///
/// ```text
///  0 ----------- 1 ----------- 2
///  |             |             |
///  |    3 ------ 4 ------ 5    |
///  |    |        |        |    |
///  |    |   6 -- 7 -- 8   |    |
///  9 - 10 - 11       12 - 13 - 14
///  |    |   15 - 16 - 17  |    |
///  |    |        |        |    |
///  |   18 ----- 19 ----- 20    |
///  |             |             |
/// 21 ---------- 22 ---------- 23
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Pos(u8);

impl Pos {
    #[inline]
    pub const fn new(index: u8) -> Self {
        debug_assert!((index as usize) < FIELD_COUNT);
        Self(index)
    }

    /// Checked constructor for indices coming from outside the engine
    #[inline]
    pub fn try_new(index: usize) -> Option<Self> {
        (index < FIELD_COUNT).then(|| Self(index as u8))
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.0 as usize
    }

    /// All 24 fields in ascending order
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..FIELD_COUNT as u8).map(Pos)
    }
}

impl TryFrom<u8> for Pos {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Pos::try_new(index as usize).ok_or_else(|| format!("field index {index} out of range"))
    }
}

impl From<Pos> for u8 {
    fn from(pos: Pos) -> u8 {
        pos.0
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single game move.
///
/// Each variant only makes sense in the phase it was generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Put a new stone on an empty field
    Place { to: Pos },
    /// Move an own stone from one field to another
    Slide { from: Pos, to: Pos },
    /// Take an opponent stone off the board
    Remove { from: Pos },
}

impl Move {
    /// Phase in which this move can be performed
    #[inline]
    pub fn phase(self) -> Phase {
        match self {
            Move::Place { .. } => Phase::Placing,
            Move::Slide { .. } => Phase::Moving,
            Move::Remove { .. } => Phase::Removing,
        }
    }

    /// Field a stone leaves, if any
    #[inline]
    pub fn source(self) -> Option<Pos> {
        match self {
            Move::Place { .. } => None,
            Move::Slide { from, .. } | Move::Remove { from } => Some(from),
        }
    }

    /// Field a stone arrives on, if any
    #[inline]
    pub fn target(self) -> Option<Pos> {
        match self {
            Move::Place { to } | Move::Slide { to, .. } => Some(to),
            Move::Remove { .. } => None,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Place { to } => write!(f, "place {to}"),
            Move::Slide { from, to } => write!(f, "slide {from}->{to}"),
            Move::Remove { from } => write!(f, "remove {from}"),
        }
    }
}
