//! Board state with move application and undo

use serde::{Deserialize, Serialize};

use super::bitboard::Bitboard;
use super::topology::are_adjacent;
use super::{Color, Move, Phase, Pos, FIELD_COUNT, FLYING_STONES, LAST_PLACING_TURN, STONES_PER_PLAYER};
use crate::error::{BoardError, MoveError};
use crate::{eval, rules};

/// Complete game state: stones, side to move, turn counter and phase.
///
/// The board is a small `Copy` value. Search mutates a single instance in
/// place and restores it with [`Board::undo_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardParts", into = "BoardParts")]
pub struct Board {
    /// Stones per color, indexed by [`Color::index`]
    occupancy: [Bitboard; 2],
    current_player: Color,
    /// Completed turns; removals do not count as a turn
    turn: u32,
    phase: Phase,
}

/// Serialized form of a [`Board`]; deserializing goes through [`Board::from_parts`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BoardParts {
    black: Bitboard,
    white: Bitboard,
    current_player: Color,
    turn: u32,
    phase: Phase,
}

impl TryFrom<BoardParts> for Board {
    type Error = BoardError;

    fn try_from(parts: BoardParts) -> Result<Self, Self::Error> {
        Board::from_parts(parts.black, parts.white, parts.current_player, parts.turn, parts.phase)
    }
}

impl From<Board> for BoardParts {
    fn from(board: Board) -> Self {
        Self {
            black: board.stones(Color::Black),
            white: board.stones(Color::White),
            current_player: board.current_player,
            turn: board.turn,
            phase: board.phase,
        }
    }
}

impl Board {
    /// Empty board, White to place the first stone
    pub fn new() -> Self {
        Self {
            occupancy: [Bitboard::new(); 2],
            current_player: Color::White,
            turn: 0,
            phase: Phase::Placing,
        }
    }

    /// Build a board from externally tracked state (snapshot of a live game)
    pub fn from_parts(
        black: Bitboard,
        white: Bitboard,
        current_player: Color,
        turn: u32,
        phase: Phase,
    ) -> Result<Self, BoardError> {
        if let Some(pos) = Bitboard::from_bits(black.bits() & white.bits()).iter_ones().next() {
            return Err(BoardError::Overlap(pos));
        }
        for stones in [black, white] {
            if stones.count() > STONES_PER_PLAYER {
                return Err(BoardError::TooManyStones {
                    count: stones.count(),
                });
            }
        }
        Ok(Self {
            occupancy: [black, white],
            current_player,
            turn,
            phase,
        })
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    #[inline]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Get the color of the stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Color> {
        if self.occupancy[Color::Black.index()].get(pos) {
            Some(Color::Black)
        } else if self.occupancy[Color::White.index()].get(pos) {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Check if position holds any stone
    #[inline]
    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.occupied().get(pos)
    }

    /// Check if position holds a stone of `color`
    #[inline]
    pub fn has_stone(&self, pos: Pos, color: Color) -> bool {
        self.occupancy[color.index()].get(pos)
    }

    /// Bitboard for a color
    #[inline]
    pub fn stones(&self, color: Color) -> Bitboard {
        self.occupancy[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupancy[0].union(self.occupancy[1])
    }

    #[inline]
    pub fn empty_fields(&self) -> Bitboard {
        self.occupied().complement()
    }

    #[inline]
    pub fn stone_count(&self, color: Color) -> u32 {
        self.occupancy[color.index()].count()
    }

    /// Whether `color` is down to the stones that may fly
    #[inline]
    pub fn can_fly(&self, color: Color) -> bool {
        self.stone_count(color) <= FLYING_STONES
    }

    /// Place a stone without any rule processing.
    /// Use `perform_move` for game moves.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, color: Color) {
        self.occupancy[color.opponent().index()].clear(pos);
        self.occupancy[color.index()].set(pos);
    }

    /// Remove a stone without any rule processing
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.occupancy[0].clear(pos);
        self.occupancy[1].clear(pos);
    }

    /// All moves the side to move can legally make
    pub fn possible_moves(&self) -> Vec<Move> {
        rules::generate_moves(self)
    }

    /// Winner of the game, if it is decided
    pub fn winner(&self) -> Option<Color> {
        rules::winner(self)
    }

    pub fn check_mill_horizontal(&self, pos: Pos) -> bool {
        rules::check_mill_horizontal(self, pos)
    }

    pub fn check_mill_vertical(&self, pos: Pos) -> bool {
        rules::check_mill_vertical(self, pos)
    }

    /// Whether the stone on `pos` is part of any closed mill
    pub fn check_mill(&self, pos: Pos) -> bool {
        rules::check_mill(self, pos)
    }

    /// Heuristic value of the position from `color`'s point of view
    pub fn rating(&self, color: Color) -> i32 {
        eval::rating(self, color)
    }

    /// Unique number for the stone placement.
    ///
    /// Each field is one base-3 digit (0 empty, 1 black, 2 white), so the
    /// value is below 3^24 and distinct placements never collide. Side to
    /// move, turn and phase are not part of the hash.
    pub fn state_hash(&self) -> u64 {
        let mut hash = 0u64;
        let mut weight = 1u64;
        for pos in Pos::all() {
            if let Some(color) = self.get(pos) {
                hash += weight * color.hash_code();
            }
            weight *= 3;
        }
        hash
    }

    /// Apply a move for the side to move.
    ///
    /// On error the board is unchanged.
    pub fn perform_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if mv.phase() != self.phase {
            return Err(MoveError::PhaseMismatch {
                expected: self.phase,
                found: mv.phase(),
            });
        }
        if self.winner().is_some() {
            return Err(MoveError::GameOver);
        }

        let me = self.current_player;
        match mv {
            Move::Place { to } => {
                if self.is_occupied(to) {
                    return Err(MoveError::Occupied(to));
                }
                self.occupancy[me.index()].set(to);
                self.advance_turn(to);
            }
            Move::Slide { from, to } => {
                if self.is_occupied(to) {
                    return Err(MoveError::Occupied(to));
                }
                if !self.has_stone(from, me) {
                    return Err(MoveError::NotOwnStone(from));
                }
                if !self.can_fly(me) && !are_adjacent(from, to) {
                    return Err(MoveError::NotAdjacent { from, to });
                }
                self.occupancy[me.index()].clear(from);
                self.occupancy[me.index()].set(to);
                self.advance_turn(to);
            }
            Move::Remove { from } => {
                if !self.has_stone(from, me.opponent()) {
                    return Err(MoveError::NotOpponentStone(from));
                }
                if self.check_mill(from) {
                    return Err(MoveError::ProtectedByMill(from));
                }
                self.occupancy[me.opponent().index()].clear(from);
                self.advance_turn(from);
            }
        }
        Ok(())
    }

    /// Revert `mv`, which must be the last move performed on this board.
    ///
    /// On error the board is unchanged.
    pub fn undo_move(&mut self, mv: Move) -> Result<(), MoveError> {
        // Closing a mill keeps the mover on turn, so while removing the
        // side to move is also the one who moved last.
        let last = if self.phase == Phase::Removing {
            self.current_player
        } else {
            self.current_player.opponent()
        };
        if self.phase != Phase::Removing && self.turn == 0 {
            return Err(MoveError::CannotUndo(mv));
        }

        match mv {
            Move::Place { to } => {
                if !self.has_stone(to, last) {
                    return Err(MoveError::CannotUndo(mv));
                }
                self.occupancy[last.index()].clear(to);
            }
            Move::Slide { from, to } => {
                if !self.has_stone(to, last) || self.is_occupied(from) {
                    return Err(MoveError::CannotUndo(mv));
                }
                self.occupancy[last.index()].clear(to);
                self.occupancy[last.index()].set(from);
            }
            Move::Remove { from } => {
                if self.is_occupied(from) {
                    return Err(MoveError::CannotUndo(mv));
                }
                self.occupancy[last.opponent().index()].set(from);
            }
        }

        if self.phase != Phase::Removing {
            self.turn -= 1;
        }
        self.current_player = last;
        self.phase = mv.phase();
        Ok(())
    }

    /// Finish a turn whose mill cannot take anything.
    ///
    /// Only valid in the removing phase when no opponent stone is removable
    /// and the game is not decided.
    pub fn skip_removal(&mut self) -> Result<(), MoveError> {
        if self.phase != Phase::Removing {
            return Err(MoveError::PhaseMismatch {
                expected: self.phase,
                found: Phase::Removing,
            });
        }
        if self.winner().is_some() {
            return Err(MoveError::GameOver);
        }
        if !rules::removable_stones(self, self.current_player.opponent()).is_empty() {
            return Err(MoveError::RemovalAvailable);
        }
        self.finish_turn();
        Ok(())
    }

    /// Enter the removing phase after a fresh mill, or hand the turn over.
    fn advance_turn(&mut self, field: Pos) {
        if self.phase != Phase::Removing
            && self.check_mill(field)
            && rules::has_removable_stone(self, self.current_player.opponent())
        {
            self.phase = Phase::Removing;
            return;
        }
        self.finish_turn();
    }

    fn finish_turn(&mut self) {
        self.phase = if self.turn < LAST_PLACING_TURN {
            Phase::Placing
        } else {
            Phase::Moving
        };
        self.turn += 1;
        self.current_player = self.current_player.opponent();
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Screen coordinates (column, row) of each field on a 7x7 grid
const FIELD_COORDS: [(usize, usize); FIELD_COUNT] = [
    (0, 0), (3, 0), (6, 0),
    (1, 1), (3, 1), (5, 1),
    (2, 2), (3, 2), (4, 2),
    (0, 3), (1, 3), (2, 3), (4, 3), (5, 3), (6, 3),
    (2, 4), (3, 4), (4, 4),
    (1, 5), (3, 5), (5, 5),
    (0, 6), (3, 6), (6, 6),
];

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut grid = [[' '; 7]; 7];
        for pos in Pos::all() {
            let (x, y) = FIELD_COORDS[pos.to_index()];
            grid[y][x] = match self.get(pos) {
                Some(Color::Black) => 'B',
                Some(Color::White) => 'W',
                None => '.',
            };
        }
        for row in grid {
            let line: String = row.iter().flat_map(|&c| [c, ' ']).collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        write!(
            f,
            "turn {} | {:?} to move | {:?}",
            self.turn, self.current_player, self.phase
        )
    }
}
