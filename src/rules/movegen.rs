//! Legal move enumeration

use crate::board::topology::neighbors;
use crate::board::{Board, Move, Phase};

use super::mill::removable_stones;
use super::win::winner;

/// All legal moves for the side to move.
///
/// Empty once the game is decided. Moves are ordered by source field, then
/// by target field (neighbor order left, right, top, bottom when sliding).
pub fn generate_moves(board: &Board) -> Vec<Move> {
    if winner(board).is_some() {
        return Vec::new();
    }

    let me = board.current_player();
    match board.phase() {
        Phase::Placing => board
            .empty_fields()
            .iter_ones()
            .map(|to| Move::Place { to })
            .collect(),
        Phase::Moving => {
            let empty = board.empty_fields();
            let mut moves = Vec::with_capacity(32);
            for from in board.stones(me).iter_ones() {
                if board.can_fly(me) {
                    moves.extend(empty.iter_ones().map(|to| Move::Slide { from, to }));
                } else {
                    moves.extend(
                        neighbors(from)
                            .filter(|&to| empty.get(to))
                            .map(|to| Move::Slide { from, to }),
                    );
                }
            }
            moves
        }
        Phase::Removing => removable_stones(board, me.opponent())
            .iter_ones()
            .map(|from| Move::Remove { from })
            .collect(),
    }
}
