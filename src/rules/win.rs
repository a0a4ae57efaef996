//! Win condition checking
//!
//! A game is decided when
//! 1. a removal is pending after the placing phase and the opponent is down
//!    to three stones (the removal leaves them with two), or
//! 2. the side to move cannot slide any stone while unable to fly.

use crate::board::topology::neighbors;
use crate::board::{Board, Color, Phase, FLYING_STONES, LAST_PLACING_TURN};

/// Check whether any stone of `color` has an empty neighbor
pub fn can_slide(board: &Board, color: Color) -> bool {
    let empty = board.empty_fields();
    board
        .stones(color)
        .iter_ones()
        .any(|pos| neighbors(pos).any(|n| empty.get(n)))
}

/// Winner of the position, if any
pub fn winner(board: &Board) -> Option<Color> {
    let me = board.current_player();
    match board.phase() {
        Phase::Removing
            if board.turn() > LAST_PLACING_TURN
                && board.stone_count(me.opponent()) <= FLYING_STONES =>
        {
            Some(me)
        }
        Phase::Moving if board.stone_count(me) > FLYING_STONES && !can_slide(board, me) => {
            Some(me.opponent())
        }
        _ => None,
    }
}
