//! Heuristic evaluation function for nine men's morris positions
//!
//! The score is computed for the side to move and flipped for the other
//! color, so `rating(board, White) == -rating(board, Black)` always holds.
//! Criteria:
//! - Pending removal
//! - Closed mills, blocked stones and material
//! - Two- and three-piece configurations
//! - Open mills and open double mills
//! - Decided games

use crate::board::{Board, Color, Phase, FLYING_STONES, LAST_PLACING_TURN};
use crate::rules::winner;

use super::patterns::{
    blocked_stones, mill_count, open_double_mills, open_mills, three_piece_configurations,
    two_piece_configurations, RatingWeights, RATING_SCALE,
};

/// Own-minus-opponent differences feeding the weighted sum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Criteria {
    pub removing: i32,
    pub mills: i32,
    pub blocked: i32,
    pub stones: i32,
    pub two_piece: i32,
    /// Counts each configuration twice, see [`RATING_SCALE`]
    pub three_piece: i32,
    pub open_double_mills: i32,
    pub open_mills: i32,
    pub win: i32,
}

impl Criteria {
    /// Measure every criterion from the side to move's point of view
    pub fn measure(board: &Board) -> Self {
        let me = board.current_player();
        let opp = me.opponent();
        let diff = |f: fn(&Board, Color) -> i32| f(board, me) - f(board, opp);

        Self {
            removing: i32::from(board.phase() == Phase::Removing),
            mills: diff(mill_count),
            // More blocked opponent stones is good
            blocked: -diff(blocked_stones),
            stones: board.stone_count(me) as i32 - board.stone_count(opp) as i32,
            two_piece: diff(two_piece_configurations),
            three_piece: diff(three_piece_configurations),
            open_double_mills: diff(open_double_mills),
            open_mills: diff(open_mills),
            win: match winner(board) {
                None => 0,
                Some(w) if w == me => 1,
                Some(_) => -1,
            },
        }
    }

    /// Weighted sum of the criteria in half points
    pub fn score(&self, w: &RatingWeights) -> i32 {
        let whole = w.removing * self.removing
            + w.mills * self.mills
            + w.blocked * self.blocked
            + w.stones * self.stones
            + w.two_piece * self.two_piece
            + w.open_double_mills * self.open_double_mills
            + w.open_mills * self.open_mills
            + w.win * self.win;
        RATING_SCALE * whole + w.three_piece * self.three_piece
    }
}

/// Whether the position is scored with the placing-phase weights.
///
/// A removal pending during the placing turns still counts as placing.
fn in_placing_stage(board: &Board) -> bool {
    match board.phase() {
        Phase::Placing => true,
        Phase::Removing => board.turn() <= LAST_PLACING_TURN,
        Phase::Moving => false,
    }
}

/// Evaluate the board from the perspective of the given color.
///
/// Returns a score in half points where:
/// - Positive values indicate advantage for `color`
/// - Negative values indicate disadvantage for `color`
/// - Decided games in the moving phase are worth about ±1 000 000
#[must_use]
pub fn rating(board: &Board, color: Color) -> i32 {
    let criteria = Criteria::measure(board);

    let mut score = if in_placing_stage(board) {
        criteria.score(&RatingWeights::PLACING)
    } else {
        criteria.score(&RatingWeights::MOVING)
    };

    let endgame = board.turn() > LAST_PLACING_TURN
        && [Color::Black, Color::White]
            .iter()
            .any(|&c| board.stone_count(c) <= FLYING_STONES);
    if endgame {
        score += criteria.score(&RatingWeights::ENDGAME);
    }

    if color == board.current_player() {
        score
    } else {
        -score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Bitboard, Move, Pos};

    fn bb(fields: &[u8]) -> Bitboard {
        let mut b = Bitboard::new();
        for &i in fields {
            b.set(Pos::new(i));
        }
        b
    }

    #[test]
    fn test_empty_board_is_even() {
        let board = Board::new();
        assert_eq!(rating(&board, Color::White), 0);
        assert_eq!(rating(&board, Color::Black), 0);
    }

    #[test]
    fn test_rating_is_antisymmetric() {
        let mut board = Board::new();
        for i in [0, 9, 1, 10, 4] {
            board.perform_move(Move::Place { to: Pos::new(i) }).unwrap();
        }
        assert_eq!(rating(&board, Color::White), -rating(&board, Color::Black));
        assert_ne!(rating(&board, Color::White), 0);
    }

    #[test]
    fn test_placing_weights() {
        // Black to move, white has one more stone and a two-piece configuration
        let board = Board::from_parts(bb(&[]), bb(&[0, 1]), Color::Black, 2, Phase::Placing).unwrap();
        let criteria = Criteria::measure(&board);
        assert_eq!(criteria.stones, -2);
        assert_eq!(criteria.two_piece, -1);
        assert_eq!(rating(&board, Color::White), 2 * (9 * 2 + 10));
    }

    #[test]
    fn test_pending_removal_in_placing() {
        let board =
            Board::from_parts(bb(&[9, 10]), bb(&[0, 1, 2]), Color::White, 4, Phase::Removing).unwrap();
        let criteria = Criteria::measure(&board);
        assert_eq!(criteria.removing, 1);
        assert_eq!(criteria.mills, 1);
        // White 0 is hemmed in by 1 and 9
        assert_eq!(criteria.blocked, -1);
        // Black 9-10 needs field 11
        assert_eq!(criteria.two_piece, -1);
        assert_eq!(rating(&board, Color::White), 2 * (100 + 26 - 30 + 9 - 10));
    }

    #[test]
    fn test_decided_game_dominates() {
        // White to move is completely blocked
        let board = Board::from_parts(
            bb(&[21, 10, 4, 14, 5]),
            bb(&[0, 1, 2, 9]),
            Color::White,
            30,
            Phase::Moving,
        )
        .unwrap();
        assert_eq!(Criteria::measure(&board).win, -1);
        assert!(rating(&board, Color::Black) > 900_000);
        assert!(rating(&board, Color::White) < -900_000);
    }

    #[test]
    fn test_half_three_piece_configuration_counts() {
        // White to place with 1.5 three-piece configurations, black has none
        let board =
            Board::from_parts(bb(&[]), bb(&[0, 1, 4, 9]), Color::White, 4, Phase::Placing).unwrap();
        let criteria = Criteria::measure(&board);
        assert_eq!(criteria.three_piece, 3);
        let without_three_piece = Criteria {
            three_piece: 0,
            ..criteria
        };
        // 7 points per configuration, 10.5 for one and a half
        assert_eq!(
            criteria.score(&RatingWeights::PLACING) - without_three_piece.score(&RatingWeights::PLACING),
            21
        );
        // Four stones, two-piece fields 2, 7 and 21, white 0 hemmed in by 1 and 9
        assert_eq!(rating(&board, Color::White), 2 * (9 * 4 + 10 * 3 - 30) + 21);
    }
}
