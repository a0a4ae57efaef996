//! Mill detection and removal eligibility

use crate::board::topology::{line_partners, Axis};
use crate::board::{Bitboard, Board, Color, Pos, FLYING_STONES};

/// Check if the stone on `pos` completes a mill along `axis`.
///
/// Returns false for an empty field.
#[inline]
pub fn check_mill_on_axis(board: &Board, pos: Pos, axis: Axis) -> bool {
    match board.get(pos) {
        Some(color) => line_partners(pos, axis)
            .iter()
            .all(|&p| board.has_stone(p, color)),
        None => false,
    }
}

#[inline]
pub fn check_mill_horizontal(board: &Board, pos: Pos) -> bool {
    check_mill_on_axis(board, pos, Axis::Horizontal)
}

#[inline]
pub fn check_mill_vertical(board: &Board, pos: Pos) -> bool {
    check_mill_on_axis(board, pos, Axis::Vertical)
}

/// Check if the stone on `pos` is part of any closed mill
#[inline]
pub fn check_mill(board: &Board, pos: Pos) -> bool {
    check_mill_horizontal(board, pos) || check_mill_vertical(board, pos)
}

/// Stones of `color` that may be taken: those outside every closed mill
pub fn removable_stones(board: &Board, color: Color) -> Bitboard {
    let mut result = Bitboard::new();
    for pos in board.stones(color).iter_ones() {
        if !check_mill(board, pos) {
            result.set(pos);
        }
    }
    result
}

/// Whether closing a mill against `color` leads into the removing phase.
///
/// A side down to flying stones always has to face a removal, which is
/// what lets the game end once it drops below three.
pub fn has_removable_stone(board: &Board, color: Color) -> bool {
    board.stone_count(color) <= FLYING_STONES || !removable_stones(board, color).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(white: &[u8], black: &[u8]) -> Board {
        let mut board = Board::new();
        for &i in white {
            board.place_stone(Pos::new(i), Color::White);
        }
        for &i in black {
            board.place_stone(Pos::new(i), Color::Black);
        }
        board
    }

    #[test]
    fn test_mill_detected_from_every_field_of_line() {
        let board = board_with(&[0, 1, 2], &[]);
        for i in [0, 1, 2] {
            assert!(check_mill_horizontal(&board, Pos::new(i)));
            assert!(!check_mill_vertical(&board, Pos::new(i)));
        }
    }

    #[test]
    fn test_vertical_mill() {
        let board = board_with(&[], &[8, 12, 17]);
        assert!(check_mill_vertical(&board, Pos::new(12)));
        assert!(check_mill(&board, Pos::new(17)));
        assert!(!check_mill_horizontal(&board, Pos::new(12)));
    }

    #[test]
    fn test_mixed_colors_are_no_mill() {
        let board = board_with(&[0, 1], &[2]);
        assert!(!check_mill(&board, Pos::new(0)));
        assert!(!check_mill(&board, Pos::new(2)));
        assert!(!check_mill(&board, Pos::new(5)));
    }

    #[test]
    fn test_removable_stones_skip_mills() {
        let board = board_with(&[0, 1, 2, 10, 20], &[]);
        let removable: Vec<usize> = removable_stones(&board, Color::White)
            .iter_ones()
            .map(Pos::to_index)
            .collect();
        assert_eq!(removable, vec![10, 20]);
        assert!(has_removable_stone(&board, Color::White));
    }

    #[test]
    fn test_all_stones_in_mills() {
        let board = board_with(&[0, 1, 2, 3, 4, 5], &[]);
        assert!(removable_stones(&board, Color::White).is_empty());
        assert!(!has_removable_stone(&board, Color::White));

        // Three stones left always count
        let board = board_with(&[0, 1, 2], &[]);
        assert!(has_removable_stone(&board, Color::White));
    }
}
