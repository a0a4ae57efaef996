//! Rule-of-thumb opponents that do not search
//!
//! `random_move` picks uniformly among legal moves. `greedy_move` tries, in
//! order:
//! 1. Close an own mill
//! 2. Occupy a field where the opponent could close a mill next turn
//! 3. While placing, extend a lone stone along an empty line
//! 4. Anything random
//!
//! Removals are always random.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::topology::{are_adjacent, line_partners, Axis};
use crate::board::{Bitboard, Board, Color, Move, Phase, Pos, LAST_PLACING_TURN};
use crate::rules::{check_mill_on_axis, generate_moves};

/// Uniformly random legal move
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Move> {
    generate_moves(board).choose(rng).copied()
}

/// Whether `color` moving a stone from `from` (if any) onto `to` closes a mill.
///
/// Moving a stone along its own line does not count.
fn would_close_mill(board: &Board, from: Option<Pos>, to: Pos, color: Color) -> bool {
    let mut scratch = *board;
    if let Some(from) = from {
        scratch.remove_stone(from);
    }
    scratch.place_stone(to, color);
    [Axis::Horizontal, Axis::Vertical]
        .into_iter()
        .any(|axis| check_mill_on_axis(&scratch, to, axis))
}

/// Empty fields on which `color` could close a mill with its next move
fn mill_threats(board: &Board, color: Color, next_phase: Phase) -> Bitboard {
    let empty = board.empty_fields();
    let mut threats = Bitboard::new();
    for to in empty.iter_ones() {
        let closes = match next_phase {
            Phase::Placing => would_close_mill(board, None, to, color),
            _ => board.stones(color).iter_ones().any(|from| {
                (board.can_fly(color) || are_adjacent(from, to))
                    && would_close_mill(board, Some(from), to, color)
            }),
        };
        if closes {
            threats.set(to);
        }
    }
    threats
}

/// Empty line fields next to own stones that sit alone on an otherwise
/// empty line, in both directions.
fn line_extensions(board: &Board, color: Color) -> Vec<Pos> {
    let mut fields = Vec::new();
    for pos in board.stones(color).iter_ones() {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let partners = line_partners(pos, axis);
            if partners.iter().all(|&p| !board.is_occupied(p)) {
                fields.extend(partners);
            }
        }
    }
    fields
}

/// Pick a move by simple local rules, falling back to a random one
pub fn greedy_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Move> {
    let moves = generate_moves(board);
    if board.phase() == Phase::Removing {
        return moves.choose(rng).copied();
    }

    let me = board.current_player();

    // 1. Close a mill
    if let Some(&mv) = moves.iter().find(|mv| match mv.target() {
        Some(to) => would_close_mill(board, mv.source(), to, me),
        None => false,
    }) {
        return Some(mv);
    }

    // 2. Block the first field where the opponent would close a mill
    let opponent_phase = if board.turn() < LAST_PLACING_TURN {
        Phase::Placing
    } else {
        Phase::Moving
    };
    let threats = mill_threats(board, me.opponent(), opponent_phase);
    for field in threats.iter_ones() {
        if let Some(&mv) = moves.iter().find(|mv| mv.target() == Some(field)) {
            return Some(mv);
        }
    }

    // 3. Build towards a mill while the whole board is still open
    if board.phase() == Phase::Placing {
        if let Some(&to) = line_extensions(board, me).choose(rng) {
            return Some(Move::Place { to });
        }
    }

    moves.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bb(fields: &[u8]) -> Bitboard {
        let mut b = Bitboard::new();
        for &i in fields {
            b.set(Pos::new(i));
        }
        b
    }

    #[test]
    fn test_random_move_is_legal() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let board = Board::new();
        let mv = random_move(&board, &mut rng).unwrap();
        assert!(generate_moves(&board).contains(&mv));
    }

    #[test]
    fn test_greedy_closes_mill() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let board =
            Board::from_parts(bb(&[9, 10]), bb(&[0, 1]), Color::White, 4, Phase::Placing).unwrap();
        assert_eq!(
            greedy_move(&board, &mut rng),
            Some(Move::Place { to: Pos::new(2) })
        );
    }

    #[test]
    fn test_greedy_blocks_opponent_mill() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let board =
            Board::from_parts(bb(&[0, 1]), bb(&[9, 20]), Color::White, 4, Phase::Placing).unwrap();
        assert_eq!(
            greedy_move(&board, &mut rng),
            Some(Move::Place { to: Pos::new(2) })
        );
    }

    #[test]
    fn test_greedy_slides_into_mill() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // White 0, 2 and 4: sliding 4 up to field 1 closes the top row
        let board = Board::from_parts(
            bb(&[21, 22, 18, 19]),
            bb(&[0, 2, 4, 15]),
            Color::White,
            20,
            Phase::Moving,
        )
        .unwrap();
        assert_eq!(
            greedy_move(&board, &mut rng),
            Some(Move::Slide { from: Pos::new(4), to: Pos::new(1) })
        );
    }

    #[test]
    fn test_greedy_extends_lone_stone() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let board =
            Board::from_parts(bb(&[23]), bb(&[4]), Color::White, 2, Phase::Placing).unwrap();
        let candidates = [3, 5, 1, 7].map(|i| Move::Place { to: Pos::new(i) });
        let mv = greedy_move(&board, &mut rng).unwrap();
        assert!(candidates.contains(&mv), "unexpected move {mv}");
    }

    #[test]
    fn test_greedy_removes_removable_stone() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let board = Board::from_parts(
            bb(&[9, 10, 11, 20]),
            bb(&[0, 1, 2]),
            Color::White,
            6,
            Phase::Removing,
        )
        .unwrap();
        assert_eq!(
            greedy_move(&board, &mut rng),
            Some(Move::Remove { from: Pos::new(20) })
        );
    }
}
