//! Property tests over positions reached by random legal play

use mill::{Board, Move, Phase, Pos};
use proptest::prelude::*;

/// Play the move picked by each choice, stopping when the game is decided
fn play(choices: &[usize]) -> Vec<Board> {
    let mut board = Board::new();
    let mut boards = vec![board];
    for &choice in choices {
        let moves = board.possible_moves();
        if moves.is_empty() {
            break;
        }
        board.perform_move(moves[choice % moves.len()]).unwrap();
        boards.push(board);
    }
    boards
}

/// Every syntactically possible move, legal or not
fn all_moves() -> Vec<Move> {
    let mut moves = Vec::new();
    for a in Pos::all() {
        moves.push(Move::Place { to: a });
        moves.push(Move::Remove { from: a });
        for b in Pos::all() {
            if a != b {
                moves.push(Move::Slide { from: a, to: b });
            }
        }
    }
    moves
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_perform_then_undo_restores_board(choices in prop::collection::vec(0usize..1000, 0..80)) {
        for board in play(&choices) {
            for mv in board.possible_moves() {
                let mut scratch = board;
                scratch.perform_move(mv).unwrap();
                scratch.undo_move(mv).unwrap();
                prop_assert_eq!(scratch, board, "move {}", mv);
            }
        }
    }

    #[test]
    fn test_only_enumerated_moves_apply(choices in prop::collection::vec(0usize..1000, 0..80)) {
        let boards = play(&choices);
        let board = boards[boards.len() - 1];
        let legal = board.possible_moves();
        for mv in all_moves() {
            let mut scratch = board;
            let applied = scratch.perform_move(mv);
            if legal.contains(&mv) {
                prop_assert!(applied.is_ok(), "legal move {} rejected", mv);
            } else {
                prop_assert!(applied.is_err(), "illegal move {} accepted", mv);
                prop_assert_eq!(scratch, board);
            }
        }
    }

    #[test]
    fn test_rating_antisymmetric(choices in prop::collection::vec(0usize..1000, 0..80)) {
        for board in play(&choices) {
            if board.winner().is_none() {
                prop_assert_eq!(
                    board.rating(mill::Color::White),
                    -board.rating(mill::Color::Black)
                );
            }
        }
    }

    #[test]
    fn test_state_hash_injective(choices in prop::collection::vec(0usize..1000, 0..80)) {
        let boards = play(&choices);
        for a in &boards {
            prop_assert!(a.state_hash() < 3u64.pow(24));
            for b in &boards {
                let same_stones = a.stones(mill::Color::White) == b.stones(mill::Color::White)
                    && a.stones(mill::Color::Black) == b.stones(mill::Color::Black);
                prop_assert_eq!(same_stones, a.state_hash() == b.state_hash());
            }
        }
    }

    #[test]
    fn test_phase_follows_turn(choices in prop::collection::vec(0usize..1000, 0..80)) {
        for board in play(&choices) {
            match board.phase() {
                Phase::Placing => prop_assert!(board.turn() <= 17),
                Phase::Moving => prop_assert!(board.turn() >= 18),
                Phase::Removing => {}
            }
        }
    }
}
