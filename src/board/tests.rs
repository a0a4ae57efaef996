use super::*;
use crate::error::MoveError;

fn p(i: u8) -> Pos {
    Pos::new(i)
}

fn bb(fields: &[u8]) -> Bitboard {
    let mut b = Bitboard::new();
    for &i in fields {
        b.set(p(i));
    }
    b
}

#[test]
fn test_opening_moves_in_field_order() {
    let moves = Board::new().possible_moves();
    assert_eq!(moves.len(), FIELD_COUNT);
    assert_eq!(moves[0], Move::Place { to: p(0) });
    assert_eq!(moves[23], Move::Place { to: p(23) });
}

#[test]
fn test_flying_reaches_every_empty_field() {
    let board = Board::from_parts(
        bb(&[5, 6, 8, 9, 20]),
        bb(&[0, 1, 3]),
        Color::White,
        30,
        Phase::Moving,
    )
    .unwrap();
    assert!(board.can_fly(Color::White));
    let empty = board.empty_fields().count() as usize;
    assert_eq!(board.possible_moves().len(), 3 * empty);
    assert!(board
        .possible_moves()
        .contains(&Move::Slide { from: p(0), to: p(23) }));
}

#[test]
fn test_surrounded_side_loses() {
    let board = Board::from_parts(
        bb(&[4, 10, 14, 21]),
        bb(&[0, 1, 2, 9]),
        Color::White,
        30,
        Phase::Moving,
    )
    .unwrap();
    assert_eq!(board.winner(), Some(Color::Black));
    assert!(board.possible_moves().is_empty());
}

#[test]
fn test_surrounded_flyer_does_not_lose() {
    let board =
        Board::from_parts(bb(&[4, 10, 14, 21]), bb(&[0, 1, 2]), Color::White, 30, Phase::Moving)
            .unwrap();
    assert_eq!(board.winner(), None);
    assert!(!board.possible_moves().is_empty());
}

#[test]
fn test_removal_against_three_stones_decides_game() {
    let mut board = Board::from_parts(
        bb(&[9, 13, 20]),
        bb(&[0, 1, 2, 6]),
        Color::White,
        25,
        Phase::Removing,
    )
    .unwrap();
    assert_eq!(board.winner(), Some(Color::White));
    assert!(board.possible_moves().is_empty());
    assert_eq!(
        board.perform_move(Move::Remove { from: p(9) }),
        Err(MoveError::GameOver)
    );
}

#[test]
fn test_stones_in_mill_cannot_be_removed() {
    let mut board = Board::from_parts(
        bb(&[9, 10, 11, 20]),
        bb(&[0, 1, 2]),
        Color::White,
        6,
        Phase::Removing,
    )
    .unwrap();
    assert_eq!(board.possible_moves(), vec![Move::Remove { from: p(20) }]);
    assert_eq!(
        board.perform_move(Move::Remove { from: p(9) }),
        Err(MoveError::ProtectedByMill(p(9)))
    );
    board.perform_move(Move::Remove { from: p(20) }).unwrap();
    assert_eq!(board.stone_count(Color::Black), 3);
}

#[test]
fn test_skip_removal_when_nothing_removable() {
    let mut board =
        Board::from_parts(bb(&[9, 10, 11]), bb(&[0, 1, 2]), Color::White, 6, Phase::Removing)
            .unwrap();
    assert!(board.possible_moves().is_empty());
    assert_eq!(board.winner(), None);

    board.skip_removal().unwrap();
    assert_eq!(board.phase(), Phase::Placing);
    assert_eq!(board.current_player(), Color::Black);
    assert_eq!(board.turn(), 7);
    assert_eq!(board.stone_count(Color::Black), 3);
}

#[test]
fn test_skip_removal_rejected_when_stone_removable() {
    let mut board = Board::from_parts(
        bb(&[9, 10, 11, 20]),
        bb(&[0, 1, 2]),
        Color::White,
        6,
        Phase::Removing,
    )
    .unwrap();
    let before = board;
    assert_eq!(board.skip_removal(), Err(MoveError::RemovalAvailable));
    assert_eq!(board, before);

    let mut placing = Board::new();
    assert!(matches!(
        placing.skip_removal(),
        Err(MoveError::PhaseMismatch { .. })
    ));
}

#[test]
fn test_sliding_into_mill_enters_removing() {
    let mut board = Board::from_parts(
        bb(&[9, 10, 20, 23]),
        bb(&[0, 1, 6, 14]),
        Color::White,
        20,
        Phase::Moving,
    )
    .unwrap();
    board.perform_move(Move::Slide { from: p(14), to: p(2) }).unwrap();
    assert!(board.check_mill_horizontal(p(2)));
    assert!(!board.check_mill_vertical(p(2)));
    assert_eq!(board.phase(), Phase::Removing);
    assert_eq!(board.current_player(), Color::White);
    assert_eq!(board.turn(), 20);
}

#[test]
fn test_rating_is_antisymmetric() {
    let board = Board::from_parts(
        bb(&[9, 10, 20, 23]),
        bb(&[0, 1, 5, 6]),
        Color::White,
        20,
        Phase::Moving,
    )
    .unwrap();
    assert_eq!(board.rating(Color::White), -board.rating(Color::Black));
}

#[test]
fn test_board_json_round_trip() {
    let mut board = Board::new();
    for i in [0, 9, 1, 10, 2] {
        board.perform_move(Move::Place { to: p(i) }).unwrap();
    }
    let json = serde_json::to_string(&board).unwrap();
    assert_eq!(
        json,
        r#"{"black":1536,"white":7,"current_player":"White","turn":4,"phase":"Removing"}"#
    );
    assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);
}

#[test]
fn test_board_json_rejects_field_beyond_board() {
    // Bit 24 set next to fields 0-3
    let json = r#"{"black":16777231,"white":0,"current_player":"White","turn":20,"phase":"Moving"}"#;
    assert!(serde_json::from_str::<Board>(json).is_err());
}

#[test]
fn test_board_json_rejects_overlap_and_surplus() {
    let overlap = r#"{"black":1,"white":3,"current_player":"White","turn":2,"phase":"Placing"}"#;
    let err = serde_json::from_str::<Board>(overlap).unwrap_err();
    assert!(err.to_string().contains("occupied by both colors"));

    // Ten black stones on fields 0-9
    let surplus = r#"{"black":1023,"white":0,"current_player":"White","turn":20,"phase":"Moving"}"#;
    assert!(serde_json::from_str::<Board>(surplus).is_err());
}
