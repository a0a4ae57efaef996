//! Pattern weights and counters for position evaluation
//!
//! Every counter scans the 24 fields once. Hypothetical placements are made
//! on a scratch copy of the board, which is a plain `Copy` value.

use crate::board::topology::{line_partners, neighbors, Axis};
use crate::board::{Board, Color, Pos, FIELD_COUNT};
use crate::rules::{check_mill, check_mill_on_axis};

/// Ratings are counted in half points.
///
/// Three-piece configurations are found once from each open end, so their
/// raw count is twice the number of configurations. Every other criterion is
/// scaled by this factor instead of halving that count.
pub const RATING_SCALE: i32 = 2;

/// Weights of the rating criteria for one stage of the game, in whole points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingWeights {
    /// Side to move is about to remove a stone
    pub removing: i32,
    /// Closed mills
    pub mills: i32,
    /// Opponent stones that cannot move, minus own
    pub blocked: i32,
    /// Stones on the board
    pub stones: i32,
    pub two_piece: i32,
    pub three_piece: i32,
    pub open_double_mills: i32,
    pub open_mills: i32,
    /// Decided game
    pub win: i32,
}

impl RatingWeights {
    /// While stones are being placed
    pub const PLACING: RatingWeights = RatingWeights {
        removing: 100,
        mills: 26,
        blocked: 30,
        stones: 9,
        two_piece: 10,
        three_piece: 7,
        open_double_mills: 0,
        open_mills: 0,
        win: 0,
    };

    /// Once all stones are on the board
    pub const MOVING: RatingWeights = RatingWeights {
        removing: 500,
        mills: 43,
        blocked: 30,
        stones: 11,
        two_piece: 0,
        three_piece: 0,
        open_double_mills: 1000,
        open_mills: 500,
        win: 500_000,
    };

    /// Added on top when either side is down to flying stones
    pub const ENDGAME: RatingWeights = RatingWeights {
        removing: 0,
        mills: 0,
        blocked: 0,
        stones: 0,
        two_piece: 100,
        three_piece: 500,
        open_double_mills: 0,
        open_mills: 0,
        win: 0,
    };
}

/// Board with one extra stone of `color` on `pos`
#[inline]
fn with_stone(board: &Board, pos: Pos, color: Color) -> Board {
    let mut scratch = *board;
    scratch.place_stone(pos, color);
    scratch
}

/// Empty fields that would complete a mill for `color`.
///
/// A field completing a horizontal and a vertical mill counts twice.
pub fn two_piece_configurations(board: &Board, color: Color) -> i32 {
    let mut count = 0;
    for pos in board.empty_fields().iter_ones() {
        let scratch = with_stone(board, pos, color);
        for axis in [Axis::Horizontal, Axis::Vertical] {
            if check_mill_on_axis(&scratch, pos, axis) {
                count += 1;
            }
        }
    }
    count
}

/// Whether the line through `pos` on `axis` has one own stone and one empty
/// field besides `pos`.
fn half_filled_line(board: &Board, pos: Pos, axis: Axis, color: Color) -> bool {
    let open_pair = |far: Pos, near: Pos| {
        (board.has_stone(far, color) && !board.is_occupied(near))
            || (!board.is_occupied(far) && board.has_stone(near, color))
    };
    if let Some(before) = axis.before(pos) {
        match (axis.before(before), axis.after(pos)) {
            (Some(far), _) => open_pair(far, before),
            (None, Some(after)) => open_pair(before, after),
            (None, None) => false,
        }
    } else {
        match axis.after(pos).and_then(|after| Some((after, axis.after(after)?))) {
            Some((after, far)) => open_pair(far, after),
            None => false,
        }
    }
}

/// Fields where one placement closes a mill while one of the mill's stones
/// already has a half-filled orthogonal line.
///
/// Each configuration is reached from both of its open ends, so the result
/// counts it twice. An odd result means half a configuration.
pub fn three_piece_configurations(board: &Board, color: Color) -> i32 {
    let mut count = 0;
    for pos in board.empty_fields().iter_ones() {
        let scratch = with_stone(board, pos, color);
        for axis in [Axis::Horizontal, Axis::Vertical] {
            if !check_mill_on_axis(&scratch, pos, axis) {
                continue;
            }
            // At most one hit per mill axis
            if line_partners(pos, axis)
                .iter()
                .any(|&partner| half_filled_line(&scratch, partner, axis.other(), color))
            {
                count += 1;
            }
        }
    }
    count
}

/// Closed mills of `color`.
///
/// Stones of a counted line are marked per axis, so two mills sharing a
/// stone count as two.
pub fn mill_count(board: &Board, color: Color) -> i32 {
    let mut counted = [[false; FIELD_COUNT]; 2];
    let mut count = 0;
    for pos in board.stones(color).iter_ones() {
        for (slot, axis) in [Axis::Horizontal, Axis::Vertical].into_iter().enumerate() {
            if counted[slot][pos.to_index()] || !check_mill_on_axis(board, pos, axis) {
                continue;
            }
            counted[slot][pos.to_index()] = true;
            for partner in line_partners(pos, axis) {
                counted[slot][partner.to_index()] = true;
            }
            count += 1;
        }
    }
    count
}

/// Empty fields completing a mill for `color` that an own stone next to the
/// field can close and no opponent stone next to it can block.
pub fn open_mills(board: &Board, color: Color) -> i32 {
    let mut count = 0;
    for pos in board.empty_fields().iter_ones() {
        let scratch = with_stone(board, pos, color);
        for axis in [Axis::Horizontal, Axis::Vertical] {
            if !check_mill_on_axis(&scratch, pos, axis) {
                continue;
            }
            // The closing stone has to arrive across the mill line
            let across = [axis.other().before(pos), axis.other().after(pos)];
            let blocked = across
                .iter()
                .flatten()
                .any(|&n| scratch.has_stone(n, color.opponent()));
            let closable = across.iter().flatten().any(|&n| scratch.has_stone(n, color));
            if !blocked && closable {
                count += 1;
            }
        }
    }
    count
}

/// Empty fields completing a mill for `color` next to an own stone that sits
/// in a closed mill already, so one stone can swing between both.
pub fn open_double_mills(board: &Board, color: Color) -> i32 {
    let mut count = 0;
    for pos in board.empty_fields().iter_ones() {
        let scratch = with_stone(board, pos, color);
        if !check_mill(&scratch, pos) {
            continue;
        }
        if neighbors(pos).any(|n| board.has_stone(n, color) && check_mill(board, n)) {
            count += 1;
        }
    }
    count
}

/// Stones of `color` sitting in a horizontal and a vertical mill at once
pub fn double_mills(board: &Board, color: Color) -> i32 {
    board
        .stones(color)
        .iter_ones()
        .filter(|&pos| {
            check_mill_on_axis(board, pos, Axis::Horizontal)
                && check_mill_on_axis(board, pos, Axis::Vertical)
        })
        .count() as i32
}

/// Stones of `color` whose neighbors are all occupied
pub fn blocked_stones(board: &Board, color: Color) -> i32 {
    board
        .stones(color)
        .iter_ones()
        .filter(|&pos| neighbors(pos).all(|n| board.is_occupied(n)))
        .count() as i32
}
