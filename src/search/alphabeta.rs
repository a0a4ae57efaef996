//! Alpha-Beta search for nine men's morris
//!
//! Minimax with alpha-beta pruning over a single board that is mutated
//! and restored in place. Every applied move is undone on every exit path.
//!
//! # Features
//!
//! - Winning-move shortcut at the root
//! - Root move shuffling so equally rated moves vary between games
//! - Repetition guard: positions already played in the match, or already on
//!   the current search path, are not explored for the engine
//! - Cooperative time budget checked at every node
//! - Extra penalty for lines that lose right after the engine's next move
//!
//! # Example
//!
//! ```
//! use mill::board::{Board, Color};
//! use mill::search::{DrawTable, Searcher};
//!
//! let mut searcher = Searcher::with_config(2, 500, false).seeded(7);
//! let board = Board::new();
//!
//! let result = searcher.search(&board, Color::White, &DrawTable::new());
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: {best_move}");
//! }
//! ```

use std::time::{Duration, Instant};

use log::{debug, error};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;

use crate::board::{Board, Color, Move};
use crate::eval::RATING_SCALE;

use super::DrawTable;

/// Infinity score for alpha-beta bounds
pub const INF: i32 = i32::MAX;

/// Subtracted from a loss that happens right after the engine's next move
pub const LOSS_PENALTY: i32 = 500_000 * RATING_SCALE;

/// Default search depth in plies (removals count as plies)
pub const DEFAULT_DEPTH: u8 = 4;

/// Default time budget per decision
pub const DEFAULT_DECISION_TIME_MS: u64 = 500;

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best root move, if any root move finished its evaluation
    pub best_move: Option<Move>,
    /// Value of the root from the engine's point of view
    pub score: i32,
    /// Total nodes visited
    pub nodes: u64,
    /// Whether the move wins on the spot and no tree was searched
    pub shortcut: bool,
}

/// Mutable state of one search, created fresh for every call
struct SearchContext<'a> {
    /// Color the engine plays
    color: Color,
    stored_move: Option<Move>,
    start_time: Instant,
    /// Positions on the current search path
    visited: FxHashSet<u64>,
    /// Positions already played in the match
    draw_table: &'a DrawTable,
    nodes: u64,
    shortcut: bool,
}

impl<'a> SearchContext<'a> {
    fn new(color: Color, draw_table: &'a DrawTable) -> Self {
        Self {
            color,
            stored_move: None,
            start_time: Instant::now(),
            visited: FxHashSet::default(),
            draw_table,
            nodes: 0,
            shortcut: false,
        }
    }

    /// Whether the engine reaching `hash` repeats a played or pending position
    #[inline]
    fn is_repeated(&self, hash: u64) -> bool {
        self.draw_table.contains(hash) || self.visited.contains(&hash)
    }
}

/// Alpha-beta searcher with a fixed depth and an optional time budget.
///
/// The searcher itself only keeps its configuration and RNG, so one
/// instance can serve any number of searches.
pub struct Searcher {
    start_depth: u8,
    respect_time_limit: bool,
    decision_time: Duration,
    rng: ChaCha8Rng,
}

impl Searcher {
    /// Depth 4, 500 ms budget that is respected, entropy-seeded RNG
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DEPTH, DEFAULT_DECISION_TIME_MS, true)
    }

    /// Searcher with the given depth and the default time budget
    #[must_use]
    pub fn with_depth(depth: u8) -> Self {
        Self::with_config(depth, DEFAULT_DECISION_TIME_MS, true)
    }

    /// Create a searcher with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `depth` - Plies searched from the root
    /// * `decision_time_ms` - Time budget per search
    /// * `respect_time_limit` - Stop expanding nodes once the budget is spent
    #[must_use]
    pub fn with_config(depth: u8, decision_time_ms: u64, respect_time_limit: bool) -> Self {
        Self {
            start_depth: depth,
            respect_time_limit,
            decision_time: Duration::from_millis(decision_time_ms),
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Use a fixed RNG seed for reproducible move choice
    #[must_use]
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn depth(&self) -> u8 {
        self.start_depth
    }

    #[must_use]
    pub fn respects_time_limit(&self) -> bool {
        self.respect_time_limit
    }

    #[must_use]
    pub fn decision_time(&self) -> Duration {
        self.decision_time
    }

    /// Search the best move for `color`, which must be the side to move.
    ///
    /// `draw_table` holds the positions already played in the match.
    pub fn search(&mut self, board: &Board, color: Color, draw_table: &DrawTable) -> SearchResult {
        let mut ctx = SearchContext::new(color, draw_table);

        let mut work_board = *board;
        let score = self.alpha_beta(&mut ctx, &mut work_board, i32::from(self.start_depth), -INF, INF);
        debug_assert_eq!(work_board, *board, "search must restore the board");

        debug!(
            "found move {:?} with rating {} after {} nodes in {}ms",
            ctx.stored_move,
            score,
            ctx.nodes,
            ctx.start_time.elapsed().as_millis()
        );

        SearchResult {
            best_move: ctx.stored_move,
            score,
            nodes: ctx.nodes,
            shortcut: ctx.shortcut,
        }
    }

    fn alpha_beta(
        &mut self,
        ctx: &mut SearchContext<'_>,
        board: &mut Board,
        depth: i32,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        ctx.nodes += 1;
        let start_depth = i32::from(self.start_depth);

        let winner = board.winner();
        let out_of_time =
            self.respect_time_limit && ctx.start_time.elapsed() > self.decision_time;
        if winner.is_some() || depth <= 0 || out_of_time {
            // Losing is bad, losing right after our own next move is worse.
            // With a removal in between the opponent only moves one ply later.
            let loses_next = winner == Some(ctx.color.opponent())
                && (depth == start_depth - 2
                    || (depth == start_depth - 3 && board.current_player() != ctx.color));
            let penalty = if loses_next { LOSS_PENALTY } else { 0 };
            return board.rating(ctx.color) - penalty;
        }

        let mut moves = board.possible_moves();

        if depth == start_depth {
            for &mv in &moves {
                if !apply(board, mv) {
                    continue;
                }
                if board.winner() == Some(ctx.color) {
                    let score = board.rating(ctx.color);
                    revert(board, mv);
                    debug!("taking shortcut to win with {mv}");
                    ctx.stored_move = Some(mv);
                    ctx.shortcut = true;
                    return score;
                }
                revert(board, mv);
            }
            moves.shuffle(&mut self.rng);
        }

        if board.current_player() == ctx.color {
            // Engine maximizes; the running maximum is the new alpha
            let mut max_value = alpha;
            for mv in moves {
                if !apply(board, mv) {
                    continue;
                }
                let hash = board.state_hash();
                let value = if ctx.is_repeated(hash) {
                    debug!("skipping repeated position after {mv}");
                    max_value
                } else {
                    ctx.visited.insert(hash);
                    let value = self.alpha_beta(ctx, board, depth - 1, max_value, beta);
                    ctx.visited.remove(&hash);
                    value
                };
                revert(board, mv);

                if value > max_value {
                    max_value = value;
                    if max_value >= beta {
                        break;
                    }
                    if depth == start_depth {
                        ctx.stored_move = Some(mv);
                    }
                }
            }
            max_value
        } else {
            // Opponent minimizes; the running minimum is the new beta
            let mut min_value = beta;
            for mv in moves {
                if !apply(board, mv) {
                    continue;
                }
                let value = self.alpha_beta(ctx, board, depth - 1, alpha, min_value);
                revert(board, mv);

                if value < min_value {
                    min_value = value;
                    if min_value <= alpha {
                        break;
                    }
                }
            }
            min_value
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply a generated move, logging if the board rejects it
#[inline]
fn apply(board: &mut Board, mv: Move) -> bool {
    match board.perform_move(mv) {
        Ok(()) => true,
        Err(e) => {
            error!("search generated a rejected move {mv}: {e}");
            false
        }
    }
}

#[inline]
fn revert(board: &mut Board, mv: Move) {
    if let Err(e) = board.undo_move(mv) {
        error!("search could not undo {mv}: {e}");
    }
}
