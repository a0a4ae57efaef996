//! Computer opponents and the host interface they play through
//!
//! [`AIEngine`] picks a move for one color according to its [`Difficulty`]:
//!
//! 1. **Random**: uniformly random legal move
//! 2. **Easy**: greedy rules (close a mill, block a mill, build a line)
//! 3. **Medium**: alpha-beta search that stops at the decision time
//! 4. **Strong**: alpha-beta search that always completes its depth
//!
//! Moves are carried out through a [`MoveHost`], the same primitives a human
//! player's input goes through.
//!
//! # Example
//!
//! ```
//! use mill::{AIEngine, Board, Color, Difficulty};
//! use mill::search::DrawTable;
//!
//! // Small depth for a fast example
//! let mut engine = AIEngine::with_config(Color::White, Difficulty::Strong, 2, 500).seeded(1);
//! let board = Board::new();
//!
//! let result = engine.get_move_with_stats(&board, &DrawTable::new());
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::str::FromStr;
use std::time::Instant;

use log::{debug, error, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Move, Pos};
use crate::error::{ConfigError, MoveError};
use crate::search::{
    greedy_move, random_move, DrawTable, SearchResult, Searcher, DEFAULT_DECISION_TIME_MS,
    DEFAULT_DEPTH,
};

/// Strength of a computer opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Random,
    Easy,
    #[default]
    Medium,
    Strong,
}

impl Difficulty {
    /// Whether the search stops once the decision time is spent
    #[inline]
    pub fn respects_time_limit(self) -> bool {
        !matches!(self, Difficulty::Strong)
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Difficulty::Random),
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "strong" => Ok(Difficulty::Strong),
            other => Err(ConfigError::Validation(format!("unknown difficulty `{other}`"))),
        }
    }
}

/// Type of search that produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// A root move wins on the spot
    WinningShortcut,
    /// Regular alpha-beta search result
    AlphaBeta,
    /// Search found nothing in time; random legal move instead
    RandomFallback,
    /// Random opponent
    Random,
    /// Greedy rule-based opponent
    Greedy,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Move to play, `None` when no legal move exists
    pub best_move: Option<Move>,
    /// Root value from the engine's point of view (0 unless searched)
    pub score: i32,
    /// Type of search that found this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    /// Result of a pick that did not search
    #[inline]
    fn unsearched(best_move: Option<Move>, search_type: SearchType, time_ms: u64) -> Self {
        Self {
            best_move,
            score: 0,
            search_type,
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn from_alphabeta(result: SearchResult, time_ms: u64) -> Self {
        let search_type = if result.shortcut {
            SearchType::WinningShortcut
        } else {
            SearchType::AlphaBeta
        };
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type,
            time_ms,
            nodes: result.nodes,
        }
    }
}

/// Owner of the live game that computer moves are applied to.
///
/// The three primitives validate against the live board and leave it
/// untouched on error.
pub trait MoveHost {
    /// Copy of the live board
    fn snapshot(&self) -> Board;

    /// Positions played so far in the match
    fn draw_table(&self) -> &DrawTable;

    fn place_on_field(&mut self, to: Pos) -> Result<(), MoveError>;

    fn slide_to_field(&mut self, from: Pos, to: Pos) -> Result<(), MoveError>;

    fn remove_from_field(&mut self, from: Pos) -> Result<(), MoveError>;
}

/// Carry out `mv` through the host primitives.
///
/// A move computed for a phase the live board has left is stale and
/// dropped. Returns whether the move was applied.
pub fn execute_move<H: MoveHost + ?Sized>(host: &mut H, mv: Move) -> bool {
    let live_phase = host.snapshot().phase();
    if mv.phase() != live_phase {
        warn!(
            "dropping stale move {mv}: computed for {:?} but the game is in {live_phase:?}",
            mv.phase()
        );
        return false;
    }

    let applied = match mv {
        Move::Place { to } => host.place_on_field(to),
        Move::Slide { from, to } => host.slide_to_field(from, to),
        Move::Remove { from } => host.remove_from_field(from),
    };
    match applied {
        Ok(()) => true,
        Err(e) => {
            error!("move {mv} was rejected: {e}");
            false
        }
    }
}

/// Computer opponent for one color.
///
/// # Configuration
///
/// - Difficulty (which kind of opponent)
/// - Search depth in plies
/// - Decision time in milliseconds (only Medium stops at it)
/// - Optional RNG seed for reproducible games
pub struct AIEngine {
    color: Color,
    difficulty: Difficulty,
    searcher: Searcher,
    /// Random and greedy picks, search fallback
    rng: ChaCha8Rng,
    last_result: Option<MoveResult>,
}

impl AIEngine {
    /// Medium engine with depth 4 and a 500 ms budget
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self::with_config(color, Difficulty::Medium, DEFAULT_DEPTH, DEFAULT_DECISION_TIME_MS)
    }

    /// Create an AI engine with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `color` - Color the engine plays
    /// * `difficulty` - Kind of opponent
    /// * `depth` - Search depth for alpha-beta
    /// * `decision_time_ms` - Time budget in milliseconds
    #[must_use]
    pub fn with_config(color: Color, difficulty: Difficulty, depth: u8, decision_time_ms: u64) -> Self {
        Self {
            color,
            difficulty,
            searcher: Searcher::with_config(depth, decision_time_ms, difficulty.respects_time_limit()),
            rng: ChaCha8Rng::from_entropy(),
            last_result: None,
        }
    }

    /// Seed every random choice of the engine
    #[must_use]
    pub fn seeded(mut self, seed: u64) -> Self {
        self.searcher = self.searcher.seeded(seed);
        self.rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
        self
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn depth(&self) -> u8 {
        self.searcher.depth()
    }

    /// Result of the last `make_move`
    #[must_use]
    pub fn last_result(&self) -> Option<&MoveResult> {
        self.last_result.as_ref()
    }

    /// Get the move for the given position.
    ///
    /// Convenience wrapper around `get_move_with_stats`.
    #[must_use]
    pub fn get_move(&mut self, board: &Board, draw_table: &DrawTable) -> Option<Move> {
        self.get_move_with_stats(board, draw_table).best_move
    }

    /// Pick a move for the side to move with search statistics.
    ///
    /// Searching engines fall back to a random legal move when the search
    /// produced none (time ran out before a root move finished, or every
    /// root move repeats a played position).
    #[must_use]
    pub fn get_move_with_stats(&mut self, board: &Board, draw_table: &DrawTable) -> MoveResult {
        let start = Instant::now();
        let elapsed_ms = |start: Instant| start.elapsed().as_millis() as u64;

        let result = match self.difficulty {
            Difficulty::Random => {
                let mv = random_move(board, &mut self.rng);
                MoveResult::unsearched(mv, SearchType::Random, elapsed_ms(start))
            }
            Difficulty::Easy => {
                let mv = greedy_move(board, &mut self.rng);
                MoveResult::unsearched(mv, SearchType::Greedy, elapsed_ms(start))
            }
            Difficulty::Medium | Difficulty::Strong => {
                let searched = self.searcher.search(board, self.color, draw_table);
                let mut result = MoveResult::from_alphabeta(searched, elapsed_ms(start));
                if result.best_move.is_none() {
                    warn!("[AI {:?}] no move could be calculated, making random decision", self.color);
                    result.best_move = random_move(board, &mut self.rng);
                    result.search_type = SearchType::RandomFallback;
                }
                result
            }
        };

        if result.best_move.is_none() {
            error!("[AI {:?}] no possible moves found", self.color);
        }
        result
    }

    /// Compute a move on a snapshot of the host and apply it.
    ///
    /// Does nothing and returns false when it is not this engine's turn.
    pub fn make_move<H: MoveHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let board = host.snapshot();
        if board.current_player() != self.color {
            error!("[AI {:?}] current player is not the engine", self.color);
            return false;
        }

        let result = self.get_move_with_stats(&board, host.draw_table());
        debug!(
            "[AI {:?}] {:?} picked {:?} (score {}, {} nodes, {}ms)",
            self.color, result.search_type, result.best_move, result.score, result.nodes, result.time_ms
        );
        let best_move = result.best_move;
        self.last_result = Some(result);

        match best_move {
            Some(mv) => execute_move(host, mv),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Bitboard, Phase};

    /// Minimal host applying moves straight to a board
    struct TestHost {
        board: Board,
        draw_table: DrawTable,
    }

    impl TestHost {
        fn new(board: Board) -> Self {
            Self {
                board,
                draw_table: DrawTable::new(),
            }
        }
    }

    impl MoveHost for TestHost {
        fn snapshot(&self) -> Board {
            self.board
        }

        fn draw_table(&self) -> &DrawTable {
            &self.draw_table
        }

        fn place_on_field(&mut self, to: Pos) -> Result<(), MoveError> {
            self.board.perform_move(Move::Place { to })
        }

        fn slide_to_field(&mut self, from: Pos, to: Pos) -> Result<(), MoveError> {
            self.board.perform_move(Move::Slide { from, to })
        }

        fn remove_from_field(&mut self, from: Pos) -> Result<(), MoveError> {
            self.board.perform_move(Move::Remove { from })
        }
    }

    fn bb(fields: &[u8]) -> Bitboard {
        let mut b = Bitboard::new();
        for &i in fields {
            b.set(Pos::new(i));
        }
        b
    }

    #[test]
    fn test_engine_creation() {
        let engine = AIEngine::new(Color::Black);
        assert_eq!(engine.color(), Color::Black);
        assert_eq!(engine.difficulty(), Difficulty::Medium);
        assert_eq!(engine.depth(), 4);
        assert!(engine.last_result().is_none());
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("Strong".parse::<Difficulty>().unwrap(), Difficulty::Strong);
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("brutal".parse::<Difficulty>().is_err());
        assert!(Difficulty::Medium.respects_time_limit());
        assert!(!Difficulty::Strong.respects_time_limit());
    }

    #[test]
    fn test_make_move_applies_legal_move() {
        let mut host = TestHost::new(Board::new());
        let mut engine = AIEngine::with_config(Color::White, Difficulty::Strong, 2, 100).seeded(3);

        assert!(engine.make_move(&mut host));
        assert_eq!(host.board.turn(), 1);
        assert_eq!(host.board.stone_count(Color::White), 1);
        assert_eq!(engine.last_result().unwrap().search_type, SearchType::AlphaBeta);
    }

    #[test]
    fn test_make_move_refuses_wrong_turn() {
        let mut host = TestHost::new(Board::new());
        let mut engine = AIEngine::with_config(Color::Black, Difficulty::Random, 2, 100);

        assert!(!engine.make_move(&mut host));
        assert_eq!(host.board, Board::new());
    }

    #[test]
    fn test_engine_finds_winning_shortcut() {
        let board = Board::from_parts(
            bb(&[9, 22, 23]),
            bb(&[0, 2, 4, 20]),
            Color::White,
            20,
            Phase::Moving,
        )
        .unwrap();
        let mut engine = AIEngine::with_config(Color::White, Difficulty::Medium, 4, 500).seeded(1);

        let result = engine.get_move_with_stats(&board, &DrawTable::new());
        assert_eq!(
            result.best_move,
            Some(Move::Slide { from: Pos::new(4), to: Pos::new(1) })
        );
        assert_eq!(result.search_type, SearchType::WinningShortcut);
    }

    #[test]
    fn test_time_starved_search_still_moves() {
        let mut host = TestHost::new(Board::new());
        let mut engine = AIEngine::with_config(Color::White, Difficulty::Medium, 4, 0).seeded(9);

        assert!(engine.make_move(&mut host));
        assert_eq!(host.board.stone_count(Color::White), 1);
        let search_type = engine.last_result().unwrap().search_type;
        assert!(matches!(
            search_type,
            SearchType::AlphaBeta | SearchType::RandomFallback
        ));
    }

    #[test]
    fn test_random_and_greedy_engines_move() {
        for difficulty in [Difficulty::Random, Difficulty::Easy] {
            let mut host = TestHost::new(Board::new());
            let mut engine = AIEngine::with_config(Color::White, difficulty, 4, 100).seeded(5);
            assert!(engine.make_move(&mut host));
            assert_eq!(host.board.turn(), 1);
        }
    }

    #[test]
    fn test_execute_move_drops_stale_move() {
        let mut host = TestHost::new(Board::new());
        assert!(!execute_move(&mut host, Move::Remove { from: Pos::new(3) }));
        assert_eq!(host.board, Board::new());
        assert!(execute_move(&mut host, Move::Place { to: Pos::new(3) }));
    }

    #[test]
    fn test_no_move_when_game_decided() {
        // White to move is completely blocked
        let board = Board::from_parts(
            bb(&[21, 10, 4, 14, 5]),
            bb(&[0, 1, 2, 9]),
            Color::White,
            30,
            Phase::Moving,
        )
        .unwrap();
        let mut host = TestHost::new(board);
        let mut engine = AIEngine::with_config(Color::White, Difficulty::Strong, 3, 100);

        assert!(!engine.make_move(&mut host));
        assert_eq!(host.board, board);
    }
}
