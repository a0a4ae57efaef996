//! Nine men's morris rules engine with computer opponents
//!
//! Rules of the game as implemented here:
//! - 24 fields on three nested squares, 9 stones per player
//! - Placing phase for the first 18 turns, then stones slide to neighbors
//! - Closing a mill (three in a line) lets the mover remove an opponent stone
//!   that is not itself part of a closed mill
//! - A player down to three stones may fly to any empty field
//! - A player reduced to two stones or unable to slide loses
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards and the field graph
//! - [`rules`]: Game rules (mills, move generation, win conditions)
//! - [`eval`]: Position evaluation and heuristics
//! - [`search`]: Search algorithms (alpha-beta, greedy, random) and the draw table
//! - [`engine`]: Computer opponent integrating all components
//! - [`game`]: Match controller with draw rules and asynchronous AI turns
//!
//! # Quick Start
//!
//! ```
//! use mill::{AIEngine, Board, Color, Difficulty};
//! use mill::search::DrawTable;
//!
//! let mut board = Board::new();
//! let draw_table = DrawTable::new();
//! let mut engine = AIEngine::with_config(Color::White, Difficulty::Strong, 2, 500).seeded(7);
//!
//! if let Some(mv) = engine.get_move(&board, &draw_table) {
//!     board.perform_move(mv).unwrap();
//!     println!("AI plays {mv}");
//! }
//! assert_eq!(board.turn(), 1);
//! ```
//!
//! # Difficulties
//!
//! - Random: uniformly random legal move
//! - Easy: closes or blocks mills, otherwise extends lines
//! - Medium: alpha-beta search stopping at the decision time
//! - Strong: alpha-beta search always completing its depth

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Color, Move, Phase, Pos, FIELD_COUNT, STONES_PER_PLAYER};
pub use engine::{AIEngine, Difficulty, MoveHost, MoveResult, SearchType};
pub use error::{BoardError, ConfigError, GameError, MoveError};
pub use game::{DrawReason, GameOutcome, GameState, MatchConfig, PlayerKind};
