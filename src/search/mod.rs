//! Search module for the computer opponents
//!
//! Contains:
//! - Alpha-Beta search with a time budget and repetition guard
//! - Draw table of positions played in the match
//! - Random and greedy rule-of-thumb opponents

pub mod alphabeta;
pub mod draw_table;
pub mod greedy;

pub use alphabeta::{SearchResult, Searcher, DEFAULT_DECISION_TIME_MS, DEFAULT_DEPTH};
pub use draw_table::DrawTable;
pub use greedy::{greedy_move, random_move};
