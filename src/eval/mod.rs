//! Evaluation module for nine men's morris positions
//!
//! This module provides pattern counting and scoring for board positions.
//! The evaluation considers:
//! - Mills, blocked stones and material
//! - Partial mill setups (two- and three-piece configurations)
//! - Open mills and open double mills
//! - Decided games

pub mod heuristic;
pub mod patterns;

pub use heuristic::{rating, Criteria};
pub use patterns::{
    blocked_stones, double_mills, mill_count, open_double_mills, open_mills,
    three_piece_configurations, two_piece_configurations, RatingWeights, RATING_SCALE,
};
