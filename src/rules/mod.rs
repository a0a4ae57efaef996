//! Game rules for nine men's morris
//!
//! This module implements the rule set:
//! - Mill detection and removal eligibility
//! - Legal move generation for the three phases
//! - Win conditions (opponent reduced to two stones, blocked side to move)

pub mod mill;
pub mod movegen;
pub mod win;

// Re-exports for convenient access
pub use mill::{
    check_mill, check_mill_horizontal, check_mill_on_axis, check_mill_vertical,
    has_removable_stone, removable_stones,
};
pub use movegen::generate_moves;
pub use win::{can_slide, winner};
