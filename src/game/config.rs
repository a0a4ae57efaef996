//! Match configuration

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::engine::Difficulty;
use crate::error::ConfigError;
use crate::search::{DEFAULT_DECISION_TIME_MS, DEFAULT_DEPTH};

/// Longest decision time accepted
pub const MAX_DECISION_TIME_MS: u64 = 60_000;

/// Who plays one color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Computer(Difficulty),
}

impl PlayerKind {
    #[inline]
    pub fn is_human(self) -> bool {
        matches!(self, PlayerKind::Human)
    }
}

impl FromStr for PlayerKind {
    type Err = ConfigError;

    /// `human`, or a difficulty name for a computer player
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("human") {
            Ok(PlayerKind::Human)
        } else {
            s.parse().map(PlayerKind::Computer)
        }
    }
}

/// Settings of one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub white: PlayerKind,
    pub black: PlayerKind,
    /// Time a computer may think, and the minimum time before its move is shown
    pub decision_time_ms: u64,
    /// Alpha-beta depth in plies
    pub search_depth: u8,
    /// Seed for reproducible computer play; entropy when unset
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            white: PlayerKind::Human,
            black: PlayerKind::Computer(Difficulty::Medium),
            decision_time_ms: DEFAULT_DECISION_TIME_MS,
            search_depth: DEFAULT_DEPTH,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Computer against computer
    pub fn computer_match(white: Difficulty, black: Difficulty) -> Self {
        Self {
            white: PlayerKind::Computer(white),
            black: PlayerKind::Computer(black),
            ..Self::default()
        }
    }

    pub fn player(&self, color: Color) -> PlayerKind {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    #[inline]
    pub fn decision_time(&self) -> Duration {
        Duration::from_millis(self.decision_time_ms)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::Validation(
                "search_depth must be > 0".to_string(),
            ));
        }
        if self.decision_time_ms > MAX_DECISION_TIME_MS {
            return Err(ConfigError::Validation(format!(
                "decision_time_ms must be <= {MAX_DECISION_TIME_MS}, got {}",
                self.decision_time_ms
            )));
        }
        Ok(())
    }
}
