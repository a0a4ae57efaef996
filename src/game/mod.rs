//! Match controller
//!
//! [`GameState`] owns the live board and drives a match the way a UI would:
//! human moves come in through [`GameState::try_move`], computer moves are
//! computed either synchronously or on a worker thread, and match-wide
//! draws (threefold repetition, 50 turns without a mill) are detected here.

pub mod config;

pub use config::{MatchConfig, PlayerKind, MAX_DECISION_TIME_MS};

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Move, Phase, Pos};
use crate::engine::{execute_move, AIEngine, MoveHost, MoveResult};
use crate::error::{ConfigError, GameError, MoveError};
use crate::search::DrawTable;

/// Occurrences of one position that end the match
pub const REPETITION_LIMIT: u32 = 3;

/// Turns without a closed mill that end the match
pub const TURNS_WITHOUT_MILL: u32 = 50;

/// Why a match ended in a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawReason {
    /// Same stone placement reached for the third time
    Repetition,
    /// Too many turns without a closed mill
    NoMill,
}

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Winner(Color),
    Draw(DrawReason),
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        color: Color,
        receiver: Receiver<(MoveResult, AIEngine)>,
        start_time: Instant,
    },
}

/// Main game state
pub struct GameState {
    board: Board,
    config: MatchConfig,
    draw_table: DrawTable,
    /// Turn in which the last mill was closed
    last_mill_turn: Option<u32>,
    outcome: Option<GameOutcome>,
    /// Computer players by color index; taken out while one is thinking
    engines: [Option<AIEngine>; 2],
    ai_state: AiState,
    move_history: Vec<Move>,
    last_ai_result: Option<MoveResult>,
}

impl GameState {
    /// Start a match with a validated configuration
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let engines = [
            build_engine(&config, Color::Black),
            build_engine(&config, Color::White),
        ];
        Ok(Self {
            board: Board::new(),
            config,
            draw_table: DrawTable::new(),
            last_mill_turn: None,
            outcome: None,
            engines,
            ai_state: AiState::Idle,
            move_history: Vec::new(),
            last_ai_result: None,
        })
    }

    /// Start a new match with the same configuration
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.draw_table.clear();
        self.last_mill_turn = None;
        self.outcome = None;
        self.engines = [
            build_engine(&self.config, Color::Black),
            build_engine(&self.config, Color::White),
        ];
        self.ai_state = AiState::Idle;
        self.move_history.clear();
        self.last_ai_result = None;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn last_ai_result(&self) -> Option<&MoveResult> {
        self.last_ai_result.as_ref()
    }

    /// Check if it's a human's turn
    pub fn is_human_turn(&self) -> bool {
        self.config.player(self.board.current_player()).is_human()
    }

    /// Check if it's a computer's turn
    pub fn is_ai_turn(&self) -> bool {
        !self.is_human_turn()
    }

    /// Check if a computer is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Attempt a human move
    pub fn try_move(&mut self, mv: Move) -> Result<(), GameError> {
        if self.outcome.is_some() {
            return Err(GameError::MatchOver);
        }
        if self.is_ai_thinking() {
            return Err(GameError::AiThinking);
        }
        if !self.is_human_turn() {
            return Err(GameError::NotHumanTurn);
        }
        self.apply(mv)?;
        Ok(())
    }

    /// Let the computer on turn move right away.
    ///
    /// Returns whether a move was applied.
    pub fn play_ai_turn(&mut self) -> bool {
        if self.outcome.is_some() || self.is_ai_thinking() {
            return false;
        }
        let idx = self.board.current_player().index();
        let Some(mut engine) = self.engines[idx].take() else {
            return false;
        };
        let moved = engine.make_move(self);
        self.last_ai_result = engine.last_result().cloned();
        self.engines[idx] = Some(engine);
        moved
    }

    /// Start computing the computer's move on a worker thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.outcome.is_some() {
            return;
        }
        let color = self.board.current_player();
        let Some(mut engine) = self.engines[color.index()].take() else {
            return;
        };

        let board = self.board;
        let draw_table = self.draw_table.clone();
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.get_move_with_stats(&board, &draw_table);
            let _ = tx.send((result, engine));
        });

        self.ai_state = AiState::Thinking {
            color,
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Apply the computer's move once it is ready and shown long enough.
    ///
    /// The move is held back until the decision time has passed since
    /// thinking started. Returns whether a move was applied.
    pub fn check_ai_result(&mut self) -> bool {
        let received = match &self.ai_state {
            AiState::Thinking {
                color,
                receiver,
                start_time,
            } => {
                if start_time.elapsed() < self.config.decision_time() {
                    return false;
                }
                match receiver.try_recv() {
                    Ok(message) => message,
                    Err(TryRecvError::Empty) => return false,
                    Err(TryRecvError::Disconnected) => {
                        error!("[AI {color:?}] worker stopped without a result");
                        let color = *color;
                        self.engines[color.index()] = build_engine(&self.config, color);
                        self.ai_state = AiState::Idle;
                        return false;
                    }
                }
            }
            AiState::Idle => return false,
        };

        let (result, engine) = received;
        self.ai_state = AiState::Idle;
        let idx = engine.color().index();
        self.engines[idx] = Some(engine);
        self.last_ai_result = Some(result.clone());

        if self.outcome.is_some() {
            return false;
        }
        match result.best_move {
            Some(mv) => execute_move(self, mv),
            None => {
                warn!("AI could not find a move");
                false
            }
        }
    }

    /// Apply a validated move and run the match bookkeeping
    fn apply(&mut self, mv: Move) -> Result<(), MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        let turn = self.board.turn();
        let mover = self.board.current_player();
        self.board.perform_move(mv)?;
        self.move_history.push(mv);
        debug!("{mover:?} played {mv}");

        if let Some(to) = mv.target() {
            if self.board.check_mill(to) {
                self.last_mill_turn = Some(turn);
            }
        }

        // A mill against stones that are all protected takes nothing
        if self.board.phase() == Phase::Removing
            && self.board.winner().is_none()
            && self.board.possible_moves().is_empty()
        {
            debug!("no stone can be removed, skipping removal");
            self.board.skip_removal()?;
        }

        // Turns ending in a removal are not counted for the draw rules
        if mv.phase() != Phase::Removing && self.board.phase() != Phase::Removing {
            if let Some(reason) = self.record_turn() {
                info!("match drawn: {reason:?}");
                self.outcome = Some(GameOutcome::Draw(reason));
                return Ok(());
            }
        }

        if let Some(winner) = self.board.winner() {
            info!("match won by {winner:?}");
            self.outcome = Some(GameOutcome::Winner(winner));
        }
        Ok(())
    }

    /// Count the completed turn's position and check the draw rules
    fn record_turn(&mut self) -> Option<DrawReason> {
        // Turn counter has already moved past the completed turn
        let completed = self.board.turn().saturating_sub(1);
        let since_mill = match self.last_mill_turn {
            Some(mill_turn) => completed.saturating_sub(mill_turn),
            None => completed + 1,
        };
        if since_mill >= TURNS_WITHOUT_MILL {
            return Some(DrawReason::NoMill);
        }
        if self.draw_table.record(self.board.state_hash()) >= REPETITION_LIMIT {
            return Some(DrawReason::Repetition);
        }
        None
    }
}

/// Engine for `color` if the configuration makes it a computer player
fn build_engine(config: &MatchConfig, color: Color) -> Option<AIEngine> {
    match config.player(color) {
        PlayerKind::Human => None,
        PlayerKind::Computer(difficulty) => {
            let engine = AIEngine::with_config(
                color,
                difficulty,
                config.search_depth,
                config.decision_time_ms,
            );
            Some(match config.seed {
                Some(seed) => engine.seeded(seed.wrapping_add(color.index() as u64 * 1000)),
                None => engine,
            })
        }
    }
}

impl MoveHost for GameState {
    fn snapshot(&self) -> Board {
        self.board
    }

    fn draw_table(&self) -> &DrawTable {
        &self.draw_table
    }

    fn place_on_field(&mut self, to: Pos) -> Result<(), MoveError> {
        self.apply(Move::Place { to })
    }

    fn slide_to_field(&mut self, from: Pos, to: Pos) -> Result<(), MoveError> {
        self.apply(Move::Slide { from, to })
    }

    fn remove_from_field(&mut self, from: Pos) -> Result<(), MoveError> {
        self.apply(Move::Remove { from })
    }
}
