use crate::board::{Move, Phase, Pos};

/// Reasons a move cannot be applied to (or undone from) a board.
///
/// The board is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("move belongs to the {found:?} phase but the board is in the {expected:?} phase")]
    PhaseMismatch { expected: Phase, found: Phase },

    #[error("game is already decided")]
    GameOver,

    #[error("field {0} is already occupied")]
    Occupied(Pos),

    #[error("field {0} holds no stone of the side to move")]
    NotOwnStone(Pos),

    #[error("field {0} holds no opponent stone")]
    NotOpponentStone(Pos),

    #[error("field {to} cannot be reached from field {from}")]
    NotAdjacent { from: Pos, to: Pos },

    #[error("stone on field {0} is protected by a closed mill")]
    ProtectedByMill(Pos),

    #[error("move `{0}` cannot be undone from this position")]
    CannotUndo(Move),

    #[error("an opponent stone can still be removed")]
    RemovalAvailable,
}

/// Errors building a board from external state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("field {0} is occupied by both colors")]
    Overlap(Pos),

    #[error("{count} stones of one color exceed the nine available")]
    TooManyStones { count: u32 },
}

/// Reasons the match controller refuses a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("match is over")]
    MatchOver,

    #[error("computer is thinking")]
    AiThinking,

    #[error("not a human player's turn")]
    NotHumanTurn,

    #[error(transparent)]
    Move(#[from] MoveError),
}

/// Errors that can occur when validating match configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config validation error: {0}")]
    Validation(String),
}
