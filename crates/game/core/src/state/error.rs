//! Session initialization errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors raised while building a fresh session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InitializationError {
    #[error("a session needs at least one player")]
    NoPlayers,

    #[error("too many players (max: {max}, requested: {requested})")]
    TooManyPlayers { max: usize, requested: usize },

    #[error("player names must be unique and non-empty (got {name:?})")]
    InvalidPlayerName { name: String },

    #[error("task catalog is empty")]
    EmptyCatalog,
}

impl GameError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            InitializationError::EmptyCatalog => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            InitializationError::NoPlayers => "INIT_NO_PLAYERS",
            InitializationError::TooManyPlayers { .. } => "INIT_TOO_MANY_PLAYERS",
            InitializationError::InvalidPlayerName { .. } => "INIT_INVALID_PLAYER_NAME",
            InitializationError::EmptyCatalog => "INIT_EMPTY_CATALOG",
        }
    }
}
