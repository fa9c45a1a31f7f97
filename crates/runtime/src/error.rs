//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the engine, repositories and content loading so
//! clients can bubble them up with consistent context.

use thiserror::Error;
use valley_core::{ExecuteError, GameError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to initialize the session")]
    InitialState(#[source] valley_core::InitializationError),

    #[error("failed to load content: {0}")]
    Content(String),

    #[error("session has no state repository configured")]
    NoRepository,

    #[error("no saved session at nonce {0}")]
    SaveNotFound(u64),
}

impl RuntimeError {
    /// Engine rejection behind this error, if any.
    pub fn as_execute(&self) -> Option<&ExecuteError> {
        match self {
            RuntimeError::Execute(error) => Some(error),
            _ => None,
        }
    }

    /// True when the caller can simply retry with a different command.
    pub fn is_recoverable(&self) -> bool {
        self.as_execute()
            .is_some_and(|error| error.severity().is_recoverable())
    }
}
