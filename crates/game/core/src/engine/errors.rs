//! Error types for the command execution pipeline.

use crate::action::{MoveError, TaskError, TurnError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameOutcome, PlayerId, TurnPhase};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing a command through the engine.
///
/// A rejected command never mutates the session.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ExecuteError {
    #[error("turn command failed: {0}")]
    Turn(TransitionPhaseError<TurnError>),

    #[error("move failed: {0}")]
    Move(TransitionPhaseError<MoveError>),

    #[error("task command failed: {0}")]
    Task(TransitionPhaseError<TaskError>),

    #[error("not your turn: {actor} acted while {active} is active")]
    NotYourTurn { actor: PlayerId, active: PlayerId },

    #[error("{action} is not accepted while {phase}")]
    WrongPhase {
        action: &'static str,
        phase: TurnPhase,
    },

    #[error("game over: {} ran out of {}", .0.player, .0.depleted)]
    GameOver(GameOutcome),
}

impl ExecuteError {
    pub fn not_your_turn(actor: PlayerId, active: PlayerId) -> Self {
        Self::NotYourTurn { actor, active }
    }

    /// Turn-level reason, if this rejection came from a roll or end-turn.
    pub fn turn_error(&self) -> Option<&TurnError> {
        match self {
            ExecuteError::Turn(inner) => Some(&inner.error),
            _ => None,
        }
    }

    pub fn move_error(&self) -> Option<&MoveError> {
        match self {
            ExecuteError::Move(inner) => Some(&inner.error),
            _ => None,
        }
    }

    pub fn task_error(&self) -> Option<&TaskError> {
        match self {
            ExecuteError::Task(inner) => Some(&inner.error),
            _ => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExecuteError::Turn(inner) => inner.error.severity(),
            ExecuteError::Move(inner) => inner.error.severity(),
            ExecuteError::Task(inner) => inner.error.severity(),
            ExecuteError::NotYourTurn { .. } | ExecuteError::WrongPhase { .. } => {
                ErrorSeverity::Recoverable
            }
            ExecuteError::GameOver(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::Turn(inner) => inner.error.error_code(),
            ExecuteError::Move(inner) => inner.error.error_code(),
            ExecuteError::Task(inner) => inner.error.error_code(),
            ExecuteError::NotYourTurn { .. } => "EXECUTE_NOT_YOUR_TURN",
            ExecuteError::WrongPhase { .. } => "EXECUTE_WRONG_PHASE",
            ExecuteError::GameOver(_) => "EXECUTE_GAME_OVER",
        }
    }
}
