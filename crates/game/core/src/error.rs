//! Common error infrastructure for valley-core.
//!
//! Domain-specific errors (`TurnError`, `MoveError`, `TaskError`) are defined
//! next to the commands they validate. This module provides the shared
//! severity classification and error codes.
//!
//! Every rejected command leaves the state untouched, so callers can always
//! retry with a different command. The only unrecoverable in-session
//! condition is game over.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The command was illegal right now; another command may succeed.
    ///
    /// Examples: not adjacent, already visited, insufficient resources
    Recoverable,

    /// Invalid input that should not be retried unchanged.
    ///
    /// Examples: unknown node, unknown player
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: occupant missing from its node, owned task without a node
    Internal,

    /// The session cannot continue.
    ///
    /// Examples: game over, missing oracle
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all valley-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
