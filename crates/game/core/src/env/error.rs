//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when a required oracle is missing from the environment.
///
/// The engine cannot proceed without them, so they are fatal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("ConfigOracle not available")]
    ConfigNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,

    #[error("DiceOracle not available")]
    DiceNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            OracleError::RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            OracleError::DiceNotAvailable => "ORACLE_DICE_NOT_AVAILABLE",
        }
    }
}
