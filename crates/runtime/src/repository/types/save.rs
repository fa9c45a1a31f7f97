//! Save file envelope.
//!
//! A save wraps the canonical [`GameState`] with a format version and a
//! SHA-256 digest of the bincode-encoded state, so a tampered or truncated
//! file is rejected on load instead of resuming a corrupted session.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use valley_core::{GameConfig, GameState, Season};

use crate::repository::{RepositoryError, Result};

/// Current on-disk format version.
pub const SAVE_FORMAT_VERSION: u32 = 1;

/// Encoding used by file-backed repositories.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SaveFormat {
    /// Human-readable, diff-friendly.
    #[default]
    Json,
    /// Compact binary.
    Bincode,
}

impl SaveFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            SaveFormat::Json => "json",
            SaveFormat::Bincode => "bin",
        }
    }
}

/// Persisted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub format_version: u32,
    /// Lowercase hex SHA-256 of the bincode-encoded `state`.
    pub digest: String,
    /// Season cycle the session was played with.
    pub seasons: Vec<Season>,
    pub state: GameState,
    /// Rules the session was created with.
    #[serde(default)]
    pub config: Option<GameConfig>,
}

impl SaveFile {
    /// Wraps a state, computing its digest.
    pub fn seal(state: GameState, config: Option<GameConfig>) -> Result<Self> {
        let digest = state_digest(&state)?;
        Ok(Self {
            format_version: SAVE_FORMAT_VERSION,
            digest,
            seasons: Season::ALL.to_vec(),
            state,
            config,
        })
    }

    /// Checks the format version and that the digest matches the state.
    pub fn verify(&self) -> Result<()> {
        if self.format_version != SAVE_FORMAT_VERSION {
            return Err(RepositoryError::UnsupportedVersion {
                found: self.format_version,
                supported: SAVE_FORMAT_VERSION,
            });
        }
        let computed = state_digest(&self.state)?;
        if computed != self.digest {
            return Err(RepositoryError::DigestMismatch {
                recorded: self.digest.clone(),
                computed,
            });
        }
        Ok(())
    }

    /// Nonce of the last command applied to the saved state.
    pub fn nonce(&self) -> u64 {
        self.state.turn.nonce
    }
}

/// SHA-256 of the bincode encoding of `state`, as lowercase hex.
pub fn state_digest(state: &GameState) -> Result<String> {
    let bytes =
        bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}
