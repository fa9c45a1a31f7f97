//! Repository contracts for saving and loading sessions.

use crate::repository::Result;

pub use super::types::SaveFile;

/// Repository for session persistence.
///
/// Saves are indexed by the nonce of the state they hold, so a session can
/// keep several snapshots and resume from any of them.
pub trait StateRepository: Send + Sync {
    /// Save a session under `nonce`, replacing any previous save there.
    fn save(&self, nonce: u64, save: &SaveFile) -> Result<()>;

    /// Load the session saved under `nonce`.
    ///
    /// Implementations verify the digest before returning.
    fn load(&self, nonce: u64) -> Result<Option<SaveFile>>;

    /// Check if a save exists
    fn exists(&self, nonce: u64) -> bool;

    /// Delete a save
    fn delete(&self, nonce: u64) -> Result<()>;

    /// List all available save nonces, ascending
    fn list_nonces(&self) -> Result<Vec<u64>> {
        Ok(vec![])
    }

    /// Most recent save, if any.
    fn latest(&self) -> Result<Option<SaveFile>> {
        match self.list_nonces()?.last() {
            Some(nonce) => self.load(*nonce),
            None => Ok(None),
        }
    }

    /// Delete all saves in a range [start, end]
    fn delete_range(&self, start: u64, end: u64) -> Result<usize> {
        let mut deleted = 0;
        for nonce in start..=end {
            if self.exists(nonce) {
                self.delete(nonce)?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
