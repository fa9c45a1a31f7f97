//! In-memory StateRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::repository::types::SaveFile;
use crate::repository::{RepositoryError, Result, StateRepository};

/// In-memory implementation of StateRepository.
///
/// Saves are verified on load like their on-disk counterparts.
#[derive(Default)]
pub struct InMemoryStateRepo {
    saves: RwLock<BTreeMap<u64, SaveFile>>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, nonce: u64, save: &SaveFile) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(nonce, save.clone());
        Ok(())
    }

    fn load(&self, nonce: u64) -> Result<Option<SaveFile>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        match saves.get(&nonce) {
            Some(save) => {
                save.verify()?;
                Ok(Some(save.clone()))
            }
            None => Ok(None),
        }
    }

    fn exists(&self, nonce: u64) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(&nonce))
            .unwrap_or(false)
    }

    fn delete(&self, nonce: u64) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.remove(&nonce);
        Ok(())
    }

    fn list_nonces(&self) -> Result<Vec<u64>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valley_core::GameState;
    use valley_core::board::BoardGraph;

    #[test]
    fn latest_follows_highest_nonce() {
        let repo = InMemoryStateRepo::new();
        assert!(repo.latest().unwrap().is_none());

        for nonce in [3u64, 1, 8] {
            let mut state = GameState::new(nonce, "standard", BoardGraph::unlinked(1, 1));
            state.turn.nonce = nonce;
            repo.save(nonce, &SaveFile::seal(state, None).unwrap()).unwrap();
        }

        assert_eq!(repo.list_nonces().unwrap(), vec![1, 3, 8]);
        assert_eq!(repo.latest().unwrap().unwrap().nonce(), 8);
        repo.delete(8).unwrap();
        assert!(!repo.exists(8));
        assert_eq!(repo.latest().unwrap().unwrap().nonce(), 3);
    }
}
