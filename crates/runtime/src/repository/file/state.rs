//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::types::{SaveFile, SaveFormat};
use crate::repository::{RepositoryError, Result, StateRepository};

/// File-based implementation of StateRepository.
///
/// Stores each save as `state_{nonce}.json` or `state_{nonce}.bin`,
/// depending on the configured [`SaveFormat`]. Writes go to a temporary file
/// first and are renamed into place, so a crash never leaves a half-written
/// save behind.
pub struct FileStateRepository {
    base_dir: PathBuf,
    format: SaveFormat,
}

impl FileStateRepository {
    /// Create a new file-based state repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>, format: SaveFormat) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir, format })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn format(&self) -> SaveFormat {
        self.format
    }

    /// Get the path to a save file.
    pub fn state_path(&self, nonce: u64) -> PathBuf {
        self.base_dir
            .join(format!("state_{}.{}", nonce, self.format.extension()))
    }

    fn encode(&self, save: &SaveFile) -> Result<Vec<u8>> {
        match self.format {
            SaveFormat::Json => {
                serde_json::to_vec_pretty(save).map_err(|e| RepositoryError::Json(e.to_string()))
            }
            SaveFormat::Bincode => {
                bincode::serialize(save).map_err(|e| RepositoryError::Serialization(e.to_string()))
            }
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<SaveFile> {
        match self.format {
            SaveFormat::Json => {
                serde_json::from_slice(bytes).map_err(|e| RepositoryError::Json(e.to_string()))
            }
            SaveFormat::Bincode => bincode::deserialize(bytes)
                .map_err(|e| RepositoryError::CorruptedData(e.to_string())),
        }
    }

    fn parse_nonce(&self, filename: &str) -> Option<u64> {
        let suffix = format!(".{}", self.format.extension());
        filename
            .strip_prefix("state_")?
            .strip_suffix(suffix.as_str())?
            .parse()
            .ok()
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, nonce: u64, save: &SaveFile) -> Result<()> {
        let path = self.state_path(nonce);
        let temp_path = path.with_extension(format!("{}.tmp", self.format.extension()));

        let bytes = self.encode(save)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(nonce, path = %path.display(), "saved session");
        Ok(())
    }

    fn load(&self, nonce: u64) -> Result<Option<SaveFile>> {
        let path = self.state_path(nonce);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let save = self.decode(&bytes)?;
        save.verify()?;

        tracing::debug!(nonce, path = %path.display(), "loaded session");
        Ok(Some(save))
    }

    fn exists(&self, nonce: u64) -> bool {
        self.state_path(nonce).exists()
    }

    fn delete(&self, nonce: u64) -> Result<()> {
        let path = self.state_path(nonce);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(nonce, "deleted save");
        }
        Ok(())
    }

    fn list_nonces(&self) -> Result<Vec<u64>> {
        let mut nonces = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            let nonce = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| self.parse_nonce(name));
            if let Some(nonce) = nonce {
                nonces.push(nonce);
            }
        }
        nonces.sort_unstable();
        Ok(nonces)
    }
}
