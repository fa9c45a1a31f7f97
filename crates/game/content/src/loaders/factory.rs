//! Content factory for loading session content from a data directory.

use std::path::{Path, PathBuf};

use valley_core::{GameConfig, TaskDefinition};

use crate::loaders::{ConfigLoader, LoadResult, TaskLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml     (optional)
/// └── tasks.ron       (or tasks.json)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const CATALOG_FILES: [&'static str; 2] = ["tasks.ron", "tasks.json"];

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or the defaults when the
    /// file does not exist.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the task catalog from `tasks.ron`, falling back to `tasks.json`.
    pub fn load_tasks(&self) -> LoadResult<Vec<TaskDefinition>> {
        let path = self.catalog_path().ok_or_else(|| {
            anyhow::anyhow!(
                "No task catalog in {} (expected one of {:?})",
                self.data_dir.display(),
                Self::CATALOG_FILES
            )
        })?;
        TaskLoader::load(&path)
    }

    /// Path of the first catalog file present in the data directory.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        Self::CATALOG_FILES
            .iter()
            .map(|name| self.data_dir.join(name))
            .find(|path| path.exists())
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
