//! Content loaders for reading game data from files.
//!
//! Loaders convert RON/JSON/TOML files into `valley-core` types. Every
//! failure is reported as an [`anyhow::Error`] naming the offending file.

pub mod config;
pub mod factory;
pub mod tasks;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use tasks::{CatalogFormat, TaskLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
