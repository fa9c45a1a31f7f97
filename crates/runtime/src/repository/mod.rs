//! Repository layer for session persistence.
//!
//! Repositories hold data that changes during play. Static content (the
//! task catalog and rules) comes from `valley-content` instead.

mod error;
pub mod file;
pub mod memory;
mod traits;
pub mod types;

use std::path::PathBuf;

pub use error::{RepositoryError, Result};
pub use file::FileStateRepository;
pub use memory::InMemoryStateRepo;
pub use traits::StateRepository;
pub use types::{SAVE_FORMAT_VERSION, SaveFile, SaveFormat, state_digest};

/// Platform save directory (e.g. `~/.local/share/valley/saves` on Linux).
pub fn default_save_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "valley", "valley")
        .map(|dirs| dirs.data_dir().join("saves"))
}
