//! Shared types for repository layer.

mod save;

pub use save::{SAVE_FORMAT_VERSION, SaveFile, SaveFormat, state_digest};
