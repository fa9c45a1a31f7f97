//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the data files a session is built from:
//! - Task catalogs (RON or JSON)
//! - Game configuration (TOML)
//!
//! Content is read once at startup. A catalog that is missing, malformed or
//! empty is fatal: no partial session is ever built from it.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogFormat, ConfigLoader, ContentFactory, LoadResult, TaskLoader};
