//! Session orchestration for the valley board game.
//!
//! This crate wires the pure `valley-core` engine to the outside world:
//! content loading, persistence and event delivery. Consumers embed
//! [`GameSession`] to drive turns and subscribe to its [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session driver and its builder
//! - [`events`] provides the topic-based event bus
//! - [`repository`] persists sessions as digest-checked save files
pub mod error;
pub mod events;
pub mod repository;
pub mod session;

pub use error::{Result, RuntimeError};
pub use events::{EventBus, GameEvent, Topic, extract_events};
pub use repository::{
    FileStateRepository, InMemoryStateRepo, RepositoryError, SAVE_FORMAT_VERSION, SaveFile,
    SaveFormat, StateRepository, default_save_dir,
};
pub use session::{GameSession, SessionBuilder};
