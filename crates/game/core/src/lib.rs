//! Deterministic rule engine for the valley board game.
//!
//! `valley-core` defines the canonical rules (board, weather, task economy,
//! turn flow) and exposes pure APIs reused by the runtime and the CLI. All
//! state mutation flows through [`engine::GameEngine`], and supporting crates
//! depend on the types re-exported here.
pub mod action;
pub mod board;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod weather;

pub use action::{
    Action, ActionResult, ActionTransition, ChanceOutcome, MoveError, PendingDecision,
    RollOutcome, SelectionOutcome, SelectionPreview, TaskError, TurnEnded, TurnError,
    TurnProgress,
};
pub use board::{BoardGraph, Node};
pub use config::GameConfig;
pub use engine::{ExecuteError, ExecutionOutcome, GameEngine, TransitionPhase, TransitionPhaseError};
pub use env::{
    ConfigOracle, DiceOracle, Env, GameEnv, LoadedDice, OracleError, PcgRng, RngOracle,
    StandardDice,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    GameOutcome, GameState, InitializationError, NodeId, ObjectiveBoard, PlayerColor, PlayerId,
    PlayerState, ResourceCost, ResourceKind, ResourcePool, Task, TaskCategory, TaskDefinition,
    TaskFlags, TurnPhase, TurnState,
};
pub use weather::{Season, Weather, WeatherTable};
