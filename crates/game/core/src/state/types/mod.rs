pub mod common;
pub mod objectives;
pub mod player;
pub mod task;
pub mod turn;

// Re-export common types
pub use common::{NodeId, PlayerId, ResourceCost, ResourceKind, ResourcePool};

// Re-export objective bookkeeping
pub use objectives::ObjectiveBoard;

// Re-export player types
pub use player::{PlayerColor, PlayerState};

// Re-export task types
pub use task::{Task, TaskCategory, TaskDefinition, TaskFlags, format_amount, render_description};

// Re-export turn state
pub use turn::{GameOutcome, TurnPhase, TurnState};
