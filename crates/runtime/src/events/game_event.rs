//! Session events extracted from committed commands.
//!
//! Events describe what a command did in terms a presentation layer can
//! render without diffing state: who rolled what, which task changed hands,
//! when the game ended.

use serde::{Deserialize, Serialize};
use valley_core::{
    GameOutcome, NodeId, PendingDecision, PlayerId, ResourceCost, Season, TaskCategory, Weather,
};

use super::Topic;

/// High-level session events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    DiceRolled {
        player: PlayerId,
        face: u8,
        weather: Weather,
        max_moves: u8,
    },

    PlayerMoved {
        player: PlayerId,
        from: NodeId,
        to: NodeId,
        moves_remaining: u8,
    },

    /// The active seat changed.
    TurnEnded {
        ended: PlayerId,
        next: PlayerId,
        season: Season,
        years: u32,
        new_round: bool,
    },

    /// A started task ran out of ticks.
    TaskCompleted {
        player: PlayerId,
        node: NodeId,
        morale_delta: f32,
    },

    /// Every owned task in the locked category is done.
    CategoryReleased {
        player: PlayerId,
        category: TaskCategory,
    },

    TaskSelected {
        player: PlayerId,
        node: NodeId,
        category: TaskCategory,
        fee: ResourceCost,
        delegated: bool,
    },

    /// First selection in a category: the player now owns its objective.
    CategoryClaimed {
        player: PlayerId,
        category: TaskCategory,
    },

    ObjectiveReady {
        player: PlayerId,
        category: TaskCategory,
    },

    TaskStarted {
        player: PlayerId,
        node: NodeId,
        ticks: u32,
    },

    /// `grant` is `None` when the square had already been opened.
    ChanceOpened {
        player: PlayerId,
        node: NodeId,
        grant: Option<ResourceCost>,
    },

    TransferRequested {
        from: PlayerId,
        node: NodeId,
        target: PlayerId,
    },

    PendingResolved {
        player: PlayerId,
        node: NodeId,
        decision: PendingDecision,
    },

    GameOver(GameOutcome),

    SessionSaved {
        nonce: u64,
    },

    SessionLoaded {
        nonce: u64,
    },

    /// A command was refused; state is unchanged.
    CommandRejected {
        player: PlayerId,
        action: String,
        code: String,
    },
}

impl GameEvent {
    pub fn topic(&self) -> Topic {
        match self {
            GameEvent::DiceRolled { .. }
            | GameEvent::PlayerMoved { .. }
            | GameEvent::TurnEnded { .. }
            | GameEvent::TaskCompleted { .. }
            | GameEvent::CategoryReleased { .. } => Topic::Turn,

            GameEvent::TaskSelected { .. }
            | GameEvent::CategoryClaimed { .. }
            | GameEvent::ObjectiveReady { .. }
            | GameEvent::TaskStarted { .. }
            | GameEvent::ChanceOpened { .. }
            | GameEvent::TransferRequested { .. }
            | GameEvent::PendingResolved { .. } => Topic::Economy,

            GameEvent::GameOver(_)
            | GameEvent::SessionSaved { .. }
            | GameEvent::SessionLoaded { .. }
            | GameEvent::CommandRejected { .. } => Topic::Session,
        }
    }
}
