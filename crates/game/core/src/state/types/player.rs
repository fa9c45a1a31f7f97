use std::collections::{BTreeSet, VecDeque};

use super::common::{NodeId, PlayerId, ResourcePool};
use super::task::TaskCategory;

/// Token color of a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PlayerColor {
    /// Seat colors in turn order: red, blue, green, yellow.
    pub const PALETTE: [PlayerColor; 4] = [
        PlayerColor::rgb(220, 50, 47),
        PlayerColor::rgb(38, 139, 210),
        PlayerColor::rgb(133, 153, 0),
        PlayerColor::rgb(181, 137, 0),
    ];

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn for_seat(seat: PlayerId) -> Self {
        Self::PALETTE[seat.index() % Self::PALETTE.len()]
    }
}

/// Per-player resources, task ownership and per-turn bookkeeping.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    pub node: NodeId,
    pub resources: ResourcePool,
    /// Owned task nodes in selection order.
    pub tasks: Vec<NodeId>,
    /// Delegated task nodes awaiting an accept/decline decision.
    pub pending: VecDeque<NodeId>,
    /// Locked objective category.
    pub category: Option<TaskCategory>,
    pub progress_ticks: u32,
    /// Task explicitly started and still in progress.
    pub active_task: Option<NodeId>,
    pub morale: f32,
    /// Nodes entered during the current turn, including the starting node.
    pub visited: BTreeSet<NodeId>,
}

impl PlayerState {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        node: NodeId,
        resources: ResourcePool,
        morale: f32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: PlayerColor::for_seat(id),
            node,
            resources,
            tasks: Vec::new(),
            pending: VecDeque::new(),
            category: None,
            progress_ticks: 0,
            active_task: None,
            morale: morale.max(0.0),
            visited: BTreeSet::new(),
        }
    }

    /// True while an explicitly started task has not completed yet.
    #[inline]
    pub fn has_task_in_progress(&self) -> bool {
        self.active_task.is_some()
    }

    /// Applies a morale delta, never dropping below zero.
    pub fn apply_morale(&mut self, delta: f32) {
        self.morale = (self.morale + delta).max(0.0);
    }

    pub fn has_visited(&self, node: NodeId) -> bool {
        self.visited.contains(&node)
    }

    /// Clears the visited set and seeds it with the current node.
    pub fn begin_turn(&mut self) {
        self.visited.clear();
        self.visited.insert(self.node);
    }
}
