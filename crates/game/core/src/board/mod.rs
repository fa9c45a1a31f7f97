//! Board topology, occupancy and task placement.
//!
//! The board is a `rows × cols` grid of nodes plus a single hub. Edges are
//! undirected: [`BoardGraph::link`] always inserts both directions. The
//! topology is fixed once generated; occupancy and task status mutate.
mod generate;

use std::collections::{BTreeSet, VecDeque};

pub use generate::generate;

use crate::state::{NodeId, PlayerId, Task, TaskDefinition};

/// A board node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub neighbors: BTreeSet<NodeId>,
    pub task: Option<Task>,
    pub is_hub: bool,
    /// Players standing on this node (a node may hold several).
    pub occupants: Vec<PlayerId>,
}

impl Node {
    fn new(id: NodeId) -> Self {
        Self {
            id,
            neighbors: BTreeSet::new(),
            task: None,
            is_hub: id.is_hub(),
            occupants: Vec::new(),
        }
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

/// Node graph with exactly one hub (`NodeId::HUB`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardGraph {
    rows: u16,
    cols: u16,
    /// Indexed by `NodeId`; slot 0 is the hub.
    nodes: Vec<Node>,
}

impl BoardGraph {
    /// Creates the hub and grid nodes without any edges or tasks.
    pub fn unlinked(rows: u16, cols: u16) -> Self {
        let count = 1 + usize::from(rows) * usize::from(cols);
        let nodes = (0..count as u32).map(|i| Node::new(NodeId(i))).collect();
        Self { rows, cols, nodes }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Total node count, hub included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn hub(&self) -> &Node {
        &self.nodes[NodeId::HUB.index()]
    }

    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id)
            .into_iter()
            .flat_map(|node| node.neighbors.iter().copied())
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.node(id).map(Node::degree).unwrap_or(0)
    }

    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.node(a).is_some_and(|node| node.neighbors.contains(&b))
    }

    /// Adds an undirected edge; returns false if either node is unknown or `a == b`.
    pub fn link(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        self.nodes[a.index()].neighbors.insert(b);
        self.nodes[b.index()].neighbors.insert(a);
        true
    }

    /// Places a fresh task on a grid node; the hub never carries a task.
    pub fn place_task(&mut self, id: NodeId, definition: TaskDefinition) -> bool {
        match self.node_mut(id) {
            Some(node) if !node.is_hub => {
                node.task = Some(Task::new(definition));
                true
            }
            _ => false,
        }
    }

    pub fn task(&self, id: NodeId) -> Option<&Task> {
        self.node(id).and_then(|node| node.task.as_ref())
    }

    pub fn task_mut(&mut self, id: NodeId) -> Option<&mut Task> {
        self.node_mut(id).and_then(|node| node.task.as_mut())
    }

    /// Ids of nodes carrying a task, ascending.
    pub fn task_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|node| node.task.is_some())
            .map(|node| node.id)
    }

    /// Every node reachable from `start` (inclusive), by breadth-first search.
    pub fn reachable_from(&self, start: NodeId) -> BTreeSet<NodeId> {
        let mut seen = BTreeSet::new();
        if !self.contains(start) {
            return seen;
        }
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(current) = queue.pop_front() {
            for next in self.neighbors(current) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    pub fn is_connected(&self) -> bool {
        self.reachable_from(NodeId::HUB).len() == self.nodes.len()
    }

    /// Grid coordinates of a non-hub node.
    pub fn cell(&self, id: NodeId) -> Option<(u16, u16)> {
        if id.is_hub() || !self.contains(id) || self.cols == 0 {
            return None;
        }
        let offset = id.0 - 1;
        let cols = u32::from(self.cols);
        Some(((offset / cols) as u16, (offset % cols) as u16))
    }

    /// Orthogonal grid neighbours of a cell (up, left, down, right), whether linked or not.
    pub fn lattice_neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let Some((row, col)) = self.cell(id) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(4);
        if row > 0 {
            out.push(NodeId::grid(row - 1, col, self.cols));
        }
        if col > 0 {
            out.push(NodeId::grid(row, col - 1, self.cols));
        }
        if row + 1 < self.rows {
            out.push(NodeId::grid(row + 1, col, self.cols));
        }
        if col + 1 < self.cols {
            out.push(NodeId::grid(row, col + 1, self.cols));
        }
        out
    }

    pub fn add_occupant(&mut self, id: NodeId, player: PlayerId) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.occupants.push(player);
                true
            }
            None => false,
        }
    }

    /// Removes one occurrence of `player` from the node's occupants.
    pub fn remove_occupant(&mut self, id: NodeId, player: PlayerId) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        match node.occupants.iter().position(|p| *p == player) {
            Some(index) => {
                node.occupants.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_occupied_by(&self, id: NodeId, player: PlayerId) -> bool {
        self.node(id).is_some_and(|node| node.occupants.contains(&player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ResourceCost, TaskCategory};

    #[test]
    fn link_is_undirected_and_rejects_self_loops() {
        let mut board = BoardGraph::unlinked(2, 2);
        assert!(board.link(NodeId(1), NodeId(2)));
        assert!(board.are_adjacent(NodeId(2), NodeId(1)));
        assert!(!board.link(NodeId(3), NodeId(3)));
        assert!(!board.link(NodeId(3), NodeId(99)));
        assert_eq!(board.degree(NodeId(1)), 1);
    }

    #[test]
    fn hub_refuses_tasks() {
        let mut board = BoardGraph::unlinked(1, 2);
        let def = TaskDefinition::new("x", TaskCategory::Business, ResourceCost::new(1, 1));
        assert!(!board.place_task(NodeId::HUB, def.clone()));
        assert!(board.place_task(NodeId(2), def));
        assert_eq!(board.task_nodes().collect::<Vec<_>>(), vec![NodeId(2)]);
    }

    #[test]
    fn cell_and_lattice_neighbors() {
        let board = BoardGraph::unlinked(3, 4);
        assert_eq!(board.cell(NodeId(1)), Some((0, 0)));
        assert_eq!(board.cell(NodeId(12)), Some((2, 3)));
        assert_eq!(board.cell(NodeId::HUB), None);
        assert_eq!(board.lattice_neighbors(NodeId(1)), vec![NodeId(5), NodeId(2)]);
        assert_eq!(board.lattice_neighbors(NodeId(6)).len(), 4);
    }

    #[test]
    fn occupants_form_a_multiset() {
        let mut board = BoardGraph::unlinked(1, 1);
        board.add_occupant(NodeId::HUB, PlayerId(0));
        board.add_occupant(NodeId::HUB, PlayerId(1));
        assert!(board.remove_occupant(NodeId::HUB, PlayerId(0)));
        assert!(!board.remove_occupant(NodeId::HUB, PlayerId(0)));
        assert!(board.is_occupied_by(NodeId::HUB, PlayerId(1)));
    }

    #[test]
    fn reachable_from_follows_edges_only() {
        let mut board = BoardGraph::unlinked(1, 3);
        board.link(NodeId::HUB, NodeId(1));
        board.link(NodeId(1), NodeId(2));
        let reach = board.reachable_from(NodeId::HUB);
        assert_eq!(reach.len(), 3);
        assert!(!reach.contains(&NodeId(3)));
        assert!(!board.is_connected());
    }
}
