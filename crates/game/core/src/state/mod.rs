//! Authoritative session state.
//!
//! [`GameState`] is the unit of save/restore. Runtime layers clone or query
//! it but mutate it exclusively through the engine.
mod error;
pub mod types;

pub use error::InitializationError;
pub use types::{
    GameOutcome, NodeId, ObjectiveBoard, PlayerColor, PlayerId, PlayerState, ResourceCost,
    ResourceKind, ResourcePool, Task, TaskCategory, TaskDefinition, TaskFlags, TurnPhase,
    TurnState, format_amount, render_description,
};

use crate::board::{self, BoardGraph};
use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::weather::Season;

/// Canonical snapshot of a session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed set once at session start.
    pub game_seed: u64,
    pub game_mode: String,
    /// Seats in turn order; `players[i].id == PlayerId(i)`.
    pub players: Vec<PlayerState>,
    pub board: BoardGraph,
    pub turn: TurnState,
    pub objectives: ObjectiveBoard,
    /// Set once a player runs out of a resource; the session is then read-only.
    pub outcome: Option<GameOutcome>,
}

impl GameState {
    /// Creates a session without players over an already generated board.
    pub fn new(game_seed: u64, game_mode: impl Into<String>, board: BoardGraph) -> Self {
        Self {
            game_seed,
            game_mode: game_mode.into(),
            players: Vec::new(),
            board,
            turn: TurnState::new(),
            objectives: ObjectiveBoard::default(),
            outcome: None,
        }
    }

    /// Builds a fresh session: generates the board, seats every player on
    /// the hub with the starting balances and opens the first turn.
    pub fn new_session<S: AsRef<str>>(
        config: &GameConfig,
        names: &[S],
        catalog: &[TaskDefinition],
        game_seed: u64,
        rng: &dyn RngOracle,
    ) -> Result<Self, InitializationError> {
        if names.is_empty() {
            return Err(InitializationError::NoPlayers);
        }
        if names.len() > GameConfig::MAX_PLAYERS {
            return Err(InitializationError::TooManyPlayers {
                max: GameConfig::MAX_PLAYERS,
                requested: names.len(),
            });
        }
        for (i, name) in names.iter().enumerate() {
            let name = name.as_ref();
            let duplicate = names[..i].iter().any(|other| other.as_ref() == name);
            if name.trim().is_empty() || duplicate {
                return Err(InitializationError::InvalidPlayerName {
                    name: name.to_owned(),
                });
            }
        }
        if catalog.is_empty() {
            return Err(InitializationError::EmptyCatalog);
        }

        let board = board::generate(config.rows, config.cols, catalog, game_seed, rng);
        let mut state = Self::new(game_seed, config.game_mode.clone(), board);
        let start = ResourcePool::new(config.starting_money, config.starting_people);
        for (seat, name) in names.iter().enumerate() {
            state.seat_player(name.as_ref(), start, config.starting_morale, seat as u8);
        }
        state.begin_turn();
        Ok(state)
    }

    fn seat_player(&mut self, name: &str, resources: ResourcePool, morale: f32, seat: u8) {
        let id = PlayerId(seat);
        self.players
            .push(PlayerState::new(id, name, NodeId::HUB, resources, morale));
        self.board.add_occupant(NodeId::HUB, id);
    }

    /// Marks the active player's current node as visited for the new turn.
    pub fn begin_turn(&mut self) {
        let active = self.turn.active;
        if let Some(player) = self.player_mut(active) {
            player.begin_turn();
        }
    }

    // ===== queries =====

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(id.index())
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(id.index())
    }

    pub fn active_player(&self) -> Option<&PlayerState> {
        self.player(self.turn.active)
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Current phase of the active player's turn.
    pub fn phase(&self) -> TurnPhase {
        if self.outcome.is_some() {
            return TurnPhase::GameOver;
        }
        let pending = self
            .active_player()
            .is_some_and(|player| !player.pending.is_empty());
        if !self.turn.has_rolled() {
            if pending {
                TurnPhase::AwaitingPendingDecision
            } else {
                TurnPhase::AwaitingRoll
            }
        } else if self.turn.moves_remaining() > 0 {
            TurnPhase::AwaitingMove
        } else {
            TurnPhase::AwaitingEndTurn
        }
    }

    pub fn moves_remaining(&self) -> u8 {
        self.turn.moves_remaining()
    }

    pub fn season(&self) -> Season {
        self.turn.season
    }

    /// Nodes the active player may move to right now.
    pub fn legal_moves(&self) -> Vec<NodeId> {
        if self.phase() != TurnPhase::AwaitingMove {
            return Vec::new();
        }
        let Some(player) = self.active_player() else {
            return Vec::new();
        };
        self.board
            .neighbors(player.node)
            .filter(|node| !player.has_visited(*node))
            .collect()
    }

    /// Owned tasks of `player` in selection order.
    pub fn owned_tasks(&self, player: PlayerId) -> impl Iterator<Item = (NodeId, &Task)> + '_ {
        self.player(player)
            .into_iter()
            .flat_map(|p| p.tasks.iter().copied())
            .filter_map(|node| self.board.task(node).map(|task| (node, task)))
    }

    /// Number of tasks `player` owns in `category`.
    pub fn owned_in_category(&self, player: PlayerId, category: TaskCategory) -> usize {
        self.owned_tasks(player)
            .filter(|(_, task)| task.category() == category)
            .count()
    }

    /// Players other than `from` whose category lock admits the task on `node`.
    pub fn eligible_transfer_targets(&self, from: PlayerId, node: NodeId) -> Vec<PlayerId> {
        let Some(task) = self.board.task(node) else {
            return Vec::new();
        };
        if task.is_chance() || task.is_taken() {
            return Vec::new();
        }
        let category = task.category();
        self.players
            .iter()
            .filter(|p| p.id != from)
            .filter(|p| p.category.is_none_or(|locked| locked == category))
            .filter(|p| !p.pending.contains(&node))
            .map(|p| p.id)
            .collect()
    }

    /// First player (in seat order) holding a depleted resource.
    pub fn first_depleted(&self) -> Option<GameOutcome> {
        self.players.iter().find_map(|player| {
            player.resources.depleted().map(|depleted| GameOutcome {
                player: player.id,
                depleted,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn catalog() -> Vec<TaskDefinition> {
        vec![TaskDefinition::new(
            "Savings club",
            TaskCategory::Financial,
            ResourceCost::new(100_000, 20),
        )]
    }

    #[test]
    fn new_session_seats_players_on_hub() {
        let state =
            GameState::new_session(&GameConfig::default(), &["Ada", "Ben"], &catalog(), 1, &PcgRng)
                .expect("session");
        assert_eq!(state.players.len(), 2);
        assert_eq!(state.board.hub().occupants, vec![PlayerId(0), PlayerId(1)]);
        assert_eq!(state.players[1].resources, ResourcePool::new(2_000_000, 1_000));
        assert!(state.players[0].has_visited(NodeId::HUB));
        assert_eq!(state.phase(), TurnPhase::AwaitingRoll);
        assert!(state.legal_moves().is_empty());
    }

    #[test]
    fn new_session_rejects_bad_rosters() {
        let config = GameConfig::default();
        let none: [&str; 0] = [];
        assert_eq!(
            GameState::new_session(&config, &none, &catalog(), 1, &PcgRng),
            Err(InitializationError::NoPlayers)
        );
        assert!(matches!(
            GameState::new_session(&config, &["a", "b", "c", "d", "e"], &catalog(), 1, &PcgRng),
            Err(InitializationError::TooManyPlayers { requested: 5, .. })
        ));
        assert!(matches!(
            GameState::new_session(&config, &["a", "a"], &catalog(), 1, &PcgRng),
            Err(InitializationError::InvalidPlayerName { .. })
        ));
        assert_eq!(
            GameState::new_session(&config, &["a"], &[], 1, &PcgRng),
            Err(InitializationError::EmptyCatalog)
        );
    }

    #[test]
    fn pending_queue_gates_the_turn_start() {
        let mut state =
            GameState::new_session(&GameConfig::default(), &["Ada"], &catalog(), 1, &PcgRng)
                .expect("session");
        state.players[0].pending.push_back(NodeId(3));
        assert_eq!(state.phase(), TurnPhase::AwaitingPendingDecision);
    }

    #[test]
    fn first_depleted_reports_game_over_candidate() {
        let mut state =
            GameState::new_session(&GameConfig::default(), &["Ada", "Ben"], &catalog(), 1, &PcgRng)
                .expect("session");
        assert_eq!(state.first_depleted(), None);
        state.players[1].resources.people = 0;
        assert_eq!(
            state.first_depleted(),
            Some(GameOutcome {
                player: PlayerId(1),
                depleted: ResourceKind::People
            })
        );
    }
}
