use crate::action::ActionTransition;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, NodeId, PlayerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("no moves left this turn")]
    NoMovesLeft,

    #[error("node {to} is not adjacent to {from}")]
    NotAdjacent { from: NodeId, to: NodeId },

    #[error("{player} does not occupy {node}")]
    WrongOccupant { player: PlayerId, node: NodeId },

    #[error("node {node} was already visited this turn")]
    AlreadyVisited { node: NodeId },

    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("occupancy desync for {player} at {node}")]
    OccupancyDesync { player: PlayerId, node: NodeId },

    #[error("moves spent ({spent}) exceed the budget ({max})")]
    BudgetExceeded { spent: u8, max: u8 },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::NoMovesLeft
            | MoveError::NotAdjacent { .. }
            | MoveError::WrongOccupant { .. }
            | MoveError::AlreadyVisited { .. } => ErrorSeverity::Recoverable,
            MoveError::UnknownNode(_) | MoveError::PlayerNotFound(_) => ErrorSeverity::Validation,
            MoveError::OccupancyDesync { .. } | MoveError::BudgetExceeded { .. } => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::NoMovesLeft => "MOVE_NO_MOVES_LEFT",
            MoveError::NotAdjacent { .. } => "MOVE_NOT_ADJACENT",
            MoveError::WrongOccupant { .. } => "MOVE_WRONG_OCCUPANT",
            MoveError::AlreadyVisited { .. } => "MOVE_ALREADY_VISITED",
            MoveError::UnknownNode(_) => "MOVE_UNKNOWN_NODE",
            MoveError::PlayerNotFound(_) => "MOVE_PLAYER_NOT_FOUND",
            MoveError::OccupancyDesync { .. } => "MOVE_OCCUPANCY_DESYNC",
            MoveError::BudgetExceeded { .. } => "MOVE_BUDGET_EXCEEDED",
        }
    }
}

/// Moves the actor's token along one edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: PlayerId,
    pub from: NodeId,
    pub to: NodeId,
}

impl MoveAction {
    pub fn new(actor: PlayerId, from: NodeId, to: NodeId) -> Self {
        Self { actor, from, to }
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = ();

    fn actor(&self) -> PlayerId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.turn.moves_remaining() == 0 {
            return Err(MoveError::NoMovesLeft);
        }
        if !state.board.contains(self.to) {
            return Err(MoveError::UnknownNode(self.to));
        }
        if !state.board.are_adjacent(self.from, self.to) {
            return Err(MoveError::NotAdjacent {
                from: self.from,
                to: self.to,
            });
        }

        let player = state
            .player(self.actor)
            .ok_or(MoveError::PlayerNotFound(self.actor))?;
        if player.node != self.from || !state.board.is_occupied_by(self.from, self.actor) {
            return Err(MoveError::WrongOccupant {
                player: self.actor,
                node: self.from,
            });
        }
        if player.has_visited(self.to) {
            return Err(MoveError::AlreadyVisited { node: self.to });
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !state.board.remove_occupant(self.from, self.actor) {
            return Err(MoveError::OccupancyDesync {
                player: self.actor,
                node: self.from,
            });
        }
        if !state.board.add_occupant(self.to, self.actor) {
            return Err(MoveError::OccupancyDesync {
                player: self.actor,
                node: self.to,
            });
        }

        let player = state
            .player_mut(self.actor)
            .ok_or(MoveError::PlayerNotFound(self.actor))?;
        player.node = self.to;
        player.visited.insert(self.to);
        state.turn.moves_spent += 1;

        Ok(())
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let max = state.turn.max_moves.unwrap_or(0);
        if state.turn.moves_spent > max {
            return Err(MoveError::BudgetExceeded {
                spent: state.turn.moves_spent,
                max,
            });
        }
        Ok(())
    }
}
