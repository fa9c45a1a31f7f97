//! Player commands and their state transitions.
//!
//! Every command is a small struct implementing [`ActionTransition`]; the
//! [`Action`] enum is the canonical command fed to the engine.
mod economy;
mod movement;
mod transition;
mod turn;

pub use economy::{
    ChanceOutcome, OpenChanceAction, PendingDecision, RequestTransferAction,
    ResolvePendingAction, SelectTaskAction, SelectionOutcome, SelectionPreview, StartTaskAction,
    TaskError, TurnProgress, preview_selection,
};
pub use movement::{MoveAction, MoveError};
pub use transition::ActionTransition;
pub use turn::{EndTurnAction, RollDiceAction, RollOutcome, TurnEnded, TurnError};

use crate::state::{NodeId, PlayerId};
use crate::weather::Weather;

/// A command issued by the active player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    RollDice(RollDiceAction),
    Move(MoveAction),
    SelectTask(SelectTaskAction),
    StartTask(StartTaskAction),
    OpenChance(OpenChanceAction),
    RequestTransfer(RequestTransferAction),
    ResolvePending(ResolvePendingAction),
    EndTurn(EndTurnAction),
}

impl Action {
    pub fn roll_dice(actor: PlayerId) -> Self {
        Action::RollDice(RollDiceAction::new(actor))
    }

    pub fn move_to(actor: PlayerId, from: NodeId, to: NodeId) -> Self {
        Action::Move(MoveAction::new(actor, from, to))
    }

    pub fn select_task(actor: PlayerId, node: NodeId) -> Self {
        Action::SelectTask(SelectTaskAction::new(actor, node))
    }

    pub fn start_task(actor: PlayerId, node: NodeId) -> Self {
        Action::StartTask(StartTaskAction::new(actor, node))
    }

    pub fn open_chance(actor: PlayerId, node: NodeId) -> Self {
        Action::OpenChance(OpenChanceAction::new(actor, node))
    }

    pub fn request_transfer(actor: PlayerId, node: NodeId, target: PlayerId) -> Self {
        Action::RequestTransfer(RequestTransferAction::new(actor, node, target))
    }

    pub fn resolve_pending(actor: PlayerId, decision: PendingDecision) -> Self {
        Action::ResolvePending(ResolvePendingAction::new(actor, decision))
    }

    pub fn end_turn(actor: PlayerId) -> Self {
        Action::EndTurn(EndTurnAction::new(actor))
    }

    /// Player issuing the command.
    pub fn actor(&self) -> PlayerId {
        match self {
            Action::RollDice(action) => action.actor(),
            Action::Move(action) => action.actor(),
            Action::SelectTask(action) => action.actor(),
            Action::StartTask(action) => action.actor(),
            Action::OpenChance(action) => action.actor(),
            Action::RequestTransfer(action) => action.actor(),
            Action::ResolvePending(action) => action.actor(),
            Action::EndTurn(action) => action.actor(),
        }
    }

    /// Stable name used in logs and error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Action::RollDice(_) => "roll_dice",
            Action::Move(_) => "move",
            Action::SelectTask(_) => "select_task",
            Action::StartTask(_) => "start_task",
            Action::OpenChance(_) => "open_chance",
            Action::RequestTransfer(_) => "request_transfer",
            Action::ResolvePending(_) => "resolve_pending",
            Action::EndTurn(_) => "end_turn",
        }
    }

    /// True for commands that act on the task at the player's node.
    pub const fn is_task_decision(&self) -> bool {
        matches!(
            self,
            Action::SelectTask(_)
                | Action::StartTask(_)
                | Action::OpenChance(_)
                | Action::RequestTransfer(_)
        )
    }
}

/// Command-specific result of a committed action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Rolled(RollOutcome),
    Moved { from: NodeId, to: NodeId },
    Selected(SelectionOutcome),
    Started { node: NodeId, ticks: u32 },
    Chance(ChanceOutcome),
    TransferRequested { node: NodeId, target: PlayerId },
    PendingResolved {
        node: NodeId,
        decision: PendingDecision,
        selection: Option<SelectionOutcome>,
    },
    TurnEnded(TurnEnded),
}

impl ActionResult {
    /// Weather drawn by a roll, if this result is one.
    pub fn weather(&self) -> Option<Weather> {
        match self {
            ActionResult::Rolled(roll) => Some(roll.weather),
            _ => None,
        }
    }
}
