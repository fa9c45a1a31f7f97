//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionResult, ActionTransition};
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Runs a transition through `pre_validate` → `apply` → `post_validate`.
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each command to its transition and wraps the result.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::RollDice(transition) => {
            let roll = drive_transition(transition, state, env).map_err(ExecuteError::Turn)?;
            Ok(ActionResult::Rolled(roll))
        }
        Action::Move(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Move)?;
            Ok(ActionResult::Moved {
                from: transition.from,
                to: transition.to,
            })
        }
        Action::SelectTask(transition) => {
            let outcome = drive_transition(transition, state, env).map_err(ExecuteError::Task)?;
            Ok(ActionResult::Selected(outcome))
        }
        Action::StartTask(transition) => {
            let ticks = drive_transition(transition, state, env).map_err(ExecuteError::Task)?;
            Ok(ActionResult::Started {
                node: transition.node,
                ticks,
            })
        }
        Action::OpenChance(transition) => {
            let outcome = drive_transition(transition, state, env).map_err(ExecuteError::Task)?;
            Ok(ActionResult::Chance(outcome))
        }
        Action::RequestTransfer(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Task)?;
            Ok(ActionResult::TransferRequested {
                node: transition.node,
                target: transition.target,
            })
        }
        Action::ResolvePending(transition) => {
            let (node, selection) =
                drive_transition(transition, state, env).map_err(ExecuteError::Task)?;
            Ok(ActionResult::PendingResolved {
                node,
                decision: transition.decision,
                selection,
            })
        }
        Action::EndTurn(transition) => {
            let ended = drive_transition(transition, state, env).map_err(ExecuteError::Turn)?;
            Ok(ActionResult::TurnEnded(ended))
        }
    }
}
