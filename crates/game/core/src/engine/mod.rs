//! Command execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! command is checked against the turn owner and phase, driven through the
//! transition phases, and either fully committed or fully rolled back.
mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{self, Action, ActionResult, SelectionPreview};
use crate::env::GameEnv;
use crate::state::{GameOutcome, GameState, NodeId, PlayerId, TurnPhase};

/// Complete outcome of a committed command.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Command-specific result.
    pub result: ActionResult,

    /// Set when this command ended the game.
    pub game_over: Option<GameOutcome>,

    /// Nonce assigned to the committed command.
    pub nonce: u64,
}

/// Game engine that validates and applies player commands.
///
/// All state mutations flow through the three-phase pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes a command issued by the active player.
    ///
    /// Rejects the command when the game is over, when the actor is not the
    /// active player, or when the turn phase does not accept it. On any
    /// pipeline error the state is restored to its value before the call.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        self.validate_actor(action.actor())?;
        self.validate_phase(action)?;

        let before = self.state.clone();
        let result = match transition::execute_transition(action, self.state, &env) {
            Ok(result) => result,
            Err(error) => {
                *self.state = before;
                return Err(error);
            }
        };

        let nonce = self.state.turn.nonce;
        self.state.turn.nonce += 1;

        let game_over = self.state.first_depleted();
        if game_over.is_some() {
            self.state.outcome = game_over;
        }

        Ok(ExecutionOutcome {
            result,
            game_over,
            nonce,
        })
    }

    /// Reports the fee and effects of selecting the task at `node`, with the
    /// same checks as the committing command but without mutating state.
    pub fn preview_selection(
        &self,
        env: &GameEnv<'_>,
        actor: PlayerId,
        node: NodeId,
    ) -> Result<SelectionPreview, ExecuteError> {
        preview_selection(self.state, env, actor, node)
    }

    fn validate_actor(&self, actor: PlayerId) -> Result<(), ExecuteError> {
        validate_actor(self.state, actor)
    }

    /// Enforces the turn state machine.
    ///
    /// Pending delegations must be resolved before anything else; task
    /// decisions are taken once every move is spent.
    fn validate_phase(&self, action: &Action) -> Result<(), ExecuteError> {
        let phase = self.state.phase();
        let allowed = match phase {
            TurnPhase::AwaitingPendingDecision => matches!(action, Action::ResolvePending(_)),
            TurnPhase::AwaitingEndTurn => !matches!(action, Action::ResolvePending(_)),
            TurnPhase::AwaitingRoll | TurnPhase::AwaitingMove => {
                !action.is_task_decision() && !matches!(action, Action::ResolvePending(_))
            }
            TurnPhase::GameOver => false,
        };
        if allowed {
            Ok(())
        } else {
            Err(ExecuteError::WrongPhase {
                action: action.name(),
                phase,
            })
        }
    }
}

/// Read-only selection preview over a borrowed state.
///
/// Applies the actor, phase and selection checks of [`Action::SelectTask`]
/// and reports the fee it would charge.
pub fn preview_selection(
    state: &GameState,
    env: &GameEnv<'_>,
    actor: PlayerId,
    node: NodeId,
) -> Result<SelectionPreview, ExecuteError> {
    validate_actor(state, actor)?;
    let phase = state.phase();
    if phase != TurnPhase::AwaitingEndTurn {
        return Err(ExecuteError::WrongPhase {
            action: "preview_selection",
            phase,
        });
    }
    let config = env.config().map_err(|error| {
        ExecuteError::Task(TransitionPhaseError::new(
            TransitionPhase::PreValidate,
            error.into(),
        ))
    })?;
    action::preview_selection(state, config, actor, node).map_err(|error| {
        ExecuteError::Task(TransitionPhaseError::new(TransitionPhase::PreValidate, error))
    })
}

/// Rejects commands after game over and from anyone but the active player.
fn validate_actor(state: &GameState, actor: PlayerId) -> Result<(), ExecuteError> {
    if let Some(outcome) = state.outcome {
        return Err(ExecuteError::GameOver(outcome));
    }
    let active = state.turn.active;
    if actor != active {
        return Err(ExecuteError::not_your_turn(actor, active));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{Env, LoadedDice, PcgRng, StandardDice};
    use crate::error::{ErrorSeverity, GameError};
    use crate::state::{ResourceCost, TaskCategory, TaskDefinition};

    fn session(players: &[&str]) -> GameState {
        let catalog = vec![TaskDefinition::new(
            "Bulk buying",
            TaskCategory::Business,
            ResourceCost::new(50_000, 10),
        )];
        GameState::new_session(&GameConfig::default(), players, &catalog, 5, &PcgRng)
            .expect("session")
    }

    #[test]
    fn rejects_commands_from_inactive_players() {
        let mut state = session(&["Ada", "Ben"]);
        let config = GameConfig::default();
        let dice = LoadedDice::new(4);
        let env = Env::with_all(&config, &PcgRng, &dice).into_game_env();

        let err = GameEngine::new(&mut state)
            .execute(env, &Action::roll_dice(PlayerId(1)))
            .unwrap_err();
        assert_eq!(err, ExecuteError::not_your_turn(PlayerId(1), PlayerId(0)));
        assert_eq!(state.turn.nonce, 0);
    }

    #[test]
    fn nonce_advances_only_on_commit() {
        let mut state = session(&["Ada"]);
        let config = GameConfig::default();
        let dice = LoadedDice::new(4);
        let env = Env::with_all(&config, &PcgRng, &dice).into_game_env();

        let outcome = GameEngine::new(&mut state)
            .execute(env, &Action::roll_dice(PlayerId(0)))
            .expect("roll");
        assert_eq!(outcome.nonce, 0);
        assert_eq!(state.turn.nonce, 1);

        let before = state.clone();
        let err = GameEngine::new(&mut state)
            .execute(env, &Action::roll_dice(PlayerId(0)))
            .unwrap_err();
        assert_eq!(err.error_code(), "TURN_ALREADY_ROLLED");
        assert_eq!(state, before);
    }

    #[test]
    fn task_decisions_wait_for_moves_to_be_spent() {
        let mut state = session(&["Ada"]);
        let config = GameConfig::default();
        let dice = LoadedDice::new(4);
        let env = Env::with_all(&config, &PcgRng, &dice).into_game_env();

        let err = GameEngine::new(&mut state)
            .execute(env, &Action::select_task(PlayerId(0), NodeId(1)))
            .unwrap_err();
        assert!(matches!(
            err,
            ExecuteError::WrongPhase {
                phase: TurnPhase::AwaitingRoll,
                ..
            }
        ));
    }

    #[test]
    fn missing_dice_oracle_is_fatal_and_rolls_back() {
        let mut state = session(&["Ada"]);
        let config = GameConfig::default();
        let env = Env::<GameConfig, PcgRng, StandardDice>::new(Some(&config), Some(&PcgRng), None)
            .into_game_env();

        let before = state.clone();
        let err = GameEngine::new(&mut state)
            .execute(env, &Action::roll_dice(PlayerId(0)))
            .unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert_eq!(state, before);
    }
}
