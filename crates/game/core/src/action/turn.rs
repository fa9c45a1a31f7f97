//! Dice rolling and turn advancement.

use super::economy::{TurnProgress, progress_active_task};
use crate::action::ActionTransition;
use crate::env::{GameEnv, OracleError, compute_seed, context};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, PlayerId};
use crate::weather::{Weather, move_budget, sample_weather, season_for};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("dice already rolled this turn")]
    AlreadyRolled,

    #[error("dice are still rolling")]
    RollInProgress,

    #[error("dice not rolled yet")]
    NotRolled,

    #[error("{remaining} move(s) remaining")]
    MovesRemaining { remaining: u8 },

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TurnError::AlreadyRolled
            | TurnError::RollInProgress
            | TurnError::NotRolled
            | TurnError::MovesRemaining { .. } => ErrorSeverity::Recoverable,
            TurnError::PlayerNotFound(_) => ErrorSeverity::Validation,
            TurnError::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnError::AlreadyRolled => "TURN_ALREADY_ROLLED",
            TurnError::RollInProgress => "TURN_ROLL_IN_PROGRESS",
            TurnError::NotRolled => "TURN_NOT_ROLLED",
            TurnError::MovesRemaining { .. } => "TURN_MOVES_REMAINING",
            TurnError::PlayerNotFound(_) => "TURN_PLAYER_NOT_FOUND",
            TurnError::Oracle(error) => error.error_code(),
        }
    }
}

/// Face, weather and resulting move budget of an accepted roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollOutcome {
    pub face: u8,
    pub weather: Weather,
    pub modifier: i8,
    pub max_moves: u8,
}

/// Rolls the die and draws the weather for the active season.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollDiceAction {
    pub actor: PlayerId,
}

impl RollDiceAction {
    pub fn new(actor: PlayerId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for RollDiceAction {
    type Error = TurnError;
    type Result = RollOutcome;

    fn actor(&self) -> PlayerId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.turn.has_rolled() {
            return Err(TurnError::AlreadyRolled);
        }
        if env.dice()?.is_rolling() {
            return Err(TurnError::RollInProgress);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<RollOutcome, TurnError> {
        let rng = env.rng()?;
        let dice = env.dice()?;
        let nonce = state.turn.nonce;
        let actor = u32::from(self.actor.0);

        let face = dice.face(rng, compute_seed(state.game_seed, nonce, actor, context::DICE));
        let draw = rng.next_u32(compute_seed(state.game_seed, nonce, actor, context::WEATHER));
        let weather = sample_weather(state.turn.season, draw);
        let max_moves = move_budget(face, weather);

        state.turn.last_roll = Some(face);
        state.turn.weather = Some(weather);
        state.turn.max_moves = Some(max_moves);
        state.turn.moves_spent = 0;

        Ok(RollOutcome {
            face,
            weather,
            modifier: weather.modifier(),
            max_moves,
        })
    }
}

/// What happened when a turn was handed over.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnEnded {
    pub ended: PlayerId,
    pub next: PlayerId,
    pub progress: TurnProgress,
    /// True when the hand-over completed a round and advanced the season.
    pub new_round: bool,
}

/// Ends the active player's turn once every move is spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndTurnAction {
    pub actor: PlayerId,
}

impl EndTurnAction {
    pub fn new(actor: PlayerId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for EndTurnAction {
    type Error = TurnError;
    type Result = TurnEnded;

    fn actor(&self) -> PlayerId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !state.turn.has_rolled() {
            return Err(TurnError::NotRolled);
        }
        let remaining = state.turn.moves_remaining();
        if remaining > 0 {
            return Err(TurnError::MovesRemaining { remaining });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<TurnEnded, TurnError> {
        let progress = progress_active_task(state, self.actor);

        state
            .player_mut(self.actor)
            .ok_or(TurnError::PlayerNotFound(self.actor))?
            .visited
            .clear();

        let seats = state.players.len().max(1);
        let next_index = (self.actor.index() + 1) % seats;
        let new_round = next_index == 0;
        if new_round {
            state.turn.global_turn += 1;
            state.turn.season = season_for(state.turn.global_turn);
            state.turn.years = state.turn.global_turn / 4;
        }

        let next = PlayerId(next_index as u8);
        state.turn.active = next;
        state.turn.reset_roll();
        state.begin_turn();

        Ok(TurnEnded {
            ended: self.actor,
            next,
            progress,
            new_round,
        })
    }
}
