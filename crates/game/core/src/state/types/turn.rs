use super::common::{PlayerId, ResourceKind};
use crate::weather::{Season, Weather};

/// Turn bookkeeping: whose turn it is, the calendar and the move budget.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Player whose commands are accepted.
    pub active: PlayerId,

    /// Completed rounds (every player has acted once per round).
    pub global_turn: u32,

    /// Completed years, derived from `global_turn`.
    pub years: u32,

    pub season: Season,

    /// Weather drawn by the last accepted roll this turn.
    pub weather: Option<Weather>,

    /// Face of the last accepted roll this turn.
    pub last_roll: Option<u8>,

    /// Move budget for this turn; `None` until the dice are rolled.
    pub max_moves: Option<u8>,

    pub moves_spent: u8,

    /// Sequential command identifier, incremented after every committed
    /// command. Mixed into RNG seeds and used as the save key.
    #[cfg_attr(feature = "serde", serde(default))]
    pub nonce: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            active: PlayerId(0),
            global_turn: 0,
            years: 0,
            season: Season::Spring,
            weather: None,
            last_roll: None,
            max_moves: None,
            moves_spent: 0,
            nonce: 0,
        }
    }

    #[inline]
    pub fn has_rolled(&self) -> bool {
        self.max_moves.is_some()
    }

    /// Moves left this turn; zero before the roll.
    pub fn moves_remaining(&self) -> u8 {
        self.max_moves
            .map(|max| max.saturating_sub(self.moves_spent))
            .unwrap_or(0)
    }

    /// Clears the per-turn dice state so the next player must roll.
    pub fn reset_roll(&mut self) {
        self.weather = None;
        self.last_roll = None;
        self.max_moves = None;
        self.moves_spent = 0;
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

/// Phase of the active player's turn, derived from state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    /// Delegated tasks wait for an accept/decline decision.
    AwaitingPendingDecision,
    AwaitingRoll,
    AwaitingMove,
    /// Moves exhausted; task decisions and end-turn are accepted.
    AwaitingEndTurn,
    GameOver,
}

/// Terminal result: a player ran out of a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOutcome {
    pub player: PlayerId,
    pub depleted: ResourceKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_remaining_is_zero_before_roll() {
        let mut turn = TurnState::new();
        assert_eq!(turn.moves_remaining(), 0);
        turn.max_moves = Some(3);
        turn.moves_spent = 1;
        assert_eq!(turn.moves_remaining(), 2);
        turn.reset_roll();
        assert!(!turn.has_rolled());
        assert_eq!(turn.moves_spent, 0);
    }
}
