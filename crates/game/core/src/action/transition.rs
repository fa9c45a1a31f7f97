use crate::env::GameEnv;
use crate::state::{GameState, PlayerId};

/// Defines how a concrete command mutates the session.
///
/// Implementors override the validation hooks to surface pre- and
/// post-conditions around the mutation. Hooks receive read-only access to
/// the collaborators via [`GameEnv`] and must stay side-effect free.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Returns the player who initiated this command.
    fn actor(&self) -> PlayerId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the command by mutating the state directly. Implementations
    /// may assume that `pre_validate` has already run successfully.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>)
    -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}
