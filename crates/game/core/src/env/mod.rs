//! Traits describing read-only collaborators of the engine.
//!
//! Oracles expose rule values, randomness and the dice. The [`Env`]
//! aggregate bundles them so the engine can access everything it needs
//! without hard coupling to concrete implementations.
mod config;
mod dice;
mod error;
mod rng;

pub use config::ConfigOracle;
pub use dice::{DiceOracle, LoadedDice, StandardDice};
pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, RngStream, compute_seed, context};

/// Aggregates read-only oracles required by the action pipeline.
pub struct Env<'a, C, R, D>
where
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
    D: DiceOracle + ?Sized,
{
    config: Option<&'a C>,
    rng: Option<&'a R>,
    dice: Option<&'a D>,
}

impl<C, R, D> Clone for Env<'_, C, R, D>
where
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
    D: DiceOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, R, D> Copy for Env<'_, C, R, D>
where
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
    D: DiceOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<'a, dyn ConfigOracle + 'a, dyn RngOracle + 'a, dyn DiceOracle + 'a>;

impl<'a, C, R, D> Env<'a, C, R, D>
where
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
    D: DiceOracle + ?Sized,
{
    pub fn new(config: Option<&'a C>, rng: Option<&'a R>, dice: Option<&'a D>) -> Self {
        Self { config, rng, dice }
    }

    pub fn with_all(config: &'a C, rng: &'a R, dice: &'a D) -> Self {
        Self::new(Some(config), Some(rng), Some(dice))
    }

    pub fn empty() -> Self {
        Self {
            config: None,
            rng: None,
            dice: None,
        }
    }

    /// Returns the ConfigOracle, or an error if not available.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Returns the DiceOracle, or an error if not available.
    pub fn dice(&self) -> Result<&'a D, OracleError> {
        self.dice.ok_or(OracleError::DiceNotAvailable)
    }
}

impl<'a, C, R, D> Env<'a, C, R, D>
where
    C: ConfigOracle + 'a,
    R: RngOracle + 'a,
    D: DiceOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn into_game_env(self) -> GameEnv<'a> {
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        let dice: Option<&'a dyn DiceOracle> = self.dice.map(|dice| dice as _);
        Env::new(config, rng, dice)
    }
}
