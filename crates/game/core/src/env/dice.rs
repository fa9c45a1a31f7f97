//! Dice collaborator consulted by the roll command.

use super::RngOracle;
use crate::config::GameConfig;

/// Produces dice faces and reports whether a roll is still settling.
pub trait DiceOracle: Send + Sync {
    /// True while a presentation-side roll animation has not settled.
    ///
    /// Rolling is rejected while this reports `true`.
    fn is_rolling(&self) -> bool {
        false
    }

    /// Face in `1..=6` for the given seed.
    fn face(&self, rng: &dyn RngOracle, seed: u64) -> u8;
}

/// Fair six-sided die driven by the RNG oracle.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardDice;

impl DiceOracle for StandardDice {
    fn face(&self, rng: &dyn RngOracle, seed: u64) -> u8 {
        rng.roll_die(seed, GameConfig::DIE_FACES) as u8
    }
}

/// Die that always shows the same face, for scripted play and tests.
#[derive(Clone, Copy, Debug)]
pub struct LoadedDice {
    face: u8,
    rolling: bool,
}

impl LoadedDice {
    /// Creates a die fixed on `face` (clamped to `1..=6`).
    pub fn new(face: u8) -> Self {
        Self {
            face: face.clamp(1, GameConfig::DIE_FACES as u8),
            rolling: false,
        }
    }

    /// Marks the die as still rolling.
    #[must_use]
    pub fn rolling(mut self) -> Self {
        self.rolling = true;
        self
    }
}

impl DiceOracle for LoadedDice {
    fn is_rolling(&self) -> bool {
        self.rolling
    }

    fn face(&self, _rng: &dyn RngOracle, _seed: u64) -> u8 {
        self.face
    }
}
