#![allow(dead_code)]

use valley_core::{
    GameConfig, LoadedDice, ResourceCost, RngOracle, TaskCategory, TaskDefinition,
};
use valley_runtime::{GameSession, SessionBuilder};

/// RNG that returns the same draw for every seed.
///
/// Every coin comes up tails, so generated boards are a plain path:
/// hub - #1 - #2 - ... along the single row.
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Draw that lands on Partly Cloudy (modifier 0) in Spring.
pub const NEUTRAL_DRAW: u32 = 400_000;

/// Identical Business tasks, so placement order does not matter.
pub fn business_catalog(count: usize) -> Vec<TaskDefinition> {
    (0..count)
        .map(|i| {
            TaskDefinition::new(
                format!("Shop {i}"),
                TaskCategory::Business,
                ResourceCost::new(100_000, 50),
            )
        })
        .collect()
}

/// Two players on a 1×3 path board with a die that always shows `face`.
pub fn builder(face: u8) -> SessionBuilder {
    GameSession::builder()
        .config(GameConfig::with_dimensions(1, 3))
        .players(["Ada", "Ben"])
        .catalog(business_catalog(3))
        .seed(42)
        .rng(FixedRng(NEUTRAL_DRAW))
        .dice(LoadedDice::new(face))
}

/// Rolls a one and steps onto the next path node.
pub fn roll_and_step(session: &mut GameSession) {
    session.roll_dice().expect("roll");
    let next = session.legal_moves()[0];
    session.move_to(next).expect("move");
}
