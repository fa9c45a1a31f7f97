//! Configuration oracle for exposing economy rules to the engine.

use crate::config::GameConfig;

/// Provides access to runtime rule values.
pub trait ConfigOracle: Send + Sync {
    /// Selected tasks in one category that flag its objective as ready.
    fn objective_threshold(&self) -> usize;

    /// Percentage of a task's cost charged on selection.
    fn selection_fee_percent(&self) -> i64;

    /// Whether starting a task requires its category objective to be ready.
    fn require_objective_ready(&self) -> bool;
}

impl ConfigOracle for GameConfig {
    fn objective_threshold(&self) -> usize {
        self.objective_threshold
    }

    fn selection_fee_percent(&self) -> i64 {
        self.selection_fee_percent
    }

    fn require_objective_ready(&self) -> bool {
        self.require_objective_ready
    }
}
