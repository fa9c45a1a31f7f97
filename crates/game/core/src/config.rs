/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of grid rows on the generated board (hub excluded).
    pub rows: u16,
    /// Number of grid columns on the generated board (hub excluded).
    pub cols: u16,
    /// Selected tasks in one category that flag its objective as ready.
    pub objective_threshold: usize,
    /// Share of each task cost charged when the task is selected.
    pub selection_fee_percent: i64,
    pub starting_money: i64,
    pub starting_people: i64,
    pub starting_morale: f32,
    /// When set, a task can only be started once its category objective is ready.
    pub require_objective_ready: bool,
    /// Free-form mode label persisted with each session.
    pub game_mode: String,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Maximum number of seats at the table.
    pub const MAX_PLAYERS: usize = 4;
    /// Faces on the movement die.
    pub const DIE_FACES: u32 = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ROWS: u16 = 5;
    pub const DEFAULT_COLS: u16 = 6;
    pub const DEFAULT_OBJECTIVE_THRESHOLD: usize = 10;
    pub const DEFAULT_SELECTION_FEE_PERCENT: i64 = 20;
    pub const DEFAULT_STARTING_MONEY: i64 = 2_000_000;
    pub const DEFAULT_STARTING_PEOPLE: i64 = 1_000;
    pub const DEFAULT_STARTING_MORALE: f32 = 100.0;
    pub const DEFAULT_GAME_MODE: &'static str = "standard";

    pub fn new() -> Self {
        Self {
            rows: Self::DEFAULT_ROWS,
            cols: Self::DEFAULT_COLS,
            objective_threshold: Self::DEFAULT_OBJECTIVE_THRESHOLD,
            selection_fee_percent: Self::DEFAULT_SELECTION_FEE_PERCENT,
            starting_money: Self::DEFAULT_STARTING_MONEY,
            starting_people: Self::DEFAULT_STARTING_PEOPLE,
            starting_morale: Self::DEFAULT_STARTING_MORALE,
            require_objective_ready: false,
            game_mode: Self::DEFAULT_GAME_MODE.to_owned(),
        }
    }

    pub fn with_dimensions(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            ..Self::new()
        }
    }

    /// Clamps values that would make a session impossible to build.
    ///
    /// Grids smaller than 1×1 are raised to 1, the fee is kept within
    /// 0..=100 percent and a zero threshold becomes 1.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.rows = self.rows.max(1);
        self.cols = self.cols.max(1);
        self.selection_fee_percent = self.selection_fee_percent.clamp(0, 100);
        self.objective_threshold = self.objective_threshold.max(1);
        if self.starting_morale < 0.0 {
            self.starting_morale = 0.0;
        }
        self
    }

    /// Number of grid cells that can carry a task.
    pub fn task_capacity(&self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_clamps_degenerate_values() {
        let config = GameConfig {
            rows: 0,
            cols: 0,
            selection_fee_percent: 250,
            objective_threshold: 0,
            starting_morale: -5.0,
            ..GameConfig::default()
        }
        .validated();

        assert_eq!(config.rows, 1);
        assert_eq!(config.cols, 1);
        assert_eq!(config.selection_fee_percent, 100);
        assert_eq!(config.objective_threshold, 1);
        assert_eq!(config.starting_morale, 0.0);
    }

    #[test]
    fn default_capacity_matches_grid() {
        assert_eq!(GameConfig::default().task_capacity(), 30);
    }
}
