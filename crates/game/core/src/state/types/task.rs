use super::common::{PlayerId, ResourceCost, ResourceKind};

/// Category a task belongs to; every category except `Chance` is an objective.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskCategory {
    Financial,
    Educational,
    Business,
    Community,
    Chance,
}

impl TaskCategory {
    /// Categories that can be claimed and completed as objectives.
    pub const OBJECTIVES: [TaskCategory; 4] = [
        TaskCategory::Financial,
        TaskCategory::Educational,
        TaskCategory::Business,
        TaskCategory::Community,
    ];

    #[inline]
    pub const fn is_chance(self) -> bool {
        matches!(self, TaskCategory::Chance)
    }
}

bitflags::bitflags! {
    /// Runtime status bits of a task placed on the board.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TaskFlags: u8 {
        const TAKEN = 1 << 0;
        const SELECTED = 1 << 1;
        const COMPLETED = 1 << 2;
        /// Chance squares only: resources already granted.
        const OPENED = 1 << 3;
    }
}

/// Immutable catalog entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskDefinition {
    pub name: String,
    /// Description with `{m}`/`{p}` placeholders already substituted.
    pub description: String,
    pub resources: ResourceCost,
    pub category: TaskCategory,
    /// Sub-steps listed for reference; they never become board nodes.
    pub steps: Vec<TaskDefinition>,
    /// Turns needed to complete the task once started.
    pub duration: u32,
    /// Community morale change applied on completion.
    pub morale_impact: f32,
    pub is_sub_task: bool,
}

impl TaskDefinition {
    pub fn new(name: impl Into<String>, category: TaskCategory, resources: ResourceCost) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            resources,
            category,
            steps: Vec::new(),
            duration: 1,
            morale_impact: 0.0,
            is_sub_task: false,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_morale_impact(mut self, morale_impact: f32) -> Self {
        self.morale_impact = morale_impact;
        self
    }

    #[must_use]
    pub fn with_steps(mut self, steps: Vec<TaskDefinition>) -> Self {
        self.steps = steps;
        self
    }
}

/// A task placed on a board node, with its mutable status.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub definition: TaskDefinition,
    pub status: TaskFlags,
    pub owner: Option<PlayerId>,
}

impl Task {
    pub fn new(definition: TaskDefinition) -> Self {
        Self {
            definition,
            status: TaskFlags::empty(),
            owner: None,
        }
    }

    #[inline]
    pub fn category(&self) -> TaskCategory {
        self.definition.category
    }

    #[inline]
    pub fn cost(&self) -> &ResourceCost {
        &self.definition.resources
    }

    #[inline]
    pub fn is_chance(&self) -> bool {
        self.definition.category.is_chance()
    }

    #[inline]
    pub fn is_taken(&self) -> bool {
        self.status.contains(TaskFlags::TAKEN)
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status.contains(TaskFlags::COMPLETED)
    }

    #[inline]
    pub fn is_opened(&self) -> bool {
        self.status.contains(TaskFlags::OPENED)
    }

    /// Marks the task as taken and selected by `owner`.
    pub fn assign(&mut self, owner: PlayerId) {
        self.status.insert(TaskFlags::TAKEN | TaskFlags::SELECTED);
        self.owner = Some(owner);
    }
}

/// Formats an amount with `,` thousands separators.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Substitutes `{m}` and `{p}` in a description template.
pub fn render_description(template: &str, cost: &ResourceCost) -> String {
    template
        .replace("{m}", &format_amount(cost.amount(ResourceKind::Money)))
        .replace("{p}", &format_amount(cost.amount(ResourceKind::People)))
}
