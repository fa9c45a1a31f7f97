//! Task economy: selection fees, category claims, progress, chance squares
//! and delegation.
//!
//! Task commands act on the task at the actor's current node. Selection is
//! two-phase: [`preview_selection`] reports the fee without touching state,
//! [`SelectTaskAction`] commits it.

use crate::action::ActionTransition;
use crate::env::{ConfigOracle, GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    GameState, NodeId, PlayerId, ResourceCost, ResourceKind, ResourcePool, Task, TaskCategory,
    TaskFlags,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskError {
    #[error("node {0} carries no task")]
    NoTask(NodeId),

    #[error("{player} is not standing on {node}")]
    NotOnNode { player: PlayerId, node: NodeId },

    #[error("task on {0} is a chance square")]
    ChanceSquare(NodeId),

    #[error("task on {0} is not a chance square")]
    NotChanceSquare(NodeId),

    #[error("task on {0} is already taken")]
    AlreadyTaken(NodeId),

    #[error("{0} already has a task in progress")]
    TaskInProgress(PlayerId),

    #[error("{category} objective is claimed by {owner}")]
    CategoryClaimed {
        category: TaskCategory,
        owner: PlayerId,
    },

    #[error("{player} is locked to {locked}, task is {requested}")]
    CategoryLocked {
        player: PlayerId,
        locked: TaskCategory,
        requested: TaskCategory,
    },

    #[error("insufficient {resource}: need {required}, have {available}")]
    InsufficientResources {
        resource: ResourceKind,
        required: i64,
        available: i64,
    },

    #[error("task on {node} is not owned by {player}")]
    NotOwner { player: PlayerId, node: NodeId },

    #[error("task on {0} is already completed")]
    AlreadyCompleted(NodeId),

    #[error("{category} objective is not ready to start")]
    ObjectiveNotReady { category: TaskCategory },

    #[error("cannot transfer a task to yourself")]
    SelfTransfer,

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("task on {node} is already pending for {target}")]
    AlreadyPending { target: PlayerId, node: NodeId },

    #[error("no pending task to resolve")]
    NoPendingTask,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for TaskError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TaskError::PlayerNotFound(_) => ErrorSeverity::Validation,
            TaskError::Oracle(error) => error.severity(),
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TaskError::NoTask(_) => "TASK_NO_TASK",
            TaskError::NotOnNode { .. } => "TASK_NOT_ON_NODE",
            TaskError::ChanceSquare(_) => "TASK_CHANCE_SQUARE",
            TaskError::NotChanceSquare(_) => "TASK_NOT_CHANCE_SQUARE",
            TaskError::AlreadyTaken(_) => "TASK_ALREADY_TAKEN",
            TaskError::TaskInProgress(_) => "TASK_IN_PROGRESS",
            TaskError::CategoryClaimed { .. } => "TASK_CATEGORY_CLAIMED",
            TaskError::CategoryLocked { .. } => "TASK_CATEGORY_LOCKED",
            TaskError::InsufficientResources { .. } => "TASK_INSUFFICIENT_RESOURCES",
            TaskError::NotOwner { .. } => "TASK_NOT_OWNER",
            TaskError::AlreadyCompleted(_) => "TASK_ALREADY_COMPLETED",
            TaskError::ObjectiveNotReady { .. } => "TASK_OBJECTIVE_NOT_READY",
            TaskError::SelfTransfer => "TASK_SELF_TRANSFER",
            TaskError::PlayerNotFound(_) => "TASK_PLAYER_NOT_FOUND",
            TaskError::AlreadyPending { .. } => "TASK_ALREADY_PENDING",
            TaskError::NoPendingTask => "TASK_NO_PENDING_TASK",
            TaskError::Oracle(error) => error.error_code(),
        }
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Effect summary shown before a selection is confirmed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionPreview {
    pub node: NodeId,
    pub category: TaskCategory,
    pub fee: ResourceCost,
    pub balance_after: ResourcePool,
    /// True if confirming would claim the (currently unclaimed) category.
    pub claims_category: bool,
}

/// What a committed selection changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionOutcome {
    pub node: NodeId,
    pub category: TaskCategory,
    pub fee: ResourceCost,
    pub claimed_category: bool,
    /// Owned tasks in the category after this selection.
    pub owned_in_category: usize,
    /// True exactly when this selection made the objective ready.
    pub objective_ready: bool,
}

/// How a task reaches a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SelectionRoute {
    /// Picked up by the player standing on the node.
    Direct,
    /// Accepted from the pending queue: a foreign claim and a task in
    /// progress do not block it.
    Delegated,
}

fn task_at(state: &GameState, node: NodeId) -> Result<&Task, TaskError> {
    state.board.task(node).ok_or(TaskError::NoTask(node))
}

fn require_on_node(state: &GameState, player: PlayerId, node: NodeId) -> Result<(), TaskError> {
    let current = state
        .player(player)
        .ok_or(TaskError::PlayerNotFound(player))?
        .node;
    if current != node {
        return Err(TaskError::NotOnNode { player, node });
    }
    Ok(())
}

/// Checks every selection precondition and computes the fee.
fn check_selection(
    state: &GameState,
    config: &dyn ConfigOracle,
    player_id: PlayerId,
    node: NodeId,
    route: SelectionRoute,
) -> Result<SelectionPreview, TaskError> {
    let player = state
        .player(player_id)
        .ok_or(TaskError::PlayerNotFound(player_id))?;
    let task = task_at(state, node)?;
    if task.is_chance() {
        return Err(TaskError::ChanceSquare(node));
    }
    if task.is_taken() {
        return Err(TaskError::AlreadyTaken(node));
    }
    if route == SelectionRoute::Direct && player.has_task_in_progress() {
        return Err(TaskError::TaskInProgress(player_id));
    }

    let category = task.category();
    let owner = state.objectives.owner(category);
    // Delegated tasks may come from a category someone else has claimed.
    if let Some(owner) = owner.filter(|_| {
        route == SelectionRoute::Direct && !state.objectives.is_open_to(category, player_id)
    }) {
        return Err(TaskError::CategoryClaimed { category, owner });
    }
    if let Some(locked) = player.category.filter(|locked| *locked != category) {
        return Err(TaskError::CategoryLocked {
            player: player_id,
            locked,
            requested: category,
        });
    }

    let fee = task.cost().fee(config.selection_fee_percent());
    if let Some(resource) = player.resources.shortfall(&fee) {
        return Err(TaskError::InsufficientResources {
            resource,
            required: fee.amount(resource),
            available: match resource {
                ResourceKind::Money => player.resources.money,
                ResourceKind::People => player.resources.people,
            },
        });
    }

    Ok(SelectionPreview {
        node,
        category,
        fee,
        balance_after: player.resources.after(&fee),
        claims_category: owner.is_none(),
    })
}

/// Reports the fee and effects of selecting the task at `node` without mutating state.
pub fn preview_selection(
    state: &GameState,
    config: &dyn ConfigOracle,
    player: PlayerId,
    node: NodeId,
) -> Result<SelectionPreview, TaskError> {
    require_on_node(state, player, node)?;
    check_selection(state, config, player, node, SelectionRoute::Direct)
}

/// Commits a validated selection: fee, ownership, claim, lock, objective flag.
fn commit_selection(
    state: &mut GameState,
    config: &dyn ConfigOracle,
    player_id: PlayerId,
    preview: SelectionPreview,
) -> Result<SelectionOutcome, TaskError> {
    let SelectionPreview {
        node, category, fee, ..
    } = preview;

    state
        .board
        .task_mut(node)
        .ok_or(TaskError::NoTask(node))?
        .assign(player_id);

    let player = state
        .player_mut(player_id)
        .ok_or(TaskError::PlayerNotFound(player_id))?;
    player.resources.deduct(&fee);
    player.tasks.push(node);
    if player.category.is_none() {
        player.category = Some(category);
    }

    let claimed_category = state.objectives.claim(category, player_id);
    let owned_in_category = state.owned_in_category(player_id, category);
    let objective_ready = owned_in_category >= config.objective_threshold()
        && state.objectives.mark_ready(category);

    Ok(SelectionOutcome {
        node,
        category,
        fee,
        claimed_category,
        owned_in_category,
        objective_ready,
    })
}

/// Takes the untaken task at the actor's node and pays the selection fee.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectTaskAction {
    pub actor: PlayerId,
    pub node: NodeId,
}

impl SelectTaskAction {
    pub fn new(actor: PlayerId, node: NodeId) -> Self {
        Self { actor, node }
    }
}

impl ActionTransition for SelectTaskAction {
    type Error = TaskError;
    type Result = SelectionOutcome;

    fn actor(&self) -> PlayerId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        preview_selection(state, env.config()?, self.actor, self.node).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<SelectionOutcome, TaskError> {
        let config = env.config()?;
        let preview = check_selection(state, config, self.actor, self.node, SelectionRoute::Direct)?;
        commit_selection(state, config, self.actor, preview)
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let task = task_at(state, self.node)?;
        if task.owner != Some(self.actor) {
            return Err(TaskError::NotOwner {
                player: self.actor,
                node: self.node,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Start and progression
// ============================================================================

/// Starts an owned task; progress advances by one tick per ended turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartTaskAction {
    pub actor: PlayerId,
    pub node: NodeId,
}

impl StartTaskAction {
    pub fn new(actor: PlayerId, node: NodeId) -> Self {
        Self { actor, node }
    }
}

impl ActionTransition for StartTaskAction {
    type Error = TaskError;
    type Result = u32;

    fn actor(&self) -> PlayerId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_on_node(state, self.actor, self.node)?;
        let task = task_at(state, self.node)?;
        if task.owner != Some(self.actor) || !task.is_taken() {
            return Err(TaskError::NotOwner {
                player: self.actor,
                node: self.node,
            });
        }
        if task.is_completed() {
            return Err(TaskError::AlreadyCompleted(self.node));
        }
        let player = state
            .player(self.actor)
            .ok_or(TaskError::PlayerNotFound(self.actor))?;
        if player.has_task_in_progress() {
            return Err(TaskError::TaskInProgress(self.actor));
        }
        let category = task.category();
        if env.config()?.require_objective_ready() && !state.objectives.is_ready(category) {
            return Err(TaskError::ObjectiveNotReady { category });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<u32, TaskError> {
        let ticks = task_at(state, self.node)?.definition.duration;
        let player = state
            .player_mut(self.actor)
            .ok_or(TaskError::PlayerNotFound(self.actor))?;
        player.progress_ticks = ticks;
        player.active_task = Some(self.node);
        Ok(ticks)
    }
}

/// End-of-turn task bookkeeping for one player.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnProgress {
    /// Task completed by this turn's tick.
    pub completed: Option<NodeId>,
    pub morale_delta: f32,
    /// Category lock released because every owned task in it is done.
    pub released: Option<TaskCategory>,
}

/// Advances the started task by one tick, completing it at zero, and
/// releases the category lock once every owned task in it is completed.
pub(crate) fn progress_active_task(state: &mut GameState, player_id: PlayerId) -> TurnProgress {
    let mut progress = TurnProgress::default();

    let finished = match state.player_mut(player_id) {
        Some(player) => match player.active_task {
            Some(node) => {
                player.progress_ticks = player.progress_ticks.saturating_sub(1);
                if player.progress_ticks == 0 {
                    player.active_task = None;
                    Some(node)
                } else {
                    None
                }
            }
            None => None,
        },
        None => return progress,
    };

    if let Some(task) = finished.and_then(|node| state.board.task_mut(node)) {
        task.status.insert(TaskFlags::COMPLETED);
        progress.completed = finished;
        progress.morale_delta = task.definition.morale_impact;
    }

    let locked = state.player(player_id).and_then(|player| player.category);
    let released = locked.filter(|category| {
        let mut in_category = state
            .owned_tasks(player_id)
            .filter(|(_, task)| task.category() == *category)
            .peekable();
        in_category.peek().is_some() && in_category.all(|(_, task)| task.is_completed())
    });

    if let Some(player) = state.player_mut(player_id) {
        if progress.completed.is_some() {
            player.apply_morale(progress.morale_delta);
        }
        if released.is_some() {
            player.category = None;
        }
    }
    progress.released = released;
    progress
}

// ============================================================================
// Chance squares
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChanceOutcome {
    Granted { node: NodeId, grant: ResourceCost },
    /// Resources were granted by an earlier visit; nothing changed.
    AlreadyOpened { node: NodeId },
}

/// Opens the chance square at the actor's node, granting its resources once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenChanceAction {
    pub actor: PlayerId,
    pub node: NodeId,
}

impl OpenChanceAction {
    pub fn new(actor: PlayerId, node: NodeId) -> Self {
        Self { actor, node }
    }
}

impl ActionTransition for OpenChanceAction {
    type Error = TaskError;
    type Result = ChanceOutcome;

    fn actor(&self) -> PlayerId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_on_node(state, self.actor, self.node)?;
        if !task_at(state, self.node)?.is_chance() {
            return Err(TaskError::NotChanceSquare(self.node));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<ChanceOutcome, TaskError> {
        let task = state
            .board
            .task_mut(self.node)
            .ok_or(TaskError::NoTask(self.node))?;
        if task.is_opened() {
            return Ok(ChanceOutcome::AlreadyOpened { node: self.node });
        }
        task.status.insert(TaskFlags::OPENED);
        let grant = *task.cost();

        state
            .player_mut(self.actor)
            .ok_or(TaskError::PlayerNotFound(self.actor))?
            .resources
            .credit(&grant);

        Ok(ChanceOutcome::Granted {
            node: self.node,
            grant,
        })
    }
}

// ============================================================================
// Delegation
// ============================================================================

/// Offers the untaken task at the actor's node to another player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestTransferAction {
    pub actor: PlayerId,
    pub node: NodeId,
    pub target: PlayerId,
}

impl RequestTransferAction {
    pub fn new(actor: PlayerId, node: NodeId, target: PlayerId) -> Self {
        Self {
            actor,
            node,
            target,
        }
    }
}

impl ActionTransition for RequestTransferAction {
    type Error = TaskError;
    type Result = ();

    fn actor(&self) -> PlayerId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if self.target == self.actor {
            return Err(TaskError::SelfTransfer);
        }
        let target = state
            .player(self.target)
            .ok_or(TaskError::PlayerNotFound(self.target))?;
        require_on_node(state, self.actor, self.node)?;

        let task = task_at(state, self.node)?;
        if task.is_chance() {
            return Err(TaskError::ChanceSquare(self.node));
        }
        if task.is_taken() {
            return Err(TaskError::AlreadyTaken(self.node));
        }
        let category = task.category();
        if let Some(locked) = target.category.filter(|locked| *locked != category) {
            return Err(TaskError::CategoryLocked {
                player: self.target,
                locked,
                requested: category,
            });
        }
        if target.pending.contains(&self.node) {
            return Err(TaskError::AlreadyPending {
                target: self.target,
                node: self.node,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), TaskError> {
        state
            .player_mut(self.target)
            .ok_or(TaskError::PlayerNotFound(self.target))?
            .pending
            .push_back(self.node);
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PendingDecision {
    Accept,
    Decline,
}

/// Accepts or declines the front of the actor's pending queue.
///
/// Accepting runs the selection logic with the claim check waived; the
/// category lock and the fee still apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvePendingAction {
    pub actor: PlayerId,
    pub decision: PendingDecision,
}

impl ResolvePendingAction {
    pub fn new(actor: PlayerId, decision: PendingDecision) -> Self {
        Self { actor, decision }
    }

    fn front(state: &GameState, actor: PlayerId) -> Result<NodeId, TaskError> {
        state
            .player(actor)
            .ok_or(TaskError::PlayerNotFound(actor))?
            .pending
            .front()
            .copied()
            .ok_or(TaskError::NoPendingTask)
    }
}

impl ActionTransition for ResolvePendingAction {
    type Error = TaskError;
    type Result = (NodeId, Option<SelectionOutcome>);

    fn actor(&self) -> PlayerId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let node = Self::front(state, self.actor)?;
        if self.decision == PendingDecision::Accept {
            check_selection(state, env.config()?, self.actor, node, SelectionRoute::Delegated)?;
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<(NodeId, Option<SelectionOutcome>), TaskError> {
        let node = Self::front(state, self.actor)?;
        let selection = match self.decision {
            PendingDecision::Accept => {
                let config = env.config()?;
                let preview = check_selection(state, config, self.actor, node, SelectionRoute::Delegated)?;
                Some(commit_selection(state, config, self.actor, preview)?)
            }
            PendingDecision::Decline => None,
        };
        state
            .player_mut(self.actor)
            .ok_or(TaskError::PlayerNotFound(self.actor))?
            .pending
            .pop_front();
        Ok((node, selection))
    }
}
