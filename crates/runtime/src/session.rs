//! Hot-seat session driver.
//!
//! [`GameSession`] owns the canonical [`GameState`] together with the rules
//! and oracles it is played with. Every command goes through the engine,
//! committed outcomes are turned into [`GameEvent`]s on the bus, and the
//! state can be saved to and restored from a [`StateRepository`].

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use valley_content::ContentFactory;
use valley_core::engine;
use valley_core::{
    Action, ConfigOracle, DiceOracle, Env, ExecutionOutcome, GameConfig, GameEngine, GameEnv,
    GameError, GameOutcome, GameState, NodeId, PcgRng, PendingDecision, PlayerId, PlayerState,
    RngOracle, Season, SelectionPreview, StandardDice, TaskCategory, TaskDefinition, TurnPhase,
    Weather,
};

use crate::error::{Result, RuntimeError};
use crate::events::{EventBus, GameEvent, extract_events};
use crate::repository::{SaveFile, StateRepository};

/// A running game: state, rules, oracles, events and persistence.
pub struct GameSession {
    state: GameState,
    config: GameConfig,
    rng: Arc<dyn RngOracle>,
    dice: Arc<dyn DiceOracle>,
    bus: EventBus,
    repository: Option<Arc<dyn StateRepository>>,
}

impl GameSession {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    // ===== queries =====

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    pub fn phase(&self) -> TurnPhase {
        self.state.phase()
    }

    pub fn active_player(&self) -> Option<&PlayerState> {
        self.state.active_player()
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.state.player(id)
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.state.players
    }

    /// Node the active player stands on.
    pub fn current_node(&self) -> Option<NodeId> {
        self.active_player().map(|player| player.node)
    }

    pub fn legal_moves(&self) -> Vec<NodeId> {
        self.state.legal_moves()
    }

    pub fn moves_remaining(&self) -> u8 {
        self.state.moves_remaining()
    }

    pub fn season(&self) -> Season {
        self.state.season()
    }

    /// Weather of the current turn, once the dice have been rolled.
    pub fn weather(&self) -> Option<Weather> {
        self.state.turn.weather
    }

    pub fn objective_owner(&self, category: TaskCategory) -> Option<PlayerId> {
        self.state.objectives.owner(category)
    }

    pub fn objective_ready(&self, category: TaskCategory) -> bool {
        self.state.objectives.is_ready(category)
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.state.outcome
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Players the active player may delegate the task on `node` to.
    pub fn eligible_transfer_targets(&self, node: NodeId) -> Vec<PlayerId> {
        self.state.eligible_transfer_targets(self.active_id(), node)
    }

    // ===== commands =====

    /// Executes `action` and publishes the resulting events.
    ///
    /// A rejected command leaves the state untouched and publishes a
    /// [`GameEvent::CommandRejected`].
    pub fn execute(&mut self, action: Action) -> Result<ExecutionOutcome> {
        let env: GameEnv<'_> = Env::new(
            Some(&self.config as &dyn ConfigOracle),
            Some(self.rng.as_ref()),
            Some(self.dice.as_ref()),
        );

        match GameEngine::new(&mut self.state).execute(env, &action) {
            Ok(outcome) => {
                tracing::debug!(
                    action = action.name(),
                    actor = %action.actor(),
                    nonce = outcome.nonce,
                    "command committed"
                );
                for event in extract_events(action.actor(), &outcome, &self.state) {
                    self.bus.publish(event);
                }
                if let Some(game_over) = outcome.game_over {
                    tracing::info!(
                        player = %game_over.player,
                        depleted = %game_over.depleted,
                        "session finished"
                    );
                }
                Ok(outcome)
            }
            Err(error) => {
                tracing::warn!(
                    action = action.name(),
                    actor = %action.actor(),
                    code = error.error_code(),
                    %error,
                    "command rejected"
                );
                self.bus.publish(GameEvent::CommandRejected {
                    player: action.actor(),
                    action: action.name().to_owned(),
                    code: error.error_code().to_owned(),
                });
                Err(error.into())
            }
        }
    }

    fn active_id(&self) -> PlayerId {
        self.state.turn.active
    }

    /// Position of the active player; falls back to the hub for an empty table.
    fn active_node(&self) -> NodeId {
        self.current_node().unwrap_or(NodeId::HUB)
    }

    pub fn roll_dice(&mut self) -> Result<ExecutionOutcome> {
        self.execute(Action::roll_dice(self.active_id()))
    }

    pub fn move_to(&mut self, to: NodeId) -> Result<ExecutionOutcome> {
        let action = Action::move_to(self.active_id(), self.active_node(), to);
        self.execute(action)
    }

    /// Fee and effects of selecting the task on `node`, without committing.
    pub fn preview_selection(&self, node: NodeId) -> Result<SelectionPreview> {
        let env: GameEnv<'_> = Env::new(
            Some(&self.config as &dyn ConfigOracle),
            Some(self.rng.as_ref()),
            Some(self.dice.as_ref()),
        );
        let preview = engine::preview_selection(&self.state, &env, self.active_id(), node)?;
        Ok(preview)
    }

    pub fn select_task(&mut self, node: NodeId) -> Result<ExecutionOutcome> {
        self.execute(Action::select_task(self.active_id(), node))
    }

    pub fn start_task(&mut self, node: NodeId) -> Result<ExecutionOutcome> {
        self.execute(Action::start_task(self.active_id(), node))
    }

    pub fn open_chance(&mut self, node: NodeId) -> Result<ExecutionOutcome> {
        self.execute(Action::open_chance(self.active_id(), node))
    }

    pub fn request_transfer(
        &mut self,
        node: NodeId,
        target: PlayerId,
    ) -> Result<ExecutionOutcome> {
        self.execute(Action::request_transfer(self.active_id(), node, target))
    }

    pub fn resolve_pending(&mut self, decision: PendingDecision) -> Result<ExecutionOutcome> {
        self.execute(Action::resolve_pending(self.active_id(), decision))
    }

    pub fn end_turn(&mut self) -> Result<ExecutionOutcome> {
        self.execute(Action::end_turn(self.active_id()))
    }

    // ===== persistence =====

    /// Saves the current state under its nonce and returns that nonce.
    pub fn save(&self) -> Result<u64> {
        let repository = self.repository.as_ref().ok_or(RuntimeError::NoRepository)?;
        let save = SaveFile::seal(self.state.clone(), Some(self.config.clone()))?;
        let nonce = save.nonce();
        repository.save(nonce, &save)?;

        tracing::info!(nonce, digest = %save.digest, "session saved");
        self.bus.publish(GameEvent::SessionSaved { nonce });
        Ok(nonce)
    }

    /// Replaces the current state with the save recorded under `nonce`.
    pub fn load(&mut self, nonce: u64) -> Result<()> {
        let repository = self.repository.as_ref().ok_or(RuntimeError::NoRepository)?;
        let save = repository
            .load(nonce)?
            .ok_or(RuntimeError::SaveNotFound(nonce))?;
        self.restore(save);

        tracing::info!(nonce, "session loaded");
        self.bus.publish(GameEvent::SessionLoaded { nonce });
        Ok(())
    }

    /// Nonces of the saves available to [`GameSession::load`].
    pub fn saves(&self) -> Result<Vec<u64>> {
        let repository = self.repository.as_ref().ok_or(RuntimeError::NoRepository)?;
        Ok(repository.list_nonces()?)
    }

    fn restore(&mut self, save: SaveFile) {
        if save.seasons != Season::ALL {
            tracing::warn!(seasons = ?save.seasons, "save uses a different season cycle");
        }
        self.state = save.state;
        if let Some(config) = save.config {
            self.config = config.validated();
        }
    }
}

/// Builder for [`GameSession`].
pub struct SessionBuilder {
    config: Option<GameConfig>,
    players: Vec<String>,
    catalog: Vec<TaskDefinition>,
    seed: Option<u64>,
    rng: Option<Arc<dyn RngOracle>>,
    dice: Option<Arc<dyn DiceOracle>>,
    repository: Option<Arc<dyn StateRepository>>,
    bus: Option<EventBus>,
    resume: Option<u64>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: None,
            players: Vec::new(),
            catalog: Vec::new(),
            seed: None,
            rng: None,
            dice: None,
            repository: None,
            bus: None,
            resume: None,
        }
    }

    /// Override the rules (defaults to [`GameConfig::default`]).
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Seat players in turn order.
    pub fn players<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.players = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn catalog(mut self, catalog: Vec<TaskDefinition>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Load rules and catalog from a data directory.
    pub fn content(mut self, factory: &ContentFactory) -> Result<Self> {
        let config = factory
            .load_config()
            .map_err(|e| RuntimeError::Content(format!("{e:#}")))?;
        let catalog = factory
            .load_tasks()
            .map_err(|e| RuntimeError::Content(format!("{e:#}")))?;
        self.config = Some(config);
        self.catalog = catalog;
        Ok(self)
    }

    /// Fix the session seed (defaults to the wall clock).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Arc::new(rng));
        self
    }

    pub fn dice(mut self, dice: impl DiceOracle + 'static) -> Self {
        self.dice = Some(Arc::new(dice));
        self
    }

    pub fn repository(mut self, repository: Arc<dyn StateRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Share an existing bus instead of creating one.
    pub fn bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Resume from the save under `nonce` instead of starting a new game.
    pub fn resume(mut self, nonce: u64) -> Self {
        self.resume = Some(nonce);
        self
    }

    pub fn build(self) -> Result<GameSession> {
        let config = self.config.unwrap_or_default().validated();
        let rng = self.rng.unwrap_or_else(|| Arc::new(PcgRng));
        let dice = self.dice.unwrap_or_else(|| Arc::new(StandardDice));
        let bus = self.bus.unwrap_or_default();

        if let Some(nonce) = self.resume {
            let repository = self.repository.ok_or(RuntimeError::NoRepository)?;
            let save = repository
                .load(nonce)?
                .ok_or(RuntimeError::SaveNotFound(nonce))?;
            let mut session = GameSession {
                state: save.state.clone(),
                config,
                rng,
                dice,
                bus,
                repository: Some(repository),
            };
            session.restore(save);
            tracing::info!(
                nonce,
                players = session.state.players.len(),
                "session resumed"
            );
            session.bus.publish(GameEvent::SessionLoaded { nonce });
            return Ok(session);
        }

        let capacity = config.task_capacity();
        if self.catalog.len() > capacity {
            tracing::warn!(
                catalog = self.catalog.len(),
                capacity,
                dropped = self.catalog.len() - capacity,
                "catalog is larger than the board, excess tasks are dropped"
            );
        }

        let seed = self.seed.unwrap_or_else(wall_clock_seed);
        let state = GameState::new_session(
            &config,
            self.players.as_slice(),
            &self.catalog,
            seed,
            rng.as_ref(),
        )
        .map_err(RuntimeError::InitialState)?;

        tracing::info!(
            seed,
            players = state.players.len(),
            nodes = state.board.len(),
            catalog = self.catalog.len(),
            "session started"
        );

        Ok(GameSession {
            state,
            config,
            rng,
            dice,
            bus,
            repository: self.repository,
        })
    }
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
