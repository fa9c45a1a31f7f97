#![allow(dead_code)]

use valley_core::{
    BoardGraph, Env, GameConfig, GameEngine, GameState, LoadedDice, NodeId, PlayerId, PlayerState,
    ResourceCost, ResourcePool, RngOracle, TaskCategory, TaskDefinition,
};
use valley_core::action::{Action, ActionResult};
use valley_core::engine::{ExecuteError, ExecutionOutcome};

/// RNG that returns the same draw for every seed.
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Draw that lands on Partly Cloudy (modifier 0) in Spring.
pub const NEUTRAL_DRAW: u32 = 400_000;

/// Board shaped as a path: hub - #1 - #2 - ... - #len.
pub fn path_board(len: u16) -> BoardGraph {
    let mut board = BoardGraph::unlinked(1, len);
    board.link(NodeId::HUB, NodeId(1));
    for i in 1..u32::from(len) {
        board.link(NodeId(i), NodeId(i + 1));
    }
    board
}

pub fn task(name: &str, category: TaskCategory, money: i64, people: i64) -> TaskDefinition {
    TaskDefinition::new(name, category, ResourceCost::new(money, people))
}

/// Seats `names` on `start` with the given balances and opens the first turn.
pub fn seat(board: BoardGraph, names: &[&str], start: NodeId, resources: ResourcePool) -> GameState {
    let mut state = GameState::new(7, "classic", board);
    for (seat, name) in names.iter().enumerate() {
        let id = PlayerId(seat as u8);
        state
            .players
            .push(PlayerState::new(id, *name, start, resources, 100.0));
        state.board.add_occupant(start, id);
    }
    state.begin_turn();
    state
}

/// Moves `player` onto `node` outside the engine, keeping occupancy in sync.
pub fn teleport(state: &mut GameState, player: PlayerId, node: NodeId) {
    let from = state.player(player).expect("player").node;
    state.board.remove_occupant(from, player);
    state.board.add_occupant(node, player);
    let player = state.player_mut(player).expect("player");
    player.node = node;
    player.visited.insert(node);
}

/// Puts the active player straight into the end-of-turn phase.
pub fn spend_all_moves(state: &mut GameState) {
    state.turn.last_roll = Some(1);
    state.turn.max_moves = Some(1);
    state.turn.moves_spent = 1;
}

/// Drives commands through the engine with a fixed die and weather draw.
pub struct Harness {
    pub config: GameConfig,
    pub rng: FixedRng,
    pub dice: LoadedDice,
}

impl Harness {
    pub fn new(face: u8, draw: u32) -> Self {
        Self {
            config: GameConfig::default(),
            rng: FixedRng(draw),
            dice: LoadedDice::new(face),
        }
    }

    pub fn execute(
        &self,
        state: &mut GameState,
        action: Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let env = Env::with_all(&self.config, &self.rng, &self.dice).into_game_env();
        GameEngine::new(state).execute(env, &action)
    }

    pub fn run(&self, state: &mut GameState, action: Action) -> ActionResult {
        self.execute(state, action)
            .unwrap_or_else(|err| panic!("{} rejected: {err}", action.name()))
            .result
    }
}
