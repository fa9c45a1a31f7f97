//! RNG oracle for deterministic random number generation.
//!
//! Every random decision in a session (edge percolation, task shuffle,
//! dice faces, weather draws) is derived from the session seed so that a
//! seed fully reproduces a game.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        (self.next_u32(seed) % sides.max(1)) + 1
    }

    /// Fair coin flip.
    fn coin(&self, seed: u64) -> bool {
        self.next_u32(seed) & 1 == 1
    }

    /// Uniform value in `0..bound` (returns 0 for an empty range).
    fn below(&self, seed: u64, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32(seed) % bound
    }
}

/// PCG random number generator (PCG-XSH-RR: 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Context tags separating independent draws that share a nonce.
pub mod context {
    pub const DICE: u32 = 0;
    pub const WEATHER: u32 = 1;
    pub const BOARD_EDGES: u32 = 16;
    pub const BOARD_HUB: u32 = 17;
    pub const TASK_SHUFFLE: u32 = 18;
    pub const TASK_PLACEMENT: u32 = 19;
}

/// Compute deterministic seed from game state components.
///
/// * `game_seed` - Base seed set at session start
/// * `nonce` - Command sequence number (or draw index for generation)
/// * `actor_id` - Seat of the acting player (0 for system draws)
/// * `context` - One of the [`context`] tags
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style combiners
    let mut hash = game_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Sequential draws over a stateless oracle, one seed per draw.
///
/// Used by board generation, where many draws happen before the first
/// command and no nonce is available.
pub struct RngStream<'a> {
    rng: &'a dyn RngOracle,
    game_seed: u64,
    context: u32,
    counter: u64,
}

impl<'a> RngStream<'a> {
    pub fn new(rng: &'a dyn RngOracle, game_seed: u64, context: u32) -> Self {
        Self {
            rng,
            game_seed,
            context,
            counter: 0,
        }
    }

    fn next_seed(&mut self) -> u64 {
        let seed = compute_seed(self.game_seed, self.counter, 0, self.context);
        self.counter += 1;
        seed
    }

    pub fn next_u32(&mut self) -> u32 {
        let seed = self.next_seed();
        self.rng.next_u32(seed)
    }

    pub fn coin(&mut self) -> bool {
        let seed = self.next_seed();
        self.rng.coin(seed)
    }

    pub fn below(&mut self, bound: usize) -> usize {
        let bound = u32::try_from(bound).unwrap_or(u32::MAX);
        let seed = self.next_seed();
        self.rng.below(seed, bound) as usize
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}
