//! Deterministic dice throws.
//!
//! The engine never rolls for itself: a host rolls with `DiceRng` (or any
//! source it trusts) and passes the face to the turn controller. Seeding the
//! throw makes whole games reproducible.
//!
//! ```
//! use ashta_engine::core::DiceRng;
//!
//! let mut a = DiceRng::new(7);
//! let mut b = DiceRng::new(7);
//! assert_eq!(a.roll(), b.roll());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::config::DICE_FACES;

/// Seeded dice with forking for independent games.
#[derive(Clone, Debug)]
pub struct DiceRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl DiceRng {
    /// Create dice with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork an independent stream, e.g. one per simulated game.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Throw once. Every face is equally likely.
    pub fn roll(&mut self) -> u8 {
        DICE_FACES[self.inner.gen_range(0..DICE_FACES.len())]
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> DiceRngState {
        DiceRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &DiceRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable dice state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRngState {
    pub seed: u64,
    /// ChaCha8 word position
    pub word_pos: u128,
    pub fork_counter: u64,
}
