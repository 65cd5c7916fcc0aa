//! Deterministic random choice for the computer player and the opening city.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical choices
//! - **Injectable**: The engine only sees the `ChoiceSource` trait, so tests
//!   can swap in scripted picks
//!
//! ```
//! use city_chain::core::{ChoiceSource, GameRng};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.choose_index(10), b.choose_index(10));
//! assert_eq!(a.choose_index(0), None);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform choices among `len` alternatives.
///
/// Implementations must return `None` only when `len == 0`, and otherwise an
/// index in `0..len`.
pub trait ChoiceSource {
    /// Pick an index in `0..len`.
    fn choose_index(&mut self, len: usize) -> Option<usize>;
}

/// Seeded RNG backing the computer's choices.
///
/// Uses ChaCha8 so a given seed replays the same game on every platform.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    ///
    /// The drawn seed is kept so it can be logged and replayed with `new`.
    #[must_use]
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().gen::<u64>();
        Self::new(seed)
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }
}

impl ChoiceSource for GameRng {
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.gen_range_usize(0..len))
    }
}

impl<C: ChoiceSource + ?Sized> ChoiceSource for &mut C {
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        (**self).choose_index(len)
    }
}
