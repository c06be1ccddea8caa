//! Deterministic random number generation for the round engine.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces an identical session
//! - **Forkable**: Each game in a session draws from its own branch, so a game
//!   does not depend on how many rounds earlier games used
//! - **Context streams**: Independent sequences for problems and option shuffles
//!
//! ```
//! use math_race::core::GameRng;
//!
//! let mut session = GameRng::new(42);
//! let game = session.fork();
//! let mut problems = game.for_context("problems");
//!
//! let mut replay = GameRng::new(42).fork().for_context("problems");
//! assert_eq!(problems.gen_inclusive(1, 100), replay.gen_inclusive(1, 100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Deterministic RNG backing every random draw the engine makes.
///
/// Uses ChaCha8 for speed while keeping high quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
            fork_counter: 0,
        }
    }

    /// Uniform integer in `[min, max]`, both ends inclusive.
    pub fn gen_inclusive(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max, "empty range {min}..={max}");
        self.inner.gen_range(min..=max)
    }

    /// Uniform signed offset in `[-spread, spread]`.
    pub fn gen_offset(&mut self, spread: i64) -> i64 {
        self.inner.gen_range(-spread..=spread)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Fisher–Yates shuffle in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_inclusive(0, 1000), rng2.gen_inclusive(0, 1000));
        }
    }

    #[test]
    fn test_inclusive_bounds_are_reached() {
        let mut rng = GameRng::new(7);
        let draws: Vec<_> = (0..500).map(|_| rng.gen_inclusive(1, 4)).collect();

        assert!(draws.iter().all(|d| (1..=4).contains(d)));
        assert!(draws.contains(&1));
        assert!(draws.contains(&4));
    }

    #[test]
    fn test_offset_is_symmetric_range() {
        let mut rng = GameRng::new(9);
        let draws: Vec<_> = (0..500).map(|_| rng.gen_offset(5)).collect();

        assert!(draws.iter().all(|d| (-5..=5).contains(d)));
        assert!(draws.contains(&-5));
        assert!(draws.contains(&5));
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = GameRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..10).map(|_| rng.gen_inclusive(0, 1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| forked.gen_inclusive(0, 1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_is_deterministic() {
        let rng1 = GameRng::new(42);
        let rng2 = GameRng::new(42);

        let mut ctx1 = rng1.for_context("problems");
        let mut ctx2 = rng2.for_context("problems");
        let mut other = rng1.for_context("options");

        let seq1: Vec<_> = (0..10).map(|_| ctx1.gen_inclusive(0, 1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| ctx2.gen_inclusive(0, 1000)).collect();
        let seq3: Vec<_> = (0..10).map(|_| other.gen_inclusive(0, 1000)).collect();

        assert_eq!(seq1, seq2);
        assert_ne!(seq1, seq3);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_ne!(data, original);
        data.sort();
        assert_eq!(data, original);
    }
}
