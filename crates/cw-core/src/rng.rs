//! Deterministic simulation RNG.
//!
//! The only randomness in the model is the per-record goal choice made while
//! loading populations.  A single root `SimRng` is seeded from the run
//! configuration and each population loader takes a `child` derived from it
//! with the population's kind index as offset, so adding a population never
//! changes the draws of the ones loaded before it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG for global operations (goal selection at load time).
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child RNG from the root seed and `offset`.
    ///
    /// Unlike drawing from `self`, this does not advance the parent, so the
    /// child for a given offset is the same regardless of how many children
    /// were derived before it.
    pub fn child(seed: u64, offset: u64) -> SimRng {
        let child_seed = seed ^ offset.wrapping_add(1).wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
