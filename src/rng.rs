// src/rng.rs

//! Randomness capability for the effects.
//!
//! Effects never touch a concrete RNG; they draw through the `RandomSource`
//! trait so tests can substitute fixed or scripted sequences. The production
//! implementation wraps a `SmallRng` seeded from entropy; reproducibility
//! across runs is not a requirement.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Uniform random values on demand.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`. `bound` must be nonzero.
    fn next_below(&mut self, bound: usize) -> usize;

    /// Uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Fair coin flip.
    fn next_bool(&mut self) -> bool;
}

/// Production source backed by `SmallRng`.
pub struct EntropyRng {
    inner: SmallRng,
}

impl EntropyRng {
    pub fn new() -> Self {
        EntropyRng {
            inner: SmallRng::from_entropy(),
        }
    }

    /// Deterministic source for tests and debugging.
    pub fn seeded(seed: u64) -> Self {
        EntropyRng {
            inner: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRng {
    fn next_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "next_below called with zero bound");
        self.inner.gen_range(0..bound)
    }

    fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn next_bool(&mut self) -> bool {
        self.inner.gen::<bool>()
    }
}
