//! This module exposes the random number generation facilities needed by the
//! event generator on top of the abstractions of the standard "rand" crate.

use crate::numeric::Float;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

// Select random number generation engine in use
#[cfg(feature = "f32")]
type Engine = rand_xoshiro::Xoshiro128Plus;
#[cfg(not(feature = "f32"))]
type Engine = rand_xoshiro::Xoshiro256Plus;

/// Seed used when none is specified
pub const DEFAULT_SEED: u64 = 12345;

/// Seedable random stream
#[derive(Clone, Debug)]
pub struct RandGenerator {
    rng: Engine,
}
//
impl RandGenerator {
    /// Spawn a new random number generator with the default seed
    pub fn new() -> Self {
        Self::seeded(DEFAULT_SEED)
    }

    /// Spawn a new random number generator with an arbitrary seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Engine::seed_from_u64(seed),
        }
    }

    /// Generate a random floating-point number between 0 and 1
    pub fn random(&mut self) -> Float {
        self.rng.gen()
    }

    /// Generate a normally distributed number (zero mean, unit variance)
    pub fn standard_normal(&mut self) -> Float {
        self.rng.sample(StandardNormal)
    }

    /// Switch to a non-overlapping sub-stream
    ///
    /// Equivalent to 2^128 (2^64 in single precision) calls to `random()`, so
    /// a chain of jumps hands out independent streams to event batches.
    pub fn jump(&mut self) {
        self.rng.jump();
    }
}
//
impl Default for RandGenerator {
    fn default() -> Self {
        Self::new()
    }
}
