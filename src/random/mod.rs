//! Random number generation module, built on the "rand" crate that is the Rust
//! standard for RNGs.
//!
//! The random stream is an explicit value owned by the caller, so that runs
//! are reproducible given a seed and parallel workers never share state.

mod standard;

pub use self::standard::{RandGenerator as RandomGenerator, DEFAULT_SEED};
