//! ks2pipi: A toy Monte Carlo generator of K⁰s → π⁺π⁻ decays
//!
//!
//! # Introduction (for the physicist)
//!
//! This small computational program generates synthetic datasets for testing a
//! kinematic fitter. Each event is the decay of a short-lived neutral kaon
//! into a pair of charged pions, as seen by a detector of finite resolution.
//!
//! The decay is isotropic in the kaon rest frame. The kaon may either be at
//! rest or carry a fixed momentum in the lab frame, in which case the pions
//! are Lorentz-boosted accordingly. The measured pion momenta are then smeared
//! by a multivariate normal error of configurable covariance.
//!
//!
//! # Introduction (for the numerical guy)
//!
//! Unsmeared events conserve 4-momentum exactly, up to floating-point rounding
//! errors: the π⁺π⁻ pair has the kaon mass and carries the kaon momentum. This
//! is what the `selfcheck` module verifies.
//!
//!
//! # Introduction (for the computer guy)
//!
//! Events are generated by batches, with one matrix row per event, so that all
//! the kinematics of a batch can be computed with a few matrix operations:
//!
//! * `decay` samples the pion momenta in the kaon rest frame,
//!   and boosts them to the lab frame if requested,
//! * `resolution` adds the measurement errors,
//! * `evgen` chains both steps together,
//! * `scheduling` splits large runs in batches which can run in parallel.
//!
//! The random number generator is always passed around explicitly, so a run is
//! fully determined by its seed.

#![warn(missing_docs)]

pub mod config;
pub mod decay;
pub mod event;
pub mod evgen;
pub mod histogram;
pub mod kinematics;
pub mod masses;
pub mod momentum;
pub mod numeric;
pub mod output;
pub mod random;
pub mod resolution;
pub mod scheduling;
pub mod selfcheck;

pub use crate::{
    decay::DecaySampler,
    event::TwoTrackBatch,
    evgen::{generate, EventGenerator},
    masses::{MassTable, Particle},
    random::RandomGenerator,
    resolution::{Covariance, Resolution},
};

/// We'll use eyre's type-erased result type throughout the application
pub type Result<T> = eyre::Result<T>;
