//! This module implements some domain-specific momentum handling logic.

use crate::numeric::Float;
use nalgebra::{DVector, MatrixXx3, MatrixXx4, SVector};

/// 4-momentum dimension
pub const MOMENTUM_DIM: usize = 4;

/// Relativistic 4-momentum, energy first
pub type Momentum4 = SVector<Float, MOMENTUM_DIM>;

/// Spatial 3-momentum
pub type Momentum3 = SVector<Float, 3>;

/// Batch of 3-momenta (rows are samples, columns are X, Y, Z)
pub type MomentumBatch = MatrixXx3<Float>;

/// Batch of 4-momenta (rows are samples, columns are E, X, Y, Z)
pub type FourMomentumBatch = MatrixXx4<Float>;

/// Batch of per-sample scalars (energies, masses...)
pub type ScalarBatch = DVector<Float>;

/// Convenience const for accessing the E coordinate of a 4-vector
pub const E: usize = 0;

/// Convenience const for accessing the X coordinate of a 4-vector
pub const X: usize = 1;

/// Convenience const for accessing the Y coordinate of a 4-vector
pub const Y: usize = 2;

/// Convenience const for accessing the Z coordinate of a 4-vector
pub const Z: usize = 3;
