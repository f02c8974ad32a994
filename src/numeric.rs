//! Basic numerical concepts used throughout the program

#![allow(missing_docs)]

// Floating-point precision is configured here
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(feature = "f32")]
pub use std::f32 as floats;
#[cfg(not(feature = "f32"))]
pub type Float = f64;
#[cfg(not(feature = "f32"))]
pub use std::f64 as floats;

/// Relative tolerance of the physical consistency checks
///
/// Mirrors the defaults of numpy's `allclose`, which the generator used to be
/// validated against. Single precision cannot meet it and gets a looser one.
#[cfg(not(feature = "f32"))]
pub const REL_TOLERANCE: Float = 1e-5;
#[cfg(feature = "f32")]
pub const REL_TOLERANCE: Float = 1e-3;

/// Absolute tolerance of the physical consistency checks
#[cfg(not(feature = "f32"))]
pub const ABS_TOLERANCE: Float = 1e-8;
#[cfg(feature = "f32")]
pub const ABS_TOLERANCE: Float = 1e-2;

/// Truth that `a` and `b` agree within the configured tolerances
///
/// Like numpy's `isclose`, the comparison is asymmetric: `b` is the reference.
pub fn is_close(a: Float, b: Float) -> bool {
    (a - b).abs() <= ABS_TOLERANCE + REL_TOLERANCE * b.abs()
}
