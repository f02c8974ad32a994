//! Relativistic kinematics: Lorentz boosts, energy-momentum relations and
//! invariant masses, in natural units (c = 1)
//!
//! These are pure functions. Physically meaningless inputs (speeds above the
//! speed of light, unbound 4-momenta...) are not rejected, they propagate as
//! NaN or infinities into the results.

use crate::{
    momentum::{FourMomentumBatch, Momentum3, Momentum4, MomentumBatch, ScalarBatch, E, X},
    numeric::Float,
};

use prefix_num_ops::real::*;

/// Lorentz factor γ of a frame moving at a fraction `beta` of light speed
pub fn lorentz_factor(beta: Float) -> Float {
    1. / sqrt(1. - beta * beta)
}

/// Lorentz transformation to a frame moving at some velocity
///
/// The transform is computed once and can then be applied to any number of
/// 4-momenta, which is how a whole batch of events shares a single boost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LorentzBoost {
    /// Speed of the target frame, as a fraction of light speed
    beta: Float,

    /// Lorentz factor matching beta
    gamma: Float,

    /// Unit vector along the velocity (zero for the identity)
    direction: Momentum3,
}
//
impl LorentzBoost {
    /// Prepare a boost to a frame moving with velocity `velocity`
    ///
    /// A zero velocity yields the identity transformation.
    pub fn new(velocity: &Momentum3) -> Self {
        let beta = velocity.norm();
        let direction = if beta > 0. {
            velocity / beta
        } else {
            Momentum3::zeros()
        };
        Self {
            beta,
            gamma: lorentz_factor(beta),
            direction,
        }
    }

    /// Transform going back to the original frame
    pub fn inverse(&self) -> Self {
        Self {
            direction: -self.direction,
            ..*self
        }
    }

    /// Boost a single 4-momentum
    pub fn apply(&self, p4: &Momentum4) -> Momentum4 {
        let t = p4[E];
        let r = p4.fixed_rows::<3>(X);
        let r_par = r.dot(&self.direction);
        let shift = (self.gamma - 1.) * r_par - self.gamma * self.beta * t;
        Momentum4::from_fn(|coord, _| match coord {
            E => self.gamma * (t - self.beta * r_par),
            _ => r[coord - X] + shift * self.direction[coord - X],
        })
    }

    /// Boost a batch of 4-momenta, row by row
    pub fn apply_batch(&self, p4: &FourMomentumBatch) -> FourMomentumBatch {
        let r_par = p4.fixed_columns::<3>(X) * self.direction;
        FourMomentumBatch::from_fn(p4.nrows(), |row, coord| {
            let t = p4[(row, E)];
            match coord {
                E => self.gamma * (t - self.beta * r_par[row]),
                _ => {
                    let shift = (self.gamma - 1.) * r_par[row] - self.gamma * self.beta * t;
                    p4[(row, coord)] + shift * self.direction[coord - X]
                }
            }
        })
    }
}

/// Boost a batch of 4-momenta to a frame moving with velocity `velocity`
pub fn boost(p4: &FourMomentumBatch, velocity: &Momentum3) -> FourMomentumBatch {
    LorentzBoost::new(velocity).apply_batch(p4)
}

/// Energy of a particle of mass `mass` and 3-momentum `p3`
pub fn energy(mass: Float, p3: &Momentum3) -> Float {
    sqrt(mass * mass + p3.norm_squared())
}

/// Energies of a batch of particles of identical mass
pub fn energies(mass: Float, p3: &MomentumBatch) -> ScalarBatch {
    ScalarBatch::from_fn(p3.nrows(), |row, _| {
        sqrt(mass * mass + p3.row(row).norm_squared())
    })
}

/// Squared invariant mass of a 4-momentum (negative if unbound)
pub fn mass_squared(p4: &Momentum4) -> Float {
    p4[E] * p4[E] - p4.fixed_rows::<3>(X).norm_squared()
}

/// Squared invariant masses of a batch of 4-momenta
pub fn mass_squared_batch(p4: &FourMomentumBatch) -> ScalarBatch {
    ScalarBatch::from_fn(p4.nrows(), |row, _| {
        p4[(row, E)] * p4[(row, E)] - p4.row(row).fixed_columns::<3>(X).norm_squared()
    })
}

/// Invariant mass of a 4-momentum (NaN if unbound)
pub fn invariant_mass(p4: &Momentum4) -> Float {
    sqrt(mass_squared(p4))
}

/// Invariant masses of a batch of 4-momenta
pub fn invariant_mass_batch(p4: &FourMomentumBatch) -> ScalarBatch {
    mass_squared_batch(p4).map(sqrt)
}

/// 4-momentum of a particle of mass `mass` and 3-momentum `p3`
pub fn lift_one(p3: &Momentum3, mass: Float) -> Momentum4 {
    let e = energy(mass, p3);
    Momentum4::new(e, p3[0], p3[1], p3[2])
}

/// 4-momenta of a batch of particles of identical mass
pub fn lift(p3: &MomentumBatch, mass: Float) -> FourMomentumBatch {
    let e = energies(mass, p3);
    FourMomentumBatch::from_fn(p3.nrows(), |row, coord| match coord {
        E => e[row],
        _ => p3[(row, coord - X)],
    })
}
