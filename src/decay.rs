//! This module provides K⁰s → π⁺π⁻ decay generation facilities

use crate::{
    event::TwoTrackBatch,
    kinematics::{self, LorentzBoost},
    masses::MassTable,
    momentum::{FourMomentumBatch, Momentum3, MomentumBatch, ScalarBatch, E, X},
    numeric::{floats::consts::TAU, Float},
    random::RandomGenerator,
};

use eyre::ensure;
use prefix_num_ops::real::*;

/// Generator of isotropic two-body decays into equal-mass daughters
#[derive(Clone, Debug)]
pub struct DecaySampler {
    /// Masses of the parent and daughter particles
    masses: MassTable,

    /// Energy of each daughter in the parent rest frame
    e_daughter: Float,

    /// Momentum magnitude of each daughter in the parent rest frame
    p_daughter: Float,
}
//
impl DecaySampler {
    // ### CONSTRUCTION ###

    /// Prepare decay generation for a given set of masses
    pub fn new(masses: MassTable) -> eyre::Result<Self> {
        // In the parent rest frame, two equal-mass daughters share the parent
        // mass evenly as energy
        let e_daughter = masses.k_short / 2.;
        ensure!(
            e_daughter >= masses.charged_pion,
            "A parent of mass {} cannot decay into two daughters of mass {}",
            masses.k_short,
            masses.charged_pion
        );
        let p_daughter = sqrt(e_daughter * e_daughter - masses.charged_pion * masses.charged_pion);
        Ok(Self {
            masses,
            e_daughter,
            p_daughter,
        })
    }

    // ### EVENT GENERATION ###

    /// Generate `num_events` decays in the parent rest frame
    ///
    /// Decay directions are uniformly distributed on the unit sphere, and the
    /// two daughters are emitted back to back.
    ///
    pub fn sample_rest_frame(&self, num_events: usize, rng: &mut RandomGenerator) -> TwoTrackBatch {
        // Random number generation is kept well-separated from computations:
        // all polar angles are drawn first, then all azimuthal angles.
        let cos_theta = ScalarBatch::from_fn(num_events, |_, _| 2. * rng.random() - 1.);
        let phi = ScalarBatch::from_fn(num_events, |_, _| TAU * rng.random());

        // Compute the π⁺ momenta, the π⁻ ones are their opposite
        let sin_theta = cos_theta.map(|cos| sqrt(1. - cos * cos));
        let cos_phi = phi.map(cos);
        let sin_phi = phi.map(sin);
        let pi_plus = MomentumBatch::from_fn(num_events, |ev, coord| {
            self.p_daughter
                * match coord {
                    0 => sin_theta[ev] * cos_phi[ev],
                    1 => sin_theta[ev] * sin_phi[ev],
                    2 => cos_theta[ev],
                    _ => unreachable!(),
                }
        });
        let pi_minus = -&pi_plus;
        TwoTrackBatch::new(pi_plus, pi_minus)
    }

    /// Generate `num_events` decays of a parent of 3-momentum `lab_momentum`
    ///
    /// Without a lab momentum, the decays are left in the parent rest frame.
    /// Otherwise, all events share the same parent momentum, and thus the
    /// same Lorentz boost from the rest frame to the lab frame.
    ///
    pub fn sample(
        &self,
        num_events: usize,
        lab_momentum: Option<&Momentum3>,
        rng: &mut RandomGenerator,
    ) -> TwoTrackBatch {
        let rest_frame = self.sample_rest_frame(num_events, rng);
        match lab_momentum {
            None => rest_frame,
            Some(p_lab) => {
                let boost = LorentzBoost::new(&self.lab_boost_velocity(p_lab));
                let (pi_plus, pi_minus) = rest_frame.into_tracks();
                TwoTrackBatch::new(
                    self.boost_to_lab(&boost, &pi_plus),
                    self.boost_to_lab(&boost, &pi_minus),
                )
            }
        }
    }

    /// Boost velocity taking rest frame daughters to a lab frame where the
    /// parent has 3-momentum `p_lab`
    ///
    /// The boost goes to a frame moving at -P/E with respect to the rest frame,
    /// in which the parent moves at +P/E.
    ///
    pub fn lab_boost_velocity(&self, p_lab: &Momentum3) -> Momentum3 {
        -p_lab / kinematics::energy(self.masses.k_short, p_lab)
    }

    /// Boost rest frame daughter momenta into the lab frame
    fn boost_to_lab(&self, boost: &LorentzBoost, p3_rest: &MomentumBatch) -> MomentumBatch {
        let p4_rest = FourMomentumBatch::from_fn(p3_rest.nrows(), |ev, coord| match coord {
            E => self.e_daughter,
            _ => p3_rest[(ev, coord - X)],
        });
        boost.apply_batch(&p4_rest).fixed_columns::<3>(X).into_owned()
    }

    // ### DECAY PROPERTIES ###

    /// Masses used by this generator
    pub fn masses(&self) -> &MassTable {
        &self.masses
    }

    /// Energy of each daughter in the parent rest frame
    pub fn daughter_energy(&self) -> Float {
        self.e_daughter
    }

    /// Momentum magnitude of each daughter in the parent rest frame
    pub fn daughter_momentum(&self) -> Float {
        self.p_daughter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn sampler() -> DecaySampler {
        DecaySampler::new(MassTable::pdg()).unwrap()
    }

    #[test]
    fn rest_frame_kinematics() {
        let sampler = sampler();
        assert_eq!(sampler.daughter_energy(), 248.8055);
        let expected = sqrt(248.8055 * 248.8055 - 139.57018 * 139.57018);
        assert_eq!(sampler.daughter_momentum(), expected);
        assert_relative_eq!(sampler.daughter_momentum(), 205.9717, max_relative = 1e-6);
    }

    #[test]
    fn single_event_is_back_to_back() {
        let sampler = sampler();
        let events = sampler.sample(1, None, &mut RandomGenerator::seeded(7));
        assert_eq!(events.len(), 1);
        assert_eq!(events.pi_minus, -&events.pi_plus);
        assert_relative_eq!(
            events.pi_plus.row(0).norm(),
            sampler.daughter_momentum(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn directions_are_isotropic() {
        let events = sampler().sample_rest_frame(100_000, &mut RandomGenerator::seeded(3));
        let dirs = events.pi_plus / sampler().daughter_momentum();
        // A uniform distribution on the sphere has zero mean and a second
        // moment of 1/3 along each axis
        for coord in 0..3 {
            let column = dirs.column(coord);
            assert_abs_diff_eq!(column.mean(), 0., epsilon = 0.01);
            assert_abs_diff_eq!(column.norm_squared() / 100_000., 1. / 3., epsilon = 0.01);
        }
    }

    #[test]
    fn lab_frame_total_momentum() {
        let sampler = sampler();
        let p_lab = Momentum3::new(300., -200., 800.);
        let events = sampler.sample(1000, Some(&p_lab), &mut RandomGenerator::new());
        for total in events.total_momenta().row_iter() {
            assert_relative_eq!(total.transpose(), p_lab, max_relative = 1e-9);
        }
    }

    #[test]
    fn zero_lab_momentum_matches_rest_frame() {
        let sampler = sampler();
        let rest = sampler.sample(10, None, &mut RandomGenerator::seeded(5));
        let lab = sampler.sample(10, Some(&Momentum3::zeros()), &mut RandomGenerator::seeded(5));
        assert_relative_eq!(rest.pi_plus, lab.pi_plus, max_relative = 1e-12);
    }

    #[test]
    fn forbidden_decay() {
        let masses = MassTable {
            k_short: 200.,
            charged_pion: 139.57018,
        };
        assert!(DecaySampler::new(masses).is_err());
    }
}
