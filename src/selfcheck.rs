//! Run-time verification of the physical consistency of generated events
//!
//! Unsmeared events must exactly conserve 4-momentum: the π⁺π⁻ pair must have
//! the K⁰s invariant mass and carry the K⁰s momentum. These checks are used by
//! the "test" mode of the binary and by the test suite.

use crate::{
    decay::DecaySampler,
    event::TwoTrackBatch,
    kinematics::LorentzBoost,
    masses::MassTable,
    momentum::{FourMomentumBatch, Momentum3},
    numeric::{is_close, Float},
    random::RandomGenerator,
};

use eyre::{ensure, WrapErr};

/// Number of events used by each check of `run_all()`
pub const NUM_EVENTS: usize = 10_000;

/// Scale of the random K⁰s lab momenta used by `run_all()` (MeV)
pub const LAB_MOMENTUM_SCALE: Float = 1000.;

/// Check that each π⁺π⁻ pair has the K⁰s invariant mass
pub fn check_mass(events: &TwoTrackBatch, masses: &MassTable) -> eyre::Result<()> {
    let expected = masses.k_short * masses.k_short;
    let mass_squared = crate::kinematics::mass_squared_batch(
        &events.total_four_momenta(masses.charged_pion),
    );
    for (event, &m2) in mass_squared.iter().enumerate() {
        ensure!(
            is_close(m2, expected),
            "Event {event} has a squared π⁺π⁻ mass of {m2} instead of {expected}"
        );
    }
    Ok(())
}

/// Check that each π⁺π⁻ pair has the expected total 3-momentum
pub fn check_momentum(events: &TwoTrackBatch, expected: &Momentum3) -> eyre::Result<()> {
    for (event, total) in events.total_momenta().row_iter().enumerate() {
        let matches = total
            .iter()
            .zip(expected.iter())
            .all(|(&actual, &expected)| is_close(actual, expected));
        ensure!(
            matches,
            "Event {event} has a π⁺π⁻ momentum of {total} instead of {}",
            expected.transpose()
        );
    }
    Ok(())
}

/// Check that boosting by `velocity` then by `-velocity` is the identity
pub fn check_boost_round_trip(p4: &FourMomentumBatch, velocity: &Momentum3) -> eyre::Result<()> {
    let boost = LorentzBoost::new(velocity);
    let round_trip = boost.inverse().apply_batch(&boost.apply_batch(p4));
    for ((idx, &actual), &expected) in round_trip.iter().enumerate().zip(p4.iter()) {
        ensure!(
            is_close(actual, expected),
            "Boost round trip turned {expected} into {actual} (element {idx})"
        );
    }
    Ok(())
}

/// Run all the consistency checks, stopping at the first failure
pub fn run_all(rng: &mut RandomGenerator) -> eyre::Result<()> {
    let masses = MassTable::pdg();
    let sampler = DecaySampler::new(masses)?;

    // K⁰s rest frame
    let events = sampler.sample(NUM_EVENTS, None, rng);
    check_mass(&events, &masses).wrap_err("Rest frame mass check failed")?;
    check_momentum(&events, &Momentum3::zeros()).wrap_err("Rest frame momentum check failed")?;
    tracing::info!("Rest frame checks passed");

    // Lab frame, with a random K⁰s momentum
    let p_lab = random_lab_momentum(rng);
    let events = sampler.sample(NUM_EVENTS, Some(&p_lab), rng);
    check_mass(&events, &masses).wrap_err("Lab frame mass check failed")?;
    let p_lab = random_lab_momentum(rng);
    let events = sampler.sample(NUM_EVENTS, Some(&p_lab), rng);
    check_momentum(&events, &p_lab).wrap_err("Lab frame momentum check failed")?;
    tracing::info!("Lab frame checks passed");

    // Boost round trip on the π⁺ of some rest frame events
    let events = sampler.sample_rest_frame(NUM_EVENTS, rng);
    let p4 = crate::kinematics::lift(&events.pi_plus, masses.charged_pion);
    let velocity = sampler.lab_boost_velocity(&random_lab_momentum(rng));
    check_boost_round_trip(&p4, &velocity).wrap_err("Boost round trip check failed")?;
    tracing::info!("Boost round trip check passed");

    Ok(())
}

/// Random K⁰s lab momentum, uniform in a cube of side LAB_MOMENTUM_SCALE
fn random_lab_momentum(rng: &mut RandomGenerator) -> Momentum3 {
    Momentum3::from_fn(|_, _| LAB_MOMENTUM_SCALE * rng.random())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::momentum::MomentumBatch;

    #[test]
    fn all_checks_pass() {
        run_all(&mut RandomGenerator::seeded(31)).unwrap();
    }

    #[test]
    fn wrong_mass_is_detected() {
        let events = DecaySampler::new(MassTable::pdg())
            .unwrap()
            .sample(10, None, &mut RandomGenerator::new());
        let wrong_masses = MassTable {
            k_short: 500.,
            ..MassTable::pdg()
        };
        assert!(check_mass(&events, &wrong_masses).is_err());
    }

    #[test]
    fn wrong_momentum_is_detected() {
        let pi_plus = MomentumBatch::from_row_slice(&[1., 2., 3.]);
        let events = TwoTrackBatch::new(pi_plus.clone(), -pi_plus);
        assert!(check_momentum(&events, &Momentum3::zeros()).is_ok());
        assert!(check_momentum(&events, &Momentum3::new(0., 0., 1.)).is_err());
    }
}
