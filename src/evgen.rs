//! This module provides the complete event generation chain: decay generation
//! followed by detector resolution smearing

use crate::{
    decay::DecaySampler,
    event::TwoTrackBatch,
    masses::MassTable,
    momentum::Momentum3,
    random::RandomGenerator,
    resolution::{Covariance, Resolution},
    scheduling,
};

/// Generator of measured K⁰s → π⁺π⁻ events
#[derive(Clone, Debug)]
pub struct EventGenerator {
    /// Generator of the true decay kinematics
    sampler: DecaySampler,

    /// Model of the momentum measurement error
    resolution: Resolution,

    /// K⁰s momentum in the lab frame (None means the K⁰s rest frame)
    lab_momentum: Option<Momentum3>,
}
//
impl EventGenerator {
    /// Combine a decay sampler and a resolution model
    pub fn new(
        sampler: DecaySampler,
        resolution: Resolution,
        lab_momentum: Option<Momentum3>,
    ) -> Self {
        Self {
            sampler,
            resolution,
            lab_momentum,
        }
    }

    /// Generate `num_events` smeared events in one go
    pub fn generate(&self, num_events: usize, rng: &mut RandomGenerator) -> TwoTrackBatch {
        let events = self
            .sampler
            .sample(num_events, self.lab_momentum.as_ref(), rng);
        self.resolution.smear(events, rng)
    }

    /// Generate `num_events` smeared events by batches
    ///
    /// The output only depends on `rng`'s initial state, not on whether the
    /// batches run sequentially or in parallel. It differs from the output of
    /// `generate()` as soon as more than one batch is needed.
    ///
    pub fn generate_batched(&self, num_events: usize, rng: RandomGenerator) -> TwoTrackBatch {
        scheduling::run_generation(num_events, rng, |batch_size, batch_rng| {
            self.generate(batch_size, batch_rng)
        })
    }

    /// Decay sampler in use
    pub fn sampler(&self) -> &DecaySampler {
        &self.sampler
    }

    /// Resolution model in use
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// K⁰s lab frame momentum, if any
    pub fn lab_momentum(&self) -> Option<&Momentum3> {
        self.lab_momentum.as_ref()
    }
}

/// Generate `num_events` K⁰s → π⁺π⁻ events with PDG masses, smeared with
/// measurement errors of covariance `covariance`, optionally in a lab frame
/// where the K⁰s has momentum `total_momentum`
pub fn generate(
    num_events: usize,
    covariance: &Covariance,
    total_momentum: Option<&Momentum3>,
    rng: &mut RandomGenerator,
) -> eyre::Result<TwoTrackBatch> {
    let evgen = EventGenerator::new(
        DecaySampler::new(MassTable::pdg())?,
        Resolution::new(*covariance)?,
        total_momentum.copied(),
    );
    Ok(evgen.generate(num_events, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::EVENT_BATCH_SIZE;

    fn evgen(lab_momentum: Option<Momentum3>) -> EventGenerator {
        EventGenerator::new(
            DecaySampler::new(MassTable::pdg()).unwrap(),
            Resolution::uncorrelated([2., 2., 3.]).unwrap(),
            lab_momentum,
        )
    }

    #[test]
    fn generation_is_reproducible() {
        let evgen = evgen(Some(Momentum3::new(100., 200., 300.)));
        let first = evgen.generate(100, &mut RandomGenerator::seeded(1));
        let second = evgen.generate(100, &mut RandomGenerator::seeded(1));
        assert_eq!(first, second);
        let other = evgen.generate(100, &mut RandomGenerator::seeded(2));
        assert_ne!(first, other);
    }

    #[test]
    fn single_batch_matches_direct_generation() {
        let evgen = evgen(None);
        let direct = evgen.generate(500, &mut RandomGenerator::seeded(3));
        let batched = evgen.generate_batched(500, RandomGenerator::seeded(3));
        assert_eq!(direct, batched);
    }

    #[test]
    fn batched_generation_size() {
        let events = evgen(None).generate_batched(EVENT_BATCH_SIZE + 10, RandomGenerator::new());
        assert_eq!(events.len(), EVENT_BATCH_SIZE + 10);
    }

    #[test]
    fn smearing_is_applied() {
        let mut rng = RandomGenerator::seeded(4);
        let smeared = generate(10, &Covariance::identity(), None, &mut rng).unwrap();
        let raw = DecaySampler::new(MassTable::pdg())
            .unwrap()
            .sample(10, None, &mut RandomGenerator::seeded(4));
        assert_ne!(smeared, raw);
        // Unsmeared events would be exactly back to back
        assert!(smeared.total_momenta().iter().any(|&p| p != 0.));
    }

    #[test]
    fn invalid_covariance_is_reported() {
        let covariance = -Covariance::identity();
        let result = generate(10, &covariance, None, &mut RandomGenerator::new());
        assert!(result.is_err());
    }
}
