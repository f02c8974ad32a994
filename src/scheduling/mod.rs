//! This module takes care of scheduling the event generation work,
//! encapsulating use of multiple threads and anything else that will come in
//! the future

#[cfg(feature = "multi-threading")]
mod multi_threading;
#[cfg(not(feature = "multi-threading"))]
mod sequential;

use crate::{event::TwoTrackBatch, random::RandomGenerator};

/// Size of the generated event batches
///
/// Generated events are grouped in batches of a certain size, each drawing its
/// random numbers from its own sub-stream of the random number generator. This
/// achieves perfect reproducibility between sequential and parallel runs.
///
/// This constant may need to be tuned in the future if CPUs become faster or
/// synchronization overhead changes. But the rate of such change is expected to
/// be low enough for hard-coding of this constant to be reasonable.
///
pub const EVENT_BATCH_SIZE: usize = 10_000;

/// Run the event generation in the manner that was configured at build time.
///
/// Takes as parameters the total number of events to be generated, the random
/// number generator to start from, and a kernel that generates a certain
/// number of events given a random number generator.
///
/// Batch `k` is generated with a copy of `rng` that has jumped `k` times.
///
/// Returns the generated events, in batch order
///
pub fn run_generation(
    num_events: usize,
    rng: RandomGenerator,
    generate_events: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> TwoTrackBatch,
) -> TwoTrackBatch {
    // Check that the user is being reasonable (should have already been checked
    // at configuration time, but bugs can happen...)
    assert!(num_events > 0, "Must generate at least one event");

    let num_batches = num_batches(num_events);
    tracing::debug!(num_events, num_batches, "Scheduling event generation");

    // Generate the batches...
    let batches = {
        // ...in sequential mode
        #[cfg(not(feature = "multi-threading"))]
        {
            sequential::run_generation_impl(num_events, rng, generate_events)
        }

        // ...in multi-threaded mode
        #[cfg(feature = "multi-threading")]
        {
            multi_threading::run_generation_impl(num_events, rng, generate_events)
        }
    };
    debug_assert_eq!(batches.len(), num_batches);

    // Merge them in order
    TwoTrackBatch::concat(batches)
}

/// Number of batches needed to generate `num_events` events
fn num_batches(num_events: usize) -> usize {
    num_events / EVENT_BATCH_SIZE + usize::from(num_events % EVENT_BATCH_SIZE != 0)
}

/// Sizes of the successive event batches
fn batch_sizes(num_events: usize) -> impl Iterator<Item = usize> {
    (0..num_batches(num_events))
        .map(move |batch_id| (num_events - batch_id * EVENT_BATCH_SIZE).min(EVENT_BATCH_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::momentum::MomentumBatch;

    #[test]
    fn batch_splitting() {
        assert_eq!(batch_sizes(1).collect::<Vec<_>>(), vec![1]);
        assert_eq!(
            batch_sizes(EVENT_BATCH_SIZE).collect::<Vec<_>>(),
            vec![EVENT_BATCH_SIZE]
        );
        assert_eq!(
            batch_sizes(2 * EVENT_BATCH_SIZE + 3).collect::<Vec<_>>(),
            vec![EVENT_BATCH_SIZE, EVENT_BATCH_SIZE, 3]
        );
    }

    #[test]
    fn batches_use_jumped_streams() {
        // Each event records the first random number of its batch
        let kernel = |num_events: usize, rng: &mut RandomGenerator| {
            let first = rng.random();
            let p3 = MomentumBatch::from_element(num_events, first);
            TwoTrackBatch::new(p3.clone(), p3)
        };
        let events = run_generation(EVENT_BATCH_SIZE + 1, RandomGenerator::seeded(9), kernel);
        assert_eq!(events.len(), EVENT_BATCH_SIZE + 1);

        let mut rng = RandomGenerator::seeded(9);
        assert_eq!(events.pi_plus[(0, 0)], rng.clone().random());
        rng.jump();
        assert_eq!(events.pi_plus[(EVENT_BATCH_SIZE, 0)], rng.random());
    }

    #[test]
    #[should_panic]
    fn zero_events() {
        run_generation(0, RandomGenerator::new(), |_, _| unreachable!());
    }
}
