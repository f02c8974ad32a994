//! Sequential back-end of the event generation

use crate::{event::TwoTrackBatch, random::RandomGenerator};

/// Generate events in sequential mode
///
/// We use batched logic even in sequential mode, in order to achieve
/// reproducibility with respect to multi-threaded runs.
///
pub fn run_generation_impl(
    num_events: usize,
    mut rng: RandomGenerator,
    generate_events: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> TwoTrackBatch,
) -> Vec<TwoTrackBatch> {
    // Some double-checking cannot hurt...
    assert!(num_events > 0, "Must generate at least one event");

    // Generate each batch from its own random stream
    super::batch_sizes(num_events)
        .map(|batch_size| {
            let mut batch_rng = rng.clone();
            rng.jump();
            generate_events(batch_size, &mut batch_rng)
        })
        .collect()
}
