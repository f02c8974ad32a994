//! Multi-threaded back-end of the event generation

use crate::{event::TwoTrackBatch, random::RandomGenerator};

use std::sync::Mutex;

/// Generate events in multi-threaded mode
///
/// Each batch is generated by its own task, from its own random stream, so the
/// output does not depend on how the tasks are scheduled.
///
pub fn run_generation_impl(
    num_events: usize,
    mut rng: RandomGenerator,
    generate_events: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> TwoTrackBatch,
) -> Vec<TwoTrackBatch> {
    // Some double-checking cannot hurt...
    assert!(num_events > 0, "Must generate at least one event");

    // The results of parallel tasks will be collected in batch order
    let collector = BatchCollector::new(super::num_batches(num_events));

    // This function is a synchronization scope: it will only return
    // once all inner tasks have been executed
    rayon::scope(|scope| {
        // For each requested batch of events...
        for (batch_id, batch_size) in super::batch_sizes(num_events).enumerate() {
            // Spawn a task which is responsible for generating them
            let mut task_rng = rng.clone();
            let collector_ref = &collector;
            let generate_events_ref = &generate_events;
            scope.spawn(move |_| {
                let batch = generate_events_ref(batch_size, &mut task_rng);
                collector_ref.set_task_result(batch_id, batch);
            });

            // The next batch gets a non-overlapping random stream
            rng.jump();
        }
    });

    // Extract the results from the collector
    collector.into_batches()
}

/// Storage for the event batches of parallel tasks
struct BatchCollector {
    /// One slot per task, filled when the task completes
    results: Box<[Mutex<Option<TwoTrackBatch>>]>,
}
//
impl BatchCollector {
    /// Set up results storage for N parallel tasks
    fn new(num_tasks: usize) -> Self {
        assert!(num_tasks > 0, "There should be at least one task");
        Self {
            results: (0..num_tasks)
                .map(|_| Mutex::new(None))
                .collect::<Vec<_>>()
                .into_boxed_slice(),
        }
    }

    /// Record the events generated by the n-th task
    fn set_task_result(&self, task_id: usize, batch: TwoTrackBatch) {
        let mut lock = self.results[task_id]
            .lock()
            .expect("Mutex data should be valid");
        assert!(lock.is_none(), "Tasks should not report results twice");
        *lock = Some(batch);
    }

    /// Collect the batches in task order
    fn into_batches(self) -> Vec<TwoTrackBatch> {
        self.results
            .into_vec()
            .into_iter()
            .map(|entry| {
                entry
                    .into_inner()
                    .expect("Mutex data should be valid")
                    .expect("Result should be ready")
            })
            .collect()
    }
}
