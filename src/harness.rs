//! The trial harness: two workers, one counter, one stopwatch.
//!
//! A [`Trial`] pits exactly two concurrent workers against a single shared
//! counter. One worker runs on a spawned thread, the other on the calling
//! thread, so the calling thread is itself a participant rather than a
//! bystander. Each worker calls [`next`](crate::counters::Counter::next) the
//! configured number of times and pours the results into its own
//! [`ObservationSet`]; the [`analysis`](crate::analysis) module then turns
//! the two sets into violation metrics.
//!
//! Trials run sequentially, one strategy at a time, so at most one counter
//! is ever in contended use.
//!
//! # Example
//!
//! ```rust
//! use contesa::counters::Strategy;
//! use contesa::harness::Trial;
//!
//! let result = Trial::new(Strategy::Atomic, 10_000)?.run()?;
//! assert_eq!(result.analysis().intersections, 0);
//! # Ok::<(), contesa::harness::TrialError>(())
//! ```

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use thiserror::Error;

use crate::analysis::{analyze, ObservationSet, TrialResult};
use crate::counters::{Counter, CounterError, Strategy};

/// Error raised while configuring or running a trial.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrialError {
    /// The iteration count was zero; each worker must observe at least once.
    #[error("iteration count must be at least 1")]
    ZeroIterations,

    /// A worker's `next()` call failed; the trial aborts and nothing is
    /// retried, since a retry would run against already-mutated state.
    #[error(transparent)]
    Counter(#[from] CounterError),

    /// The spawned worker panicked, so the wait for it could not complete
    /// normally. Fatal to the trial.
    #[error("worker thread panicked before completing its observations")]
    WorkerPanicked,
}

/// The worker loop: `iterations` calls to `next()`, each result recorded.
///
/// Stops at the first error and propagates it; a partial observation set is
/// never analyzed.
pub fn observe(counter: &dyn Counter, iterations: usize) -> Result<ObservationSet, CounterError> {
    let mut set = ObservationSet::with_capacity(iterations);
    for _ in 0..iterations {
        set.insert(counter.next()?);
    }
    Ok(set)
}

/// One configured experiment: a strategy and an iteration count per worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trial {
    strategy: Strategy,
    iterations: usize,
}

impl Trial {
    /// Configures a trial, rejecting an iteration count of zero.
    pub fn new(strategy: Strategy, iterations: usize) -> Result<Self, TrialError> {
        if iterations == 0 {
            return Err(TrialError::ZeroIterations);
        }
        Ok(Trial {
            strategy,
            iterations,
        })
    }

    /// The strategy this trial will exercise.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Iterations each of the two workers will perform.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Builds a fresh counter via the factory and runs the trial on it.
    ///
    /// The stopwatch covers spawn through join. An overflow raised by either
    /// worker surfaces as [`TrialError::Counter`]; results gathered by the
    /// other worker are discarded, never analyzed half-filled.
    pub fn run(&self) -> Result<TrialResult, TrialError> {
        self.run_on(self.strategy.counter())
    }

    fn run_on(&self, counter: Arc<dyn Counter>) -> Result<TrialResult, TrialError> {
        let iterations = self.iterations;
        let started = Instant::now();

        let worker = {
            let counter = Arc::clone(&counter);
            thread::spawn(move || observe(counter.as_ref(), iterations))
        };

        // The second worker's role, played by the calling thread. Its error,
        // if any, is held until the spawned worker has been joined.
        let set_a = observe(counter.as_ref(), iterations);
        let set_b = worker.join().map_err(|_| TrialError::WorkerPanicked)?;

        let elapsed = started.elapsed();
        let analysis = analyze(iterations, &set_a?, &set_b?);
        Ok(TrialResult::new(self.strategy, iterations, elapsed, analysis))
    }
}

/// Convenience wrapper: configure and run a trial in one call.
pub fn run_trial(strategy: Strategy, iterations: usize) -> Result<TrialResult, TrialError> {
    Trial::new(strategy, iterations)?.run()
}
