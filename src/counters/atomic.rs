//! Hardware-level atomicity: the increment is one indivisible step.
//!
//! [`AtomicU64::fetch_update`] runs a compare-and-swap loop, so the overflow
//! check and the increment commit together or not at all. No lock is taken
//! and no thread ever blocks; a contended CAS simply retries.

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_utils::CachePadded;

use crate::counters::{Counter, CounterError};

/// A counter advanced by an atomic check-and-increment.
///
/// ```rust
/// use contesa::counters::atomic::Atomic;
/// use contesa::counters::Counter;
///
/// let counter = Atomic::new();
/// assert_eq!(counter.next().unwrap(), 0);
/// assert_eq!(counter.next().unwrap(), 1);
/// ```
pub struct Atomic {
    current: CachePadded<AtomicU64>,
}

impl Atomic {
    /// Creates a counter whose first `next()` returns 0.
    pub const fn new() -> Self {
        Self::with_start(0)
    }

    /// Creates a counter whose first `next()` returns `start`.
    pub const fn with_start(start: u64) -> Self {
        Atomic {
            current: CachePadded::new(AtomicU64::new(start)),
        }
    }
}

impl Counter for Atomic {
    fn next(&self) -> Result<u64, CounterError> {
        // The closure sees the freshest value on every CAS retry, so the
        // overflow guard cannot be raced past.
        self.current
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |value| {
                value.checked_add(1)
            })
            .map_err(|_| CounterError::Overflow)
    }
}

impl Default for Atomic {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_values_are_consecutive() {
        let counter = Atomic::new();
        for expected in 0..1000 {
            assert_eq!(counter.next(), Ok(expected));
        }
    }

    #[test]
    fn test_overflow_is_reported_and_state_frozen() {
        let counter = Atomic::with_start(u64::MAX);
        assert_eq!(counter.next(), Err(CounterError::Overflow));
        assert_eq!(counter.next(), Err(CounterError::Overflow));
    }

    #[test]
    fn test_no_lost_updates_across_threads() {
        use std::sync::Arc;
        use std::thread;

        let counter = Arc::new(Atomic::new());
        let clone = Arc::clone(&counter);
        let worker = thread::spawn(move || {
            for _ in 0..10_000 {
                clone.next().unwrap();
            }
        });
        for _ in 0..10_000 {
            counter.next().unwrap();
        }
        worker.join().unwrap();
        assert_eq!(counter.next(), Ok(20_000));
    }
}
