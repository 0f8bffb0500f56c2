//! Mutual exclusion scoped to the whole method.
//!
//! The entire body of `next()` runs under a [`Mutex`] guard: overflow check,
//! read, write, all inside the critical section. This is the widest possible
//! critical section for this contract and the most direct translation of a
//! "synchronized method".

use std::sync::{Mutex, PoisonError};

use crossbeam_utils::CachePadded;

use crate::counters::{Counter, CounterError};

/// A counter whose `next()` body runs entirely under a mutex.
///
/// ```rust
/// use contesa::counters::mutex_method::MutexMethod;
/// use contesa::counters::Counter;
/// use std::sync::Arc;
/// use std::thread;
///
/// let counter = Arc::new(MutexMethod::new());
/// let clone = Arc::clone(&counter);
/// let worker = thread::spawn(move || {
///     for _ in 0..1000 {
///         clone.next().unwrap();
///     }
/// });
/// for _ in 0..1000 {
///     counter.next().unwrap();
/// }
/// worker.join().unwrap();
/// assert_eq!(counter.next().unwrap(), 2000);
/// ```
pub struct MutexMethod {
    current: CachePadded<Mutex<u64>>,
}

impl MutexMethod {
    /// Creates a counter whose first `next()` returns 0.
    pub const fn new() -> Self {
        Self::with_start(0)
    }

    /// Creates a counter whose first `next()` returns `start`.
    pub const fn with_start(start: u64) -> Self {
        MutexMethod {
            current: CachePadded::new(Mutex::new(start)),
        }
    }
}

impl Counter for MutexMethod {
    fn next(&self) -> Result<u64, CounterError> {
        // Nothing in the critical section can panic, so the mutex cannot be
        // poisoned; recover the guard rather than bubbling a poison error.
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if *current == u64::MAX {
            return Err(CounterError::Overflow);
        }
        let value = *current;
        *current = value + 1;
        Ok(value)
    }
}

impl Default for MutexMethod {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_values_are_consecutive() {
        let counter = MutexMethod::new();
        for expected in 0..1000 {
            assert_eq!(counter.next(), Ok(expected));
        }
    }

    #[test]
    fn test_overflow_is_reported_and_state_frozen() {
        let counter = MutexMethod::with_start(u64::MAX);
        assert_eq!(counter.next(), Err(CounterError::Overflow));
        assert_eq!(counter.next(), Err(CounterError::Overflow));
    }

    #[test]
    fn test_no_lost_updates_across_threads() {
        use std::sync::Arc;
        use std::thread;

        let counter = Arc::new(MutexMethod::new());
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
