//! Mutual exclusion scoped to a block inside the method.
//!
//! Functionally identical to [`MutexMethod`](super::mutex_method), but the
//! guard covers only the critical statements: the lock is taken inside an
//! inner block and dropped the moment the new value has been published. For
//! this contract the two scopes protect the same statements, which is itself
//! an observation worth making: narrowing a critical section only matters
//! when there is non-critical work to exclude from it.

use std::sync::{Mutex, PoisonError};

use crossbeam_utils::CachePadded;

use crate::counters::{Counter, CounterError};

/// A counter that locks only around the critical statements of `next()`.
pub struct MutexBlock {
    current: CachePadded<Mutex<u64>>,
}

impl MutexBlock {
    /// Creates a counter whose first `next()` returns 0.
    pub const fn new() -> Self {
        Self::with_start(0)
    }

    /// Creates a counter whose first `next()` returns `start`.
    pub const fn with_start(start: u64) -> Self {
        MutexBlock {
            current: CachePadded::new(Mutex::new(start)),
        }
    }
}

impl Counter for MutexBlock {
    fn next(&self) -> Result<u64, CounterError> {
        let value = {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            if *current == u64::MAX {
                return Err(CounterError::Overflow);
            }
            let value = *current;
            *current = value + 1;
            value
            // guard dropped here; everything after runs unlocked
        };
        Ok(value)
    }
}

impl Default for MutexBlock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_values_are_consecutive() {
        let counter = MutexBlock::new();
        for expected in 0..1000 {
            assert_eq!(counter.next(), Ok(expected));
        }
    }

    #[test]
    fn test_overflow_is_reported_and_state_frozen() {
        let counter = MutexBlock::with_start(u64::MAX);
        assert_eq!(counter.next(), Err(CounterError::Overflow));
        assert_eq!(counter.next(), Err(CounterError::Overflow));
    }

    #[test]
    fn test_no_lost_updates_across_threads() {
        use std::sync::Arc;
        use std::thread;

        let counter = Arc::new(MutexBlock::new());
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
