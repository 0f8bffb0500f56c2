//! Visibility without atomicity: a `volatile`-style counter.
//!
//! The shared value is an [`AtomicU64`] accessed with sequentially-consistent
//! loads and stores, so a write by one thread is immediately observable by
//! the other. That alone does not help: the increment is still a separate
//! load followed by a separate store, and the other worker can slip between
//! them. Visibility is necessary for correctness here, but not sufficient.

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_utils::CachePadded;

use crate::counters::{Counter, CounterError};

/// A counter whose accesses are individually visible but whose increment is
/// not atomic.
///
/// Each `load` and each `store` is a sound atomic access; the compound
/// read-modify-write between them is not. Two workers can read the same
/// value and both publish `value + 1`, losing an update.
///
/// ```rust
/// use contesa::counters::visible::Visible;
/// use contesa::counters::Counter;
///
/// let counter = Visible::new();
/// assert_eq!(counter.next().unwrap(), 0);
/// assert_eq!(counter.next().unwrap(), 1);
/// ```
pub struct Visible {
    current: CachePadded<AtomicU64>,
}

impl Visible {
    /// Creates a counter whose first `next()` returns 0.
    pub const fn new() -> Self {
        Self::with_start(0)
    }

    /// Creates a counter whose first `next()` returns `start`.
    pub const fn with_start(start: u64) -> Self {
        Visible {
            current: CachePadded::new(AtomicU64::new(start)),
        }
    }
}

impl Counter for Visible {
    fn next(&self) -> Result<u64, CounterError> {
        // Two atomic accesses, zero atomicity between them.
        let value = self.current.load(Ordering::SeqCst);
        if value == u64::MAX {
            return Err(CounterError::Overflow);
        }
        self.current.store(value + 1, Ordering::SeqCst);
        Ok(value)
    }
}

impl Default for Visible {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_values_are_consecutive() {
        let counter = Visible::new();
        for expected in 0..1000 {
            assert_eq!(counter.next(), Ok(expected));
        }
    }

    #[test]
    fn test_overflow_is_reported_and_state_frozen() {
        let counter = Visible::with_start(u64::MAX);
        assert_eq!(counter.next(), Err(CounterError::Overflow));
        assert_eq!(counter.next(), Err(CounterError::Overflow));
    }
}
