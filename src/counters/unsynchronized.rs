//! Plain read-increment-write with no guard of any kind.
//!
//! This is the baseline hazard of the experiment: two threads calling
//! [`next`](crate::counters::Counter::next) concurrently can both read the
//! same value, both write `value + 1`, and both return the same number. The
//! other five variants exist to be contrasted against this one.

use std::cell::UnsafeCell;

use crossbeam_utils::CachePadded;

use crate::counters::{Counter, CounterError};

/// A counter with no synchronization whatsoever.
///
/// The shared value lives in an [`UnsafeCell`] and is read and written with
/// plain, non-atomic accesses. Sharing it between threads is a data race;
/// the race *is* the phenomenon under study. Correct in a single thread,
/// arbitrarily wrong in two.
///
/// # Examples
///
/// Single-threaded use is well-behaved:
///
/// ```rust
/// use contesa::counters::unsynchronized::Unsynchronized;
/// use contesa::counters::Counter;
///
/// let counter = Unsynchronized::new();
/// assert_eq!(counter.next().unwrap(), 0);
/// assert_eq!(counter.next().unwrap(), 1);
/// ```
pub struct Unsynchronized {
    current: CachePadded<UnsafeCell<u64>>,
}

// SAFETY: deliberately unsound. `Unsynchronized` permits unguarded concurrent
// mutation so the harness can observe the resulting lost updates. Every
// access is a single whole-word read or write; nothing outside this module
// touches the cell.
unsafe impl Sync for Unsynchronized {}

impl Unsynchronized {
    /// Creates a counter whose first `next()` returns 0.
    pub const fn new() -> Self {
        Self::with_start(0)
    }

    /// Creates a counter whose first `next()` returns `start`.
    pub const fn with_start(start: u64) -> Self {
        Unsynchronized {
            current: CachePadded::new(UnsafeCell::new(start)),
        }
    }
}

impl Counter for Unsynchronized {
    fn next(&self) -> Result<u64, CounterError> {
        let ptr = self.current.get();
        // Plain load and store. Under contention the two halves of this
        // read-modify-write interleave freely with the other worker's.
        let value = unsafe { ptr.read() };
        if value == u64::MAX {
            return Err(CounterError::Overflow);
        }
        unsafe { ptr.write(value + 1) };
        Ok(value)
    }
}

impl Default for Unsynchronized {
    fn default() -> Self {
        Self::new()
    }
}
