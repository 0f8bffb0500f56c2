//! An explicit acquire/release pair around the critical section.
//!
//! Where the mutex variants lean on RAII to release the lock, this variant
//! makes the protocol visible: a spin lock built from a single [`AtomicBool`]
//! is acquired, the critical statements run, and the lock is released on
//! every exit path, including the overflow error. The value itself is plain
//! data in an [`UnsafeCell`]; the lock is the only thing that makes touching
//! it sound.

use std::cell::UnsafeCell;
use std::hint;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_utils::CachePadded;

use crate::counters::{Counter, CounterError};

/// A counter guarded by an explicitly acquired and released spin lock.
///
/// ```rust
/// use contesa::counters::spin::SpinLocked;
/// use contesa::counters::Counter;
///
/// let counter = SpinLocked::new();
/// assert_eq!(counter.next().unwrap(), 0);
/// assert_eq!(counter.next().unwrap(), 1);
/// ```
pub struct SpinLocked {
    locked: CachePadded<AtomicBool>,
    current: UnsafeCell<u64>,
}

// SAFETY: `current` is only read or written between a successful `acquire`
// and the matching `release`, so accesses are serialized; the Acquire/Release
// orderings on the flag publish each holder's write to the next.
unsafe impl Sync for SpinLocked {}

impl SpinLocked {
    /// Creates a counter whose first `next()` returns 0.
    pub const fn new() -> Self {
        Self::with_start(0)
    }

    /// Creates a counter whose first `next()` returns `start`.
    pub const fn with_start(start: u64) -> Self {
        SpinLocked {
            locked: CachePadded::new(AtomicBool::new(false)),
            current: UnsafeCell::new(start),
        }
    }

    /// Spins until the lock is acquired.
    ///
    /// Bounded in practice: the critical section is a handful of
    /// instructions and the holder never blocks while holding the lock.
    fn acquire(&self) {
        while self.locked.swap(true, Ordering::Acquire) {
            hint::spin_loop();
        }
    }

    fn release(&self) {
        self.locked.store(false, Ordering::Release);
    }
}

impl Counter for SpinLocked {
    fn next(&self) -> Result<u64, CounterError> {
        self.acquire();
        let result = {
            // SAFETY: we hold the lock, see the Sync impl above.
            let value = unsafe { *self.current.get() };
            if value == u64::MAX {
                Err(CounterError::Overflow)
            } else {
                unsafe { *self.current.get() = value + 1 };
                Ok(value)
            }
        };
        // Released on both paths before the result leaves the method.
        self.release();
        result
    }
}

impl Default for SpinLocked {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_values_are_consecutive() {
        let counter = SpinLocked::new();
        for expected in 0..1000 {
            assert_eq!(counter.next(), Ok(expected));
        }
    }

    #[test]
    fn test_overflow_is_reported_and_state_frozen() {
        let counter = SpinLocked::with_start(u64::MAX);
        assert_eq!(counter.next(), Err(CounterError::Overflow));
        assert_eq!(counter.next(), Err(CounterError::Overflow));
    }

    #[test]
    fn test_lock_is_released_after_overflow() {
        let counter = SpinLocked::with_start(u64::MAX);
        assert_eq!(counter.next(), Err(CounterError::Overflow));
        // A second call must not deadlock on a still-held lock.
        assert_eq!(counter.next(), Err(CounterError::Overflow));
    }

    #[test]
    fn test_no_lost_updates_across_threads() {
        use std::sync::Arc;
        use std::thread;

        let counter = Arc::new(SpinLocked::new());
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
