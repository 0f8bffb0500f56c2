//! Core module containing the counter contract and the strategy family.
//!
//! Every counter in this crate implements the same tiny contract: starting at
//! zero, each successful [`Counter::next`] call returns a value one greater
//! than the value returned by the immediately preceding call, across *all*
//! callers. The six implementations differ along exactly one axis each: how
//! (and whether) they enforce mutual exclusion and visibility for the single
//! read-modify-write that advances the value.
//!
//! | Strategy | Mechanism | Atomicity | Visibility |
//! |----------|-----------|-----------|------------|
//! | [`Unsynchronized`](unsynchronized::Unsynchronized) | plain read/write through `UnsafeCell` | none | none |
//! | [`Visible`](visible::Visible) | separate `SeqCst` load and store | none | guaranteed |
//! | [`MutexMethod`](mutex_method::MutexMethod) | mutex guard held for the whole call | full | guaranteed |
//! | [`MutexBlock`](mutex_block::MutexBlock) | mutex guard scoped to the critical statements | full | guaranteed |
//! | [`Atomic`](atomic::Atomic) | CAS loop (`fetch_update`) | full | guaranteed |
//! | [`SpinLocked`](spin::SpinLocked) | explicit acquire/release on an `AtomicBool` | full | guaranteed |
//!
//! The critical section in every thread-safe variant is a single
//! read-modify-write. That is the point of the experiment: even a "one-line"
//! mutation is not atomic at the instruction level unless made so explicitly.
//!
//! # Overflow
//!
//! Every variant checks for overflow uniformly: once the internal value has
//! reached `u64::MAX`, `next()` fails with [`CounterError::Overflow`] and the
//! value is not mutated further. Counters never wrap silently.
//!
//! # Example
//!
//! ```rust
//! use contesa::counters::Strategy;
//!
//! let counter = Strategy::Atomic.counter();
//! assert_eq!(counter.next().unwrap(), 0);
//! assert_eq!(counter.next().unwrap(), 1);
//! assert_eq!(counter.next().unwrap(), 2);
//! ```

pub mod atomic;
pub mod mutex_block;
pub mod mutex_method;
pub mod spin;
pub mod unsynchronized;
pub mod visible;

use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

/// Error raised by a [`Counter`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CounterError {
    /// The counter has reached `u64::MAX` and cannot advance further.
    #[error("counter overflow: the next value is not representable")]
    Overflow,
}

/// A producer of consecutive whole numbers shared between threads.
///
/// Starting at 0, each successful call to [`next`](Counter::next) returns a
/// value one greater than the previous successful call returned, regardless
/// of which thread made that previous call. Whether an implementation
/// actually upholds that invariant under concurrency is exactly what the
/// [`harness`](crate::harness) measures.
///
/// Workers only ever call `next()`; there is no other path to the shared
/// value.
pub trait Counter: Send + Sync {
    /// Advances the counter and returns the value it held before advancing.
    ///
    /// Fails with [`CounterError::Overflow`] once the value has reached
    /// `u64::MAX`; the value is left untouched in that case.
    fn next(&self) -> Result<u64, CounterError>;
}

/// The six disciplines for mutating the shared value, as a closed set.
///
/// The factory ([`Strategy::counter`]) is an exhaustive match over this enum:
/// there is no default arm and no silent fallback, so adding a seventh
/// discipline is a deliberate, compiler-checked act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[cfg_attr(feature = "demo", derive(clap::ValueEnum))]
pub enum Strategy {
    /// Plain read-increment-write, no guard of any kind.
    Unsynchronized,
    /// Writes are immediately visible to all threads, but the increment is
    /// still a non-atomic read/store pair.
    Visible,
    /// The whole `next()` body runs under a mutex.
    MutexMethod,
    /// Only the critical statements run under a mutex.
    MutexBlock,
    /// The check-and-increment is one hardware-level atomic step.
    Atomic,
    /// An explicit acquire/release pair brackets the critical section.
    SpinLocked,
}

impl Strategy {
    /// All strategies, in the order trials conventionally run them: the two
    /// flawed disciplines first, then the four sound ones.
    pub const ALL: [Strategy; 6] = [
        Strategy::Unsynchronized,
        Strategy::Visible,
        Strategy::MutexMethod,
        Strategy::MutexBlock,
        Strategy::Atomic,
        Strategy::SpinLocked,
    ];

    /// The stable textual identifier for this strategy.
    ///
    /// This is the same spelling [`FromStr`] accepts and [`Display`] prints.
    pub const fn name(&self) -> &'static str {
        match self {
            Strategy::Unsynchronized => "unsynchronized",
            Strategy::Visible => "visible",
            Strategy::MutexMethod => "mutex-method",
            Strategy::MutexBlock => "mutex-block",
            Strategy::Atomic => "atomic",
            Strategy::SpinLocked => "spin-locked",
        }
    }

    /// Constructs a fresh counter governed by this strategy.
    ///
    /// Each trial gets its own counter; counters are shared (via the returned
    /// `Arc`) by exactly the workers of that trial and discarded afterwards.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contesa::counters::Strategy;
    ///
    /// let counter = Strategy::MutexMethod.counter();
    /// assert_eq!(counter.next().unwrap(), 0);
    /// ```
    pub fn counter(self) -> Arc<dyn Counter> {
        match self {
            Strategy::Unsynchronized => Arc::new(unsynchronized::Unsynchronized::new()),
            Strategy::Visible => Arc::new(visible::Visible::new()),
            Strategy::MutexMethod => Arc::new(mutex_method::MutexMethod::new()),
            Strategy::MutexBlock => Arc::new(mutex_block::MutexBlock::new()),
            Strategy::Atomic => Arc::new(atomic::Atomic::new()),
            Strategy::SpinLocked => Arc::new(spin::SpinLocked::new()),
        }
    }

    /// Whether this discipline is expected to uphold the invariant under
    /// concurrency.
    ///
    /// This is the *expected* outcome of the experiment, not a measurement;
    /// compare it against a trial's verdict.
    pub const fn is_sound(&self) -> bool {
        !matches!(self, Strategy::Unsynchronized | Strategy::Visible)
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a strategy identifier is not recognized.
///
/// Unknown identifiers are rejected explicitly; there is no fallback
/// strategy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown strategy {0:?} (expected one of: unsynchronized, visible, mutex-method, mutex-block, atomic, spin-locked)")]
pub struct ParseStrategyError(pub String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| ParseStrategyError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trips() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>(), Ok(strategy));
        }
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(Strategy::MutexBlock.to_string(), "mutex-block");
        assert_eq!(Strategy::SpinLocked.to_string(), "spin-locked");
    }

    #[test]
    fn test_unknown_identifier_is_rejected() {
        let err = "reentrant".parse::<Strategy>().unwrap_err();
        assert_eq!(err, ParseStrategyError("reentrant".to_string()));
    }

    #[test]
    fn test_soundness_expectations() {
        assert!(!Strategy::Unsynchronized.is_sound());
        assert!(!Strategy::Visible.is_sound());
        assert!(Strategy::MutexMethod.is_sound());
        assert!(Strategy::MutexBlock.is_sound());
        assert!(Strategy::Atomic.is_sound());
        assert!(Strategy::SpinLocked.is_sound());
    }

    #[test]
    fn test_factory_counters_start_at_zero() {
        for strategy in Strategy::ALL {
            let counter = strategy.counter();
            assert_eq!(counter.next(), Ok(0), "strategy {strategy}");
            assert_eq!(counter.next(), Ok(1), "strategy {strategy}");
        }
    }
}
