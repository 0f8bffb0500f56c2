//! Violation metrics computed from two workers' observations.
//!
//! A worker that calls [`next`](crate::counters::Counter::next) `N` times and
//! pours the returned values into a set leaves two kinds of evidence behind:
//!
//! - **Collisions**: if the set holds fewer than `N` values, the worker saw
//!   the same number more than once in its own stream.
//! - **Intersections**: any value present in *both* workers' sets was handed
//!   out twice, once to each worker.
//!
//! Either kind means the one-greater-than-previous invariant broke. The
//! analysis here is a pure function of the two sets; it neither touches the
//! counter nor cares which strategy produced the data.

use std::collections::HashSet;
use std::time::Duration;

use crate::counters::Strategy;

/// The set of values a single worker observed during one trial.
///
/// Membership semantics are the point: inserting a duplicate collapses it,
/// so the gap between insertions attempted and final size counts the
/// duplicates the worker saw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationSet {
    values: HashSet<u64>,
}

impl ObservationSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set sized for `iterations` insertions.
    pub fn with_capacity(iterations: usize) -> Self {
        ObservationSet {
            values: HashSet::with_capacity(iterations),
        }
    }

    /// Records one observed value. Returns `false` if it was already present.
    pub fn insert(&mut self, value: u64) -> bool {
        self.values.insert(value)
    }

    /// Number of distinct values observed.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values have been observed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether `value` was observed.
    pub fn contains(&self, value: u64) -> bool {
        self.values.contains(&value)
    }

    /// Number of values present in both `self` and `other`.
    pub fn intersections(&self, other: &ObservationSet) -> usize {
        self.values.intersection(&other.values).count()
    }

    /// Iterates over the observed values in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.values.iter().copied()
    }
}

impl FromIterator<u64> for ObservationSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        ObservationSet {
            values: iter.into_iter().collect(),
        }
    }
}

/// Violation counts extracted from one trial's two observation sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analysis {
    /// Values observed by both workers.
    pub intersections: usize,
    /// Duplicates within the first worker's own stream.
    pub collisions_a: usize,
    /// Duplicates within the second worker's own stream.
    pub collisions_b: usize,
}

impl Analysis {
    /// Classifies the trial these counts came from.
    pub fn verdict(&self) -> Verdict {
        if self.intersections == 0 && self.collisions_a == 0 && self.collisions_b == 0 {
            Verdict::MayBeThreadSafe
        } else {
            Verdict::NotThreadSafe
        }
    }
}

/// Safety classification of a single trial.
///
/// A clean trial is *evidence* of safety, not proof: absence of observed
/// violations under one schedule establishes nothing about all schedules.
/// The wording of [`Display`](std::fmt::Display) is deliberate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Verdict {
    /// No violation observed in this trial.
    MayBeThreadSafe,
    /// At least one intersection or collision observed.
    NotThreadSafe,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::MayBeThreadSafe => f.write_str("may be thread-safe"),
            Verdict::NotThreadSafe => f.write_str("is not thread-safe"),
        }
    }
}

/// Computes violation metrics from two workers' observation sets.
///
/// `iterations` is the number of insertions each worker attempted; the
/// difference between it and a set's final size is that worker's collision
/// count. A set larger than `iterations` cannot come out of a trial, but
/// the function takes arbitrary sets, so collision counts clamp at zero
/// rather than underflowing. Pure and deterministic.
///
/// # Examples
///
/// ```rust
/// use contesa::analysis::{analyze, ObservationSet};
///
/// let a: ObservationSet = [0, 2, 4].into_iter().collect();
/// let b: ObservationSet = [1, 2, 3].into_iter().collect();
/// let analysis = analyze(3, &a, &b);
/// assert_eq!(analysis.intersections, 1); // the value 2
/// assert_eq!(analysis.collisions_a, 0);
/// assert_eq!(analysis.collisions_b, 0);
/// ```
pub fn analyze(iterations: usize, a: &ObservationSet, b: &ObservationSet) -> Analysis {
    Analysis {
        intersections: a.intersections(b),
        collisions_a: iterations.saturating_sub(a.len()),
        collisions_b: iterations.saturating_sub(b.len()),
    }
}

/// The outcome of one trial: which strategy ran, for how many iterations,
/// how long the contended phase took, and what the analyzer found.
///
/// Immutable once created; the report layer only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialResult {
    strategy: Strategy,
    iterations: usize,
    elapsed: Duration,
    analysis: Analysis,
}

impl TrialResult {
    pub(crate) fn new(
        strategy: Strategy,
        iterations: usize,
        elapsed: Duration,
        analysis: Analysis,
    ) -> Self {
        TrialResult {
            strategy,
            iterations,
            elapsed,
            analysis,
        }
    }

    /// The strategy this trial exercised.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Iterations each worker performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Wall-clock duration of the contended phase (spawn to join).
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The violation metrics.
    pub fn analysis(&self) -> Analysis {
        self.analysis
    }

    /// Shorthand for `self.analysis().verdict()`.
    pub fn verdict(&self) -> Verdict {
        self.analysis.verdict()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersections_counts_shared_values() {
        let a: ObservationSet = [0, 2, 4].into_iter().collect();
        let b: ObservationSet = [1, 2, 3].into_iter().collect();
        assert_eq!(analyze(3, &a, &b).intersections, 1);
        // Order of arguments is irrelevant.
        assert_eq!(analyze(3, &b, &a).intersections, 1);
    }

    #[test]
    fn test_collisions_count_duplicate_insertions() {
        let mut a = ObservationSet::new();
        a.insert(7);
        assert!(!a.insert(7));
        a.insert(8);
        let b: ObservationSet = [10, 11, 12].into_iter().collect();
        let analysis = analyze(3, &a, &b);
        assert_eq!(analysis.collisions_a, 1);
        assert_eq!(analysis.collisions_b, 0);
        assert_eq!(analysis.intersections, 0);
    }

    #[test]
    fn test_oversized_sets_clamp_collisions_at_zero() {
        // Sets larger than the iteration count never come out of a trial,
        // but analyze accepts arbitrary sets and must not underflow.
        let a: ObservationSet = (0..5).collect();
        let b: ObservationSet = (0..2).collect();
        let analysis = analyze(3, &a, &b);
        assert_eq!(analysis.collisions_a, 0);
        assert_eq!(analysis.collisions_b, 1);
        assert_eq!(analysis.intersections, 2);
    }

    #[test]
    fn test_disjoint_full_sets_are_clean() {
        let a: ObservationSet = (0..100).collect();
        let b: ObservationSet = (100..200).collect();
        let analysis = analyze(100, &a, &b);
        assert_eq!(
            analysis,
            Analysis {
                intersections: 0,
                collisions_a: 0,
                collisions_b: 0
            }
        );
        assert_eq!(analysis.verdict(), Verdict::MayBeThreadSafe);
    }

    #[test]
    fn test_any_nonzero_metric_flips_the_verdict() {
        let clean = Analysis {
            intersections: 0,
            collisions_a: 0,
            collisions_b: 0,
        };
        assert_eq!(clean.verdict(), Verdict::MayBeThreadSafe);
        for dirty in [
            Analysis { intersections: 1, ..clean },
            Analysis { collisions_a: 1, ..clean },
            Analysis { collisions_b: 1, ..clean },
        ] {
            assert_eq!(dirty.verdict(), Verdict::NotThreadSafe);
        }
    }

    #[test]
    fn test_verdict_wording_is_hedged() {
        assert_eq!(Verdict::MayBeThreadSafe.to_string(), "may be thread-safe");
        assert_eq!(Verdict::NotThreadSafe.to_string(), "is not thread-safe");
    }

    #[test]
    fn test_observation_set_basics() {
        let mut set = ObservationSet::with_capacity(4);
        assert!(set.is_empty());
        assert!(set.insert(3));
        assert!(set.contains(3));
        assert!(!set.contains(4));
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![3]);
    }
}
