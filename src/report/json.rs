//! JSON renderer for trial results.
//!
//! Serializes a batch of [`TrialResult`]s to a JSON array using serde. The
//! wire shape is [`ResultSnapshot`], a flat record suitable for storing to
//! files or feeding to external tooling.
//!
//! # Feature flag
//!
//! Requires the `json` feature:
//!
//! ```toml
//! [dependencies]
//! contesa = { version = "0.2", features = ["json"] }
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::{Analysis, TrialResult, Verdict};
use crate::counters::Strategy;
use crate::report::Result;

/// A serializable snapshot of one trial's outcome.
///
/// Elapsed time is flattened to whole milliseconds, matching what the
/// human-readable report shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultSnapshot {
    /// The strategy the trial exercised.
    pub strategy: Strategy,
    /// Safety classification of this run.
    pub verdict: Verdict,
    /// Iterations each worker performed.
    pub iterations: usize,
    /// The violation metrics.
    #[serde(flatten)]
    pub analysis: Analysis,
    /// Wall-clock duration of the contended phase, in milliseconds.
    pub elapsed_ms: u64,
}

impl From<&TrialResult> for ResultSnapshot {
    fn from(result: &TrialResult) -> Self {
        ResultSnapshot {
            strategy: result.strategy(),
            verdict: result.verdict(),
            iterations: result.iterations(),
            analysis: result.analysis(),
            elapsed_ms: result.elapsed().as_millis() as u64,
        }
    }
}

/// Renders trial results as a JSON array.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReport {
    pretty: bool,
}

impl JsonReport {
    /// Creates a renderer producing compact JSON.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables pretty-printing.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Serializes the results to a JSON string.
    pub fn to_json(&self, results: &[TrialResult]) -> Result<String> {
        let snapshots: Vec<ResultSnapshot> = results.iter().map(ResultSnapshot::from).collect();
        let json = if self.pretty {
            serde_json::to_string_pretty(&snapshots)?
        } else {
            serde_json::to_string(&snapshots)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::run_trial;

    #[test]
    fn test_snapshot_round_trips() {
        let result = run_trial(Strategy::Atomic, 1000).unwrap();
        let snapshot = ResultSnapshot::from(&result);
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: ResultSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_to_json_renders_an_array_of_flat_records() {
        let results = vec![run_trial(Strategy::MutexBlock, 500).unwrap()];
        let json = JsonReport::new().to_json(&results).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains(r#""strategy":"mutex-block""#));
        assert!(json.contains(r#""verdict":"may-be-thread-safe""#));
        assert!(json.contains(r#""intersections":0"#));
    }

    #[test]
    fn test_pretty_output_is_multiline() {
        let results = vec![run_trial(Strategy::SpinLocked, 100).unwrap()];
        let json = JsonReport::new().pretty(true).to_json(&results).unwrap();
        assert!(json.contains('\n'));
    }
}
