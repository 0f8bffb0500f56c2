//! Table renderer for trial results.
//!
//! Renders a batch of [`TrialResult`]s as a formatted ASCII table using the
//! `tabled` crate, one row per strategy.
//!
//! # Feature flag
//!
//! Requires the `table` feature:
//!
//! ```toml
//! [dependencies]
//! contesa = { version = "0.2", features = ["table"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use contesa::harness::run_trial;
//! use contesa::counters::Strategy;
//! use contesa::report::table::{TableReport, TableStyle};
//!
//! let results = vec![run_trial(Strategy::Atomic, 100_000)?];
//! println!("{}", TableReport::new().with_style(TableStyle::Rounded).render(&results));
//! // ╭──────────┬────────────────────┬───────────────┬──────────────┬──────────────┬──────────────╮
//! // │ Strategy │ Verdict            │ Intersections │ Collisions A │ Collisions B │ Elapsed (ms) │
//! // ├──────────┼────────────────────┼───────────────┼──────────────┼──────────────┼──────────────┤
//! // │ atomic   │ may be thread-safe │ 0             │ 0            │ 0            │ 4            │
//! // ╰──────────┴────────────────────┴───────────────┴──────────────┴──────────────┴──────────────╯
//! ```

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::analysis::TrialResult;

/// Available table styles for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    /// ASCII table with simple characters: +, -, |
    Ascii,
    /// Modern rounded corners (default)
    #[default]
    Rounded,
    /// Sharp corners with box-drawing characters
    Sharp,
    /// GitHub-flavored Markdown table
    Markdown,
    /// No borders, just spacing
    Blank,
}

/// Renders trial results as an ASCII table.
#[derive(Debug, Clone)]
pub struct TableReport {
    style: TableStyle,
    header: bool,
}

impl Default for TableReport {
    fn default() -> Self {
        Self::new()
    }
}

impl TableReport {
    /// Creates a renderer with the default (rounded) style and a header row.
    pub fn new() -> Self {
        TableReport {
            style: TableStyle::default(),
            header: true,
        }
    }

    /// Sets the table style, returning `self` for chaining.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Enables or disables the header row.
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Renders one row per result.
    pub fn render(&self, results: &[TrialResult]) -> String {
        let mut builder = Builder::default();

        if self.header {
            builder.push_record([
                "Strategy",
                "Verdict",
                "Intersections",
                "Collisions A",
                "Collisions B",
                "Elapsed (ms)",
            ]);
        }

        for result in results {
            let analysis = result.analysis();
            builder.push_record([
                result.strategy().to_string(),
                result.verdict().to_string(),
                analysis.intersections.to_string(),
                analysis.collisions_a.to_string(),
                analysis.collisions_b.to_string(),
                result.elapsed().as_millis().to_string(),
            ]);
        }

        let mut table = builder.build();
        match self.style {
            TableStyle::Ascii => table.with(Style::ascii()),
            TableStyle::Rounded => table.with(Style::rounded()),
            TableStyle::Sharp => table.with(Style::sharp()),
            TableStyle::Markdown => table.with(Style::markdown()),
            TableStyle::Blank => table.with(Style::blank()),
        };
        table.to_string()
    }
}
