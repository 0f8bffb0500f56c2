//! Rendering of trial results for human and machine consumers.
//!
//! The core hands each completed trial over as a
//! [`TrialResult`](crate::analysis::TrialResult); the modules here only read
//! it. Each renderer is gated behind a feature flag so the core stays
//! dependency-light:
//!
//! | Feature | Module | Output |
//! |---------|--------|--------|
//! | `table` | [`table`] | ASCII table via the `tabled` crate |
//! | `json`  | [`json`]  | JSON array via `serde_json` |
//! | `full`  | both | |
//!
//! Fallible renderers share the [`ReportError`] type, so callers can switch
//! formats without changing their error handling; the table renderer is
//! infallible and returns a plain `String`.

#[cfg(feature = "json")]
mod error;

#[cfg(feature = "json")]
pub use error::{ReportError, Result};

#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "table")]
pub mod table;
