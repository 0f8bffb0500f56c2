//! Unified error type for all report renderers.

use thiserror::Error;

/// Unified error type for report rendering.
///
/// Wraps the failure modes of every fallible renderer so client code can
/// switch between output formats without changing its error handling. The
/// table renderer is infallible and never surfaces here.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Error from the JSON renderer.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for report rendering.
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_errors_wrap_with_context() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let wrapped = ReportError::from(err);
        assert!(wrapped.to_string().starts_with("json error:"));
    }
}
