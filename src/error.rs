//! Error types shared across the crate

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by analyzers and estimators
///
/// All errors are returned synchronously from the call that triggered them;
/// nothing is retried internally. A run either completes all three analytics
/// or fails before producing any of them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A quantile was requested but no observations have been ingested
    #[error("no observations to estimate from")]
    EmptyInput,

    /// A configuration field has an unusable value
    #[error("invalid config: {field} must be {expected}, got {got}")]
    InvalidConfig {
        field: &'static str,
        expected: &'static str,
        got: u64,
    },

    /// A percentile outside the closed range [0, 1] was requested
    #[error("percentile {0} outside [0, 1]")]
    PercentileOutOfRange(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Error::EmptyInput.to_string(), "no observations to estimate from");
        assert_eq!(
            Error::PercentileOutOfRange(1.5).to_string(),
            "percentile 1.5 outside [0, 1]"
        );
        let err = Error::InvalidConfig {
            field: "batch_size",
            expected: "positive",
            got: 0,
        };
        assert_eq!(err.to_string(), "invalid config: batch_size must be positive, got 0");
    }
}
