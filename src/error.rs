//! Engine anomaly taxonomy.
//!
//! Nothing here is fatal.  The engine logs these and degrades to
//! "no detection this frame" plus the mandatory safety releases.

use thiserror::Error;

/// Anomalies the pointer engine can observe while processing frames.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The hand frame is shorter than the landmark index a feature needs.
    #[error("missing landmark {index} (frame has {len} landmarks)")]
    MissingLandmark { index: usize, len: usize },

    /// An empty frame arrived after a non-empty one.
    #[error("hand lost")]
    HandLost,

    /// A configuration field was outside its bounds and has been clamped.
    #[error("invalid config {field}={value}, clamped to {clamped}")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        clamped: f64,
    },
}

/// Result alias for landmark lookups and other engine-internal queries.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_landmark_display() {
        let e = EngineError::MissingLandmark { index: 12, len: 9 };
        assert_eq!(e.to_string(), "missing landmark 12 (frame has 9 landmarks)");
    }

    #[test]
    fn test_invalid_config_display() {
        let e = EngineError::InvalidConfig {
            field: "pinch_threshold",
            value: 0.5,
            clamped: 0.2,
        };
        assert!(e.to_string().contains("pinch_threshold=0.5"));
        assert!(e.to_string().contains("clamped to 0.2"));
    }
}
