use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputeError {
    /// A color scale without any bucket
    #[error("Color scale needs at least one bucket")]
    EmptyScale,

    /// A threshold that is NaN or infinite
    #[error("Color scale threshold {0} is not a finite number")]
    NonFiniteThreshold(f64),

    /// Thresholds out of order or repeated
    #[error("Color scale thresholds must be strictly ascending, got {next} after {previous}")]
    UnorderedThresholds { previous: f64, next: f64 },

    /// Closing boundary at or below the last threshold
    #[error("Color scale upper bound {upper} must be greater than the last threshold {last}")]
    InvalidUpperBound { upper: f64, last: f64 },

    /// A `threshold:#RRGGBB` step that does not parse
    #[error("Invalid color scale step '{step}': {reason}")]
    InvalidStep { step: String, reason: String },
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
