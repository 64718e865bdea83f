use thiserror::Error;

/// Errors raised while configuring or running the optimizer.
///
/// Configuration problems are reported before any objective evaluation.
/// Bad objective values (NaN, infinities) are not errors: the
/// accept-if-better comparison silently rejects them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IasError {
    #[error("bounds must cover at least one dimension")]
    EmptyBounds,

    #[error("malformed bound for dimension {dimension}: lower {lower} > upper {upper}")]
    MalformedBound {
        dimension: usize,
        lower: f64,
        upper: f64,
    },

    #[error("bound for dimension {dimension} is not finite")]
    NonFiniteBound { dimension: usize },

    #[error("bound for dimension {dimension} is too wide: upper - lower overflows")]
    BoundRangeOverflow { dimension: usize },

    #[error("n_students must be at least {min} (peer selection needs a student besides i and the leader), got {got}")]
    TooFewStudents { got: usize, min: usize },

    #[error("n_iterations must be positive")]
    ZeroIterations,

    #[error("objective expects {expected} coordinates, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("objective evaluation failed: {0}")]
    Objective(String),

    #[error("callback failed: {0}")]
    Callback(String),

    #[error("school is empty")]
    EmptySchool,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for IasError {
    fn from(err: serde_json::Error) -> Self {
        IasError::Config(err.to_string())
    }
}
