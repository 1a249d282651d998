use thiserror::Error;

/// Error type for rejected operations.
///
/// Every variant is recoverable: the caller keeps whatever state it had before the
/// failing call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrendError {
    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
    #[error("Insufficient data: {points} points available, at least {required} required")]
    InsufficientData { points: usize, required: usize },
    #[error("Least-squares solve failed: {0}")]
    SingularFit(String),
    #[error("Cannot derive a relation from a model with zero slope")]
    DegenerateRelation,
    #[error("Relations require degree 1 models, got degree {degree}")]
    UnsupportedDegree { degree: usize },
    #[error("Scenario percentage must be a positive, finite number. Got {0}")]
    InvalidPercentage(f64),
    #[error("Unknown indicator: {0}")]
    UnknownIndicator(String),
    #[error("Series are not aligned: {0}")]
    MisalignedSeries(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),
}

/// Convenience type for `Result<T, TrendError>`.
pub type TrendResult<T> = Result<T, TrendError>;
