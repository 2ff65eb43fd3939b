//! Series engine error types.
//!
//! Only configuration problems are errors. Problems with individual records are
//! reported through [`crate::records::RecordIssue`] and never abort a run.

use aidflow_shared::AppError;
use thiserror::Error;

/// Result type alias using `SeriesError`.
pub type SeriesResult<T> = Result<T, SeriesError>;

/// Fatal errors raised before any aggregation begins.
#[derive(Debug, Error)]
pub enum SeriesError {
    /// Malformed calendar definition or category roles.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Requested year range is reversed.
    #[error("Invalid year range: start {start} is after end {end}")]
    InvalidYearRange {
        /// First requested year.
        start: i32,
        /// Last requested year.
        end: i32,
    },

    /// A record payload could not be decoded.
    #[error("Failed to decode records: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<SeriesError> for AppError {
    fn from(err: SeriesError) -> Self {
        match err {
            SeriesError::InvalidConfiguration(_) => Self::Configuration(err.to_string()),
            SeriesError::InvalidYearRange { .. } => Self::Validation(err.to_string()),
            SeriesError::Decode(_) => Self::Decode(err.to_string()),
        }
    }
}
