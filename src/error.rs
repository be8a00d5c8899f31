//! Error types for the event study

use thiserror::Error;

/// Structural failures when joining the two input series
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignmentError {
    /// One of the inputs has no observations
    #[error("Series '{0}' is empty")]
    EmptySeries(String),
    /// Inner join on time produced nothing
    #[error("Series '{primary}' and '{secondary}' share no common timestamps")]
    NoCommonTimestamps { primary: String, secondary: String },
}

/// Errors that abort a study run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StudyError {
    /// Input series could not be aligned
    #[error(transparent)]
    Alignment(#[from] AlignmentError),
    /// Timestamps are not strictly ascending
    #[error("Series '{label}' is not strictly ascending at index {index}")]
    UnorderedSeries { label: String, index: usize },
    /// NaN or infinite observation
    #[error("Series '{label}' has a non-finite value at index {index}")]
    NonFiniteValue { label: String, index: usize },
    /// Rejected configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
