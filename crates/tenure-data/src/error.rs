//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while fetching or normalizing the dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTTP error status from the sheet export endpoint
    #[error("HTTP error fetching sheet {sheet_id}: status {status}")]
    HttpStatus {
        /// Sheet that was requested
        sheet_id: String,
        /// Status code returned
        status: u16,
    },

    /// Fetch still failing after the retry budget was spent
    #[error("Fetch of sheet {sheet_id} failed after {attempts} attempts: {reason}")]
    RetriesExhausted {
        /// Sheet that was requested
        sheet_id: String,
        /// Number of attempts made
        attempts: usize,
        /// Last observed failure
        reason: String,
    },

    /// CSV deserialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Malformed date value in a date column
    #[error("Invalid date {value:?} in column {column}")]
    DateParse {
        /// Column holding the value
        column: String,
        /// The offending value
        value: String,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
