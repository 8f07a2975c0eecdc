//! Error types for feature engineering.

use thiserror::Error;

/// Result type for feature operations.
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Errors that can occur while deriving features.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Operation on a frame with no rows
    #[error("Input frame has no rows")]
    EmptyFrame,

    /// Unexpected null while extracting the design matrix
    #[error("Missing value in column {column} at row {row}")]
    MissingValue {
        /// Column holding the null
        column: String,
        /// Row index of the null
        row: usize,
    },
}
