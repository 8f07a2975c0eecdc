//! Error types for model training.

use thiserror::Error;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur during training or prediction.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Feature engineering error
    #[error("Feature error: {0}")]
    Feature(#[from] tenure_features::FeatureError),

    /// Mismatched input dimensions
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Expected dimension
        expected: String,
        /// Observed dimension
        actual: String,
    },

    /// Prediction requested before any tree was trained
    #[error("Model has not been fitted")]
    NotFitted,

    /// A label class is too small to split with a held-out fraction
    #[error("Degenerate split: class {label} has only {count} sample(s)")]
    DegenerateSplit {
        /// The class label
        label: u8,
        /// Number of samples observed for it
        count: usize,
    },

    /// Not enough cutoff months to run the training loop
    #[error("Only {available} distinct months available, warmup needs more than {warmup}")]
    InsufficientHistory {
        /// Distinct months in the dataset
        available: usize,
        /// Configured warmup month count
        warmup: usize,
    },
}
