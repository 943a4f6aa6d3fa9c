//! Validation Error Types

use thiserror::Error;

/// Errors during input validation and scaling
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Categorical label not offered by the form
    #[error("{field} has no category '{label}'")]
    UnknownCategory { field: &'static str, label: String },

    /// NaN or infinite value reached the scaler
    #[error("{column} is not a finite number: {value}")]
    NonFinite { column: String, value: f64 },

    /// Wrong number of columns for a fitted transform
    #[error("Column count mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Fitted scaler columns differ from the scaled subset
    #[error("Scaler column order mismatch: expected {expected:?}, got {actual:?}")]
    ColumnOrderMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Fitted artifact could not be read
    #[error("Failed to load artifact {path}: {reason}")]
    ArtifactLoad { path: String, reason: String },
}
