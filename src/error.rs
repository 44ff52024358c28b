use thiserror::Error;

/// Convenience result type for loading and configuration.
pub type InferenceResult<T> = Result<T, InferenceError>;

/// Error type returned by loading functions and option validation.
///
/// Type inference and conversion themselves never fail: unparseable cells become
/// [`crate::types::Value::Null`] and classifier problems collapse to a negative verdict.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited text reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Options file could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not have a usable tabular shape (duplicate headers, ragged rows, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// Inference options are out of range.
    #[error("invalid options: {message}")]
    InvalidOptions { message: String },
}
