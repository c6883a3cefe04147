//! Error types for parameter resolution and validation.

use thiserror::Error;

/// Errors raised while resolving or validating generation parameters.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A parameter is outside its accepted range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The mood has no entry in the scale table.
    #[error("no scale defined for mood '{0}'")]
    ScaleNotFound(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
