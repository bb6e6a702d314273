//! Error types for the records crate.
//!
//! Evaluation over records never fails. These errors only describe inputs
//! that break a precondition (a dataset that is not a list, a list element
//! that is not an object) or that could not be read at all.

use thiserror::Error;

/// Errors that can occur while reading or validating a dataset
#[derive(Error, Debug)]
pub enum RecordError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// File contents were not valid JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The top-level value handed to the engine was not an array
    ///
    /// This is a programmer error upstream (usually a fetch that returned
    /// an error object instead of a list) and is never masked as an empty
    /// result.
    #[error("Precondition violated: {input} must be an array, got {found}")]
    NotAnArray { input: String, found: String },

    /// An element of the dataset was not an object
    #[error("Precondition violated: {input}[{index}] must be an object, got {found}")]
    InvalidRecord {
        input: String,
        index: usize,
        found: String,
    },

    /// An element could not be read as the expected record shape
    #[error("Invalid {input}[{index}]: {reason}")]
    InvalidShape {
        input: String,
        index: usize,
        reason: String,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecordError>;

/// Short human-readable name for a JSON value's kind, used in error messages.
pub(crate) fn kind_of(value: &serde_json::Value) -> String {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
    .to_string()
}
