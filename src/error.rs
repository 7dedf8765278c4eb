//! Error types for the record store.

use thiserror::Error;

/// Main error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more required fields were blank after trimming.
    /// The message names every offending field, not just the first.
    #[error("missing required fields: {}", .fields.join(", "))]
    Validation { fields: Vec<String> },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Store is locked by another process")]
    Locked,
}

impl StoreError {
    /// Build a validation error from the names of the blank fields.
    pub fn validation<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StoreError::Validation {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this error should be shown to the user verbatim.
    ///
    /// Validation messages are user-facing; everything else gets a
    /// generic fallback at the form layer.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, StoreError::Validation { .. })
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
