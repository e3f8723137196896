//! Centralized error types for Ecclesia.

use thiserror::Error;

/// Main error type for Ecclesia operations.
#[derive(Error, Debug)]
pub enum ChurchError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{noun} not found: {id}")]
    NotFound { noun: &'static str, id: String },

    #[error("Nothing to submit: the form is closed")]
    EditorClosed,

    #[error("Database error: {0}")]
    Database(#[from] ecclesia_db::DbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for Ecclesia operations.
pub type ChurchResult<T> = Result<T, ChurchError>;

impl ChurchError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a not-found error for a record kind.
    pub fn not_found(noun: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            noun,
            id: id.into(),
        }
    }

    /// Whether the error was raised before reaching the store.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::EditorClosed)
    }
}
