//! Custom error types for card services
//!
//! This module defines the error hierarchy for the crate using thiserror.
//! Every variant falls into one of three kinds (validation, not found,
//! unexpected) which the API boundary maps onto status codes.

use thiserror::Error;

/// The main error type for card service operations
#[derive(Error, Debug)]
pub enum CardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Malformed or missing input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors (lock poisoning, unreadable data files)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Anything else, wrapped with context
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Broad classification of a [`CardError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Unexpected,
}

impl ErrorKind {
    /// HTTP-style status code for this kind
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound => 404,
            Self::Unexpected => 500,
        }
    }
}

impl CardError {
    /// Create a "not found" error for a card
    pub fn card_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Card",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for a user that owns no cards
    pub fn user_cards_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Cards for user",
            identifier: identifier.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Config(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Storage(_)
            | Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for CardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for card service operations
pub type CardResult<T> = Result<T, CardError>;
