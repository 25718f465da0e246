//! Error types for fieldkit
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using FieldkitError
pub type Result<T> = std::result::Result<T, FieldkitError>;

/// Unified error type for fieldkit operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldkitError {
    // -------------------------------------------------------------------------
    // Collection Errors
    // -------------------------------------------------------------------------
    /// Carries the rendered key
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    /// Carries the schema name only, never the missing field
    #[error("Required fields unsatisfied for {0}")]
    RequiredFieldsUnsatisfied(&'static str),

    #[error("Malformed field value for {schema}: {reason}")]
    MalformedField { schema: &'static str, reason: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Parse Errors
    // -------------------------------------------------------------------------
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl FieldkitError {
    pub(crate) fn key_not_found(key: &(impl std::fmt::Display + ?Sized)) -> Self {
        FieldkitError::KeyNotFound(key.to_string())
    }
}
