//! Error types for itemodm
//!
//! Provides a unified error type for all mapping operations.

use thiserror::Error;

/// Result type alias using OdmError
pub type Result<T> = std::result::Result<T, OdmError>;

/// Unified error type for itemodm operations
#[derive(Debug, Error)]
pub enum OdmError {
    // -------------------------------------------------------------------------
    // Metadata Errors
    // -------------------------------------------------------------------------
    /// Declarative metadata is missing, malformed or self-contradictory
    #[error("Parsing error: {0}")]
    Parsing(String),

    // -------------------------------------------------------------------------
    // Mapping Errors
    // -------------------------------------------------------------------------
    /// An object of the wrong type was handed to a mapper
    #[error("Type error: expected an object of type {expected}")]
    TypeMismatch { expected: &'static str },

    /// A primary key component is missing
    #[error("Cannot get identifier for incomplete object! <{key}> is empty!")]
    IncompleteKey { key: String },

    /// A value could not be converted to the declared attribute type
    #[error("Cannot coerce attribute <{attribute}> from {found} to string")]
    Coercion { attribute: String, found: &'static str },

    /// An item adapter rejected a value for one of its properties
    #[error("Adapter rejected property <{property}>: {message}")]
    Adapter { property: String, message: String },

    // -------------------------------------------------------------------------
    // I/O and Serialization Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OdmError {
    /// Build an adapter error for a property that received an unexpected value
    pub fn adapter(property: impl Into<String>, message: impl Into<String>) -> Self {
        OdmError::Adapter {
            property: property.into(),
            message: message.into(),
        }
    }
}
