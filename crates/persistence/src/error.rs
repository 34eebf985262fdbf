//! Error types for the persistence layer.
//!
//! Storage operations fail in one of three ways: the referenced customer does
//! not exist, the caller supplied a malformed payload, or the backend itself
//! failed. Each category maps to a distinct HTTP status in the REST layer.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::types::CustomerId;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// No live customer has the given id.
    #[error("customer not found: {id}")]
    NotFound { id: CustomerId },

    /// The payload failed validation.
    #[error(transparent)]
    InvalidArgument(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StorageError {
    /// Returns true if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }

    /// Returns true if this is a validation error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, StorageError::InvalidArgument(_))
    }
}

/// Errors related to payload validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was absent or null.
    #[error("missing required field: {field}")]
    MissingRequiredField { field: String },

    /// A field was present but its value is not acceptable.
    #[error("invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },
}

/// Errors raised by a storage backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let id: CustomerId = "6f1c2e44-6a7d-4c55-9a53-6f4a8e0c1d2b".parse().unwrap();
        let err = StorageError::NotFound { id };
        assert_eq!(
            err.to_string(),
            "customer not found: 6f1c2e44-6a7d-4c55-9a53-6f4a8e0c1d2b"
        );
        assert!(err.is_not_found());
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: StorageError = ValidationError::MissingRequiredField {
            field: "name".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "missing required field: name");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::ConnectionFailed {
            backend_name: "sqlite".to_string(),
            message: "pool timed out".to_string(),
        };
        assert_eq!(err.to_string(), "connection failed to sqlite: pool timed out");
    }
}
