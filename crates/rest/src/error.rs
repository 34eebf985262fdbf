//! Error types for the customer REST API.
//!
//! Every error renders as a JSON body with the HTTP status, a short machine
//! readable code and a human readable message:
//!
//! ```json
//! { "status": 404, "error": "not-found", "message": "Customer 6f1c... not found" }
//! ```
//!
//! # Error Mapping
//!
//! | Storage Error | HTTP Status | Code |
//! |--------------|-------------|------|
//! | NotFound | 404 | not-found |
//! | InvalidArgument | 400 | invalid |
//! | Backend | 500 | exception |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use brewery_persistence::error::StorageError;
use std::fmt;
use tracing::error;

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Customer not found (HTTP 404).
    NotFound {
        /// The customer id from the request path.
        id: String,
    },

    /// Bad request - malformed id or payload (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Unsupported media type (HTTP 415).
    UnsupportedMediaType {
        /// The unsupported content type.
        content_type: String,
    },

    /// Request body exceeded the configured limit (HTTP 413).
    PayloadTooLarge {
        /// Error message.
        message: String,
    },

    /// Storage is unreachable (HTTP 503).
    ServiceUnavailable {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { id } => write!(f, "Customer not found: {}", id),
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::UnsupportedMediaType { content_type } => {
                write!(f, "Unsupported media type: {}", content_type)
            }
            RestError::PayloadTooLarge { message } => write!(f, "Payload too large: {}", message),
            RestError::ServiceUnavailable { message } => {
                write!(f, "Service unavailable: {}", message)
            }
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RestError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the short error code used in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            RestError::NotFound { .. } => "not-found",
            RestError::BadRequest { .. } => "invalid",
            RestError::UnsupportedMediaType { .. } => "not-supported",
            RestError::PayloadTooLarge { .. } => "too-large",
            RestError::ServiceUnavailable { .. } => "unavailable",
            RestError::InternalError { .. } => "exception",
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = match &self {
            RestError::NotFound { id } => format!("Customer {} not found", id),
            RestError::UnsupportedMediaType { content_type } => {
                format!("Content type '{}' is not supported", content_type)
            }
            RestError::BadRequest { message }
            | RestError::PayloadTooLarge { message }
            | RestError::ServiceUnavailable { message }
            | RestError::InternalError { message } => message.clone(),
        };

        if status.is_server_error() {
            error!(status = %status, details = %details, "Request failed");
        }

        let body = create_error_body(status, self.code(), &details);
        (status, Json(body)).into_response()
    }
}

/// Creates the JSON error body.
fn create_error_body(status: StatusCode, code: &str, details: &str) -> serde_json::Value {
    serde_json::json!({
        "status": status.as_u16(),
        "error": code,
        "message": details
    })
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { id } => RestError::NotFound { id: id.to_string() },
            StorageError::InvalidArgument(e) => RestError::BadRequest {
                message: e.to_string(),
            },
            StorageError::Backend(e) => RestError::InternalError {
                message: e.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::BadRequest {
            message: format!("Invalid JSON: {}", err),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
