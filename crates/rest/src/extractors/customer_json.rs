//! Customer payload extractor.
//!
//! Extracts a [`CustomerPayload`] from the request body. Field validation is
//! left to the service so that every caller sees the same rules.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use brewery_persistence::types::CustomerPayload;

use crate::error::RestError;

/// Axum extractor for customer payloads.
///
/// Accepts `application/json` and any `+json` media type. A request without a
/// content type is treated as JSON; a content type that is not visible ASCII
/// is rejected.
///
/// # Example
///
/// ```rust,ignore
/// use brewery_rest::extractors::CustomerJson;
///
/// async fn create_handler(CustomerJson(payload): CustomerJson) {
///     println!("name: {:?}", payload.name);
/// }
/// ```
#[derive(Debug)]
pub struct CustomerJson(pub CustomerPayload);

/// Error type for customer payload extraction failures.
#[derive(Debug)]
pub enum CustomerJsonRejection {
    /// Body was not valid JSON for a customer.
    InvalidJson(String),
    /// Unsupported content type.
    UnsupportedMediaType(String),
    /// Body exceeded the configured limit.
    PayloadTooLarge(String),
}

impl From<CustomerJsonRejection> for RestError {
    fn from(rejection: CustomerJsonRejection) -> Self {
        match rejection {
            CustomerJsonRejection::InvalidJson(msg) => RestError::BadRequest {
                message: format!("Invalid JSON: {}", msg),
            },
            CustomerJsonRejection::UnsupportedMediaType(ct) => {
                RestError::UnsupportedMediaType { content_type: ct }
            }
            CustomerJsonRejection::PayloadTooLarge(msg) => {
                RestError::PayloadTooLarge { message: msg }
            }
        }
    }
}

impl IntoResponse for CustomerJsonRejection {
    fn into_response(self) -> Response {
        RestError::from(self).into_response()
    }
}

/// Returns true for `application/json` and structured `+json` types.
fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == mime::APPLICATION_JSON.essence_str() || essence.ends_with("+json")
}

impl<S> FromRequest<S> for CustomerJson
where
    S: Send + Sync,
{
    type Rejection = CustomerJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Must own the string before moving req
        let content_type = match req.headers().get(header::CONTENT_TYPE) {
            None => mime::APPLICATION_JSON.to_string(),
            Some(value) => value.to_str().map(str::to_string).map_err(|_| {
                CustomerJsonRejection::UnsupportedMediaType(
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })?,
        };

        if !is_json_content_type(&content_type) {
            return Err(CustomerJsonRejection::UnsupportedMediaType(content_type));
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                CustomerJsonRejection::PayloadTooLarge(e.body_text())
            } else {
                CustomerJsonRejection::InvalidJson(e.body_text())
            }
        })?;

        let payload: CustomerPayload = serde_json::from_slice(&bytes)
            .map_err(|e| CustomerJsonRejection::InvalidJson(e.to_string()))?;

        Ok(CustomerJson(payload))
    }
}
