//! Customer id path extractor.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use brewery_persistence::types::CustomerId;

use crate::error::RestError;

/// Extracts the `{customer_id}` path segment as a [`CustomerId`].
///
/// A segment that is not a UUID is rejected with 400 before the service is
/// called.
#[derive(Debug, Clone, Copy)]
pub struct CustomerIdPath(pub CustomerId);

impl<S> FromRequestParts<S> for CustomerIdPath
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: e.body_text(),
            })?;

        raw.parse::<CustomerId>()
            .map(CustomerIdPath)
            .map_err(|_| RestError::BadRequest {
                message: format!("Invalid customer id: {}", raw),
            })
    }
}
