//! Update handler.
//!
//! `PUT /api/v1/customer/{customer_id}`

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use brewery_persistence::core::CustomerService;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{CustomerIdPath, CustomerJson};
use crate::state::AppState;

/// Handler for updating a customer.
///
/// Only the name changes. The path id is authoritative and any `id` in the
/// body is ignored.
///
/// # Response
///
/// - `204 No Content` - Customer renamed
/// - `400 Bad Request` - Invalid id or payload
/// - `404 Not Found` - No customer with that id
pub async fn update_handler<S>(
    State(state): State<AppState<S>>,
    CustomerIdPath(id): CustomerIdPath,
    CustomerJson(payload): CustomerJson,
) -> RestResult<Response>
where
    S: CustomerService,
{
    debug!(customer_id = %id, body_id = ?payload.id, "Processing update request");

    state.service().update(id, payload).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
