//! Delete handler.
//!
//! `DELETE /api/v1/customer/{customer_id}`

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use brewery_persistence::core::CustomerService;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::CustomerIdPath;
use crate::state::AppState;

/// Handler for deleting a customer.
///
/// Deleting an absent customer succeeds.
///
/// # Response
///
/// - `200 OK` - Empty body
/// - `400 Bad Request` - The id is not a UUID
pub async fn delete_handler<S>(
    State(state): State<AppState<S>>,
    CustomerIdPath(id): CustomerIdPath,
) -> RestResult<Response>
where
    S: CustomerService,
{
    debug!(customer_id = %id, "Processing delete request");

    state.service().delete(id).await?;

    Ok(StatusCode::OK.into_response())
}
