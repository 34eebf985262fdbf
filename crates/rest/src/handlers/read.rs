//! Read handler.
//!
//! `GET /api/v1/customer/{customer_id}`

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use brewery_persistence::core::CustomerService;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::CustomerIdPath;
use crate::responses::CustomerHeaders;
use crate::state::AppState;

/// Handler for reading a customer.
///
/// # Response
///
/// - `200 OK` - The customer as `{"id": ..., "name": ...}`
/// - `400 Bad Request` - The id is not a UUID
/// - `404 Not Found` - No customer with that id
pub async fn read_handler<S>(
    State(state): State<AppState<S>>,
    CustomerIdPath(id): CustomerIdPath,
) -> RestResult<Response>
where
    S: CustomerService,
{
    debug!(customer_id = %id, "Processing read request");

    let customer = state.service().get(id).await?;

    Ok((
        StatusCode::OK,
        CustomerHeaders::new().to_header_map(),
        Json(customer),
    )
        .into_response())
}
