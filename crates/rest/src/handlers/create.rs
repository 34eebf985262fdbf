//! Create handler.
//!
//! `POST /api/v1/customer`

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use brewery_persistence::core::CustomerService;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::CustomerJson;
use crate::responses::CustomerHeaders;
use crate::state::AppState;

/// Handler for creating a customer.
///
/// The server assigns the id. Any `id` in the body is ignored.
///
/// # Response
///
/// - `201 Created` - The stored customer, with a `Location` header
/// - `400 Bad Request` - Missing, blank or over-long name, or malformed JSON
/// - `415 Unsupported Media Type` - Body is not JSON
///
/// # Example
///
/// ```http
/// POST /api/v1/customer HTTP/1.1
/// Content-Type: application/json
///
/// {"name": "Test"}
/// ```
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    CustomerJson(payload): CustomerJson,
) -> RestResult<Response>
where
    S: CustomerService,
{
    debug!(client_id = ?payload.id, "Processing create request");

    let customer = state.service().create(payload).await?;
    let headers = CustomerHeaders::created(&customer, &state);

    debug!(customer_id = %customer.id, "Customer created");

    Ok((StatusCode::CREATED, headers.to_header_map(), Json(customer)).into_response())
}
