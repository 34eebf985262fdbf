//! Customer route configuration.

use axum::{
    Router,
    routing::{get, post},
};
use brewery_persistence::core::CustomerService;

use crate::handlers;
use crate::state::AppState;

/// Collection path for customers.
pub const CUSTOMER_BASE_PATH: &str = "/api/v1/customer";

/// Item path for a single customer.
pub const CUSTOMER_ITEM_PATH: &str = "/api/v1/customer/{customer_id}";

/// Creates all customer API routes.
///
/// # Routes
///
/// ## Probes
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
///
/// ## Customers
/// - `POST /api/v1/customer` - Create
/// - `GET /api/v1/customer/{customer_id}` - Read
/// - `PUT /api/v1/customer/{customer_id}` - Update
/// - `DELETE /api/v1/customer/{customer_id}` - Delete
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: CustomerService + 'static,
{
    Router::new()
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        .route(CUSTOMER_BASE_PATH, post(handlers::create_handler::<S>))
        .route(
            CUSTOMER_ITEM_PATH,
            get(handlers::read_handler::<S>)
                .put(handlers::update_handler::<S>)
                .delete(handlers::delete_handler::<S>),
        )
        .with_state(state)
}
