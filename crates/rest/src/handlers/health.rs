//! Health check endpoint handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use brewery_persistence::core::CustomerService;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET /health`
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: CustomerService,
{
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": state.service().backend_name(),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}

/// Handler for the liveness probe.
///
/// # HTTP Request
///
/// `GET /_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for the readiness probe.
///
/// Counts customers to prove the backend answers queries.
///
/// # HTTP Request
///
/// `GET /_readiness`
///
/// # Response
///
/// - `200 OK` - Storage reachable
/// - `503 Service Unavailable` - Storage query failed
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: CustomerService,
{
    debug!("Processing readiness check request");

    let backend_name = state.service().backend_name();
    let count = state.service().count().await.map_err(|e| {
        warn!(backend = backend_name, error = %e, "Readiness check failed");
        RestError::ServiceUnavailable {
            message: format!("Storage backend '{}' is not ready: {}", backend_name, e),
        }
    })?;

    let response = serde_json::json!({
        "status": "ready",
        "backend": backend_name,
        "checks": {
            "storage": "ok",
            "customers": count
        }
    });

    Ok((StatusCode::OK, Json(response)).into_response())
}
