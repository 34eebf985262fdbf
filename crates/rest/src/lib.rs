//! # brewery-rest - Customer REST API
//!
//! This crate exposes the brewery customer collection over HTTP. It maps the
//! four CRUD operations of
//! [`CustomerService`](brewery_persistence::core::CustomerService) onto JSON
//! endpoints and can record API documentation snippets while it serves.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use brewery_rest::{create_app, ServerConfig};
//! use brewery_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("brewery.db")?;
//!     backend.init_schema()?;
//!
//!     let app = create_app(backend);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern | Success |
//! |-----------|-------------|-------------|---------|
//! | read | GET | `/api/v1/customer/{customerId}` | 200 + customer |
//! | create | POST | `/api/v1/customer` | 201 + customer + `Location` |
//! | update | PUT | `/api/v1/customer/{customerId}` | 204 |
//! | delete | DELETE | `/api/v1/customer/{customerId}` | 200 |
//! | health | GET | `/health`, `/_liveness`, `/_readiness` | 200 |
//!
//! ## Error Handling
//!
//! Errors are returned as `{"status", "error", "message"}` JSON bodies:
//!
//! | HTTP Status | Code | Description |
//! |-------------|------|-------------|
//! | 400 | invalid | Malformed id, JSON or payload |
//! | 404 | not-found | Customer not found |
//! | 413 | too-large | Body over the configured limit |
//! | 415 | not-supported | Body is not JSON |
//! | 500 | exception | Storage failure |
//! | 503 | unavailable | Storage not ready |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and error bodies
//! - [`config`] - Server configuration
//! - [`state`] - Application state (service, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Axum extractors for customer ids and payloads
//! - [`responses`] - Response header generation
//! - [`routing`] - Route configuration
//! - [`docs`] - API documentation recording

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::{ServerConfig, StorageBackendMode};
pub use docs::{DocumentedService, SnippetRecorder};
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use brewery_persistence::core::CustomerService;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
///
/// # Example
///
/// ```rust
/// use brewery_persistence::backends::memory::InMemoryBackend;
/// use brewery_rest::create_app;
///
/// let app = create_app(InMemoryBackend::new());
/// ```
pub fn create_app<S>(service: S) -> Router
where
    S: CustomerService + 'static,
{
    create_app_with_config(service, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Example
///
/// ```rust
/// use brewery_persistence::backends::memory::InMemoryBackend;
/// use brewery_rest::{create_app_with_config, ServerConfig};
///
/// let config = ServerConfig {
///     port: 3000,
///     enable_cors: false,
///     ..Default::default()
/// };
/// let app = create_app_with_config(InMemoryBackend::new(), config);
/// ```
pub fn create_app_with_config<S>(service: S, config: ServerConfig) -> Router
where
    S: CustomerService + 'static,
{
    info!(
        "Creating REST API server with backend: {}",
        service.backend_name()
    );

    let state = AppState::new(Arc::new(service), config.clone());
    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = router.layer(DefaultBodyLimit::max(config.max_body_size));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    let router = router.layer(service_builder);

    // Outermost so the id is set before tracing and echoed on every response
    if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    }
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` overrides
/// the level.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "brewery_rest={level},brewery_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
