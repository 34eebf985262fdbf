//! Test server construction.

use std::sync::Arc;

use axum_test::TestServer;
use brewery_persistence::core::CustomerService;
use brewery_rest::{ServerConfig, create_app_with_config};

/// Creates a test server over a shared service, using the testing config.
pub fn test_server<S>(service: Arc<S>) -> TestServer
where
    S: CustomerService + 'static,
{
    test_server_with_config(service, ServerConfig::for_testing())
}

/// Creates a test server over a shared service with a custom config.
pub fn test_server_with_config<S>(service: Arc<S>, config: ServerConfig) -> TestServer
where
    S: CustomerService + 'static,
{
    let app = create_app_with_config(service, config);
    TestServer::new(app).expect("Failed to create test server")
}

/// Path of a single customer.
pub fn customer_path(id: impl std::fmt::Display) -> String {
    format!("/api/v1/customer/{}", id)
}
