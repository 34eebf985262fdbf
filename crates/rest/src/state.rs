//! Application state for the customer REST API.
//!
//! Holds the customer service and server configuration shared by all
//! handlers.

use std::sync::Arc;

use brewery_persistence::core::CustomerService;
use brewery_persistence::types::CustomerId;

use crate::config::ServerConfig;
use crate::routing::CUSTOMER_BASE_PATH;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The customer service (must implement [`CustomerService`])
///
/// # Example
///
/// ```rust
/// use brewery_persistence::backends::memory::InMemoryBackend;
/// use brewery_rest::{AppState, ServerConfig};
/// use std::sync::Arc;
///
/// let state = AppState::new(Arc::new(InMemoryBackend::new()), ServerConfig::default());
/// assert_eq!(state.base_url(), "http://localhost:8080");
/// ```
pub struct AppState<S> {
    /// The customer service.
    service: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: CustomerService> AppState<S> {
    /// Creates a new AppState with the given service and configuration.
    pub fn new(service: Arc<S>, config: ServerConfig) -> Self {
        Self {
            service,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the customer service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Returns the base URL for the server.
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Returns the absolute URL of a customer resource.
    pub fn customer_location(&self, id: CustomerId) -> String {
        format!("{}{}/{}", self.base_url(), CUSTOMER_BASE_PATH, id)
    }
}
