//! Response header generation.

use axum::http::{HeaderMap, HeaderValue, header};
use brewery_persistence::core::CustomerService;
use brewery_persistence::types::Customer;

use crate::state::AppState;

/// Builder for customer response headers.
///
/// Generates:
/// - Content-Type
/// - Location (for create operations)
#[derive(Debug, Default)]
pub struct CustomerHeaders {
    /// Location URL (for created customers).
    location: Option<String>,
    /// Content-Type.
    content_type: String,
}

impl CustomerHeaders {
    /// Creates a new CustomerHeaders builder.
    pub fn new() -> Self {
        Self {
            content_type: mime::APPLICATION_JSON.to_string(),
            ..Default::default()
        }
    }

    /// Creates headers for a newly created customer, including its Location.
    pub fn created<S>(customer: &Customer, state: &AppState<S>) -> Self
    where
        S: CustomerService,
    {
        Self::new().with_location(state.customer_location(customer.id))
    }

    /// Sets the Location URL.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Converts to an Axum HeaderMap.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(value) = HeaderValue::from_str(&self.content_type) {
            headers.insert(header::CONTENT_TYPE, value);
        }

        if let Some(location) = &self.location {
            if let Ok(value) = HeaderValue::from_str(location) {
                headers.insert(header::LOCATION, value);
            }
        }

        headers
    }

    /// Returns the Location value.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use brewery_persistence::backends::memory::InMemoryBackend;
    use brewery_persistence::types::CustomerId;
    use std::sync::Arc;

    #[test]
    fn test_new() {
        let headers = CustomerHeaders::new();
        assert!(headers.location().is_none());

        let map = headers.to_header_map();
        assert_eq!(map.get(header::CONTENT_TYPE).unwrap(), "application/json");
        assert!(map.get(header::LOCATION).is_none());
    }

    #[test]
    fn test_created_sets_location() {
        let state = AppState::new(Arc::new(InMemoryBackend::new()), ServerConfig::for_testing());
        let customer = Customer::new(CustomerId::generate(), "Test");

        let headers = CustomerHeaders::created(&customer, &state);
        let expected = format!("http://localhost/api/v1/customer/{}", customer.id);
        assert_eq!(headers.location(), Some(expected.as_str()));
        assert_eq!(
            headers.to_header_map().get(header::LOCATION).unwrap(),
            expected.as_str()
        );
    }
}
