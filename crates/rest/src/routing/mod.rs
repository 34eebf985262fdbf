//! Route configuration for the customer REST API.

pub mod customer_routes;

pub use customer_routes::{CUSTOMER_BASE_PATH, CUSTOMER_ITEM_PATH, create_routes};
