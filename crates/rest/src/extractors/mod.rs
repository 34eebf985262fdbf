//! Axum extractors for customer requests.
//!
//! - [`CustomerJson`] - Extract a customer payload from a JSON body
//! - [`CustomerIdPath`] - Extract and parse the customer id path segment

mod customer_id;
mod customer_json;

pub use customer_id::CustomerIdPath;
pub use customer_json::{CustomerJson, CustomerJsonRejection};
