//! HTTP request handlers for the customer API.
//!
//! - [`read`] - Read a customer by id
//! - [`create`] - Create a new customer
//! - [`update`] - Rename an existing customer
//! - [`delete`] - Delete a customer
//! - [`health`] - Health, liveness and readiness endpoints

pub mod create;
pub mod delete;
pub mod health;
pub mod read;
pub mod update;

// Re-export handlers for convenience
pub use create::create_handler;
pub use delete::delete_handler;
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use read::read_handler;
pub use update::update_handler;
