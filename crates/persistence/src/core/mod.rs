//! Core storage traits.
//!
//! [`CustomerService`] is the single seam between the HTTP layer and storage.
//! Backends in [`crate::backends`] implement it; tests substitute their own
//! implementations.

mod service;

pub use service::CustomerService;
