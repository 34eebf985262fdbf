//! Core types for the persistence layer.
//!
//! - [`CustomerId`] - Server-assigned customer identifier
//! - [`Customer`] - A stored customer record, handed to callers by value
//! - [`CustomerPayload`] - Inbound create/update payload
//!
//! # Examples
//!
//! ```
//! use brewery_persistence::types::{CustomerId, CustomerPayload};
//!
//! let payload = CustomerPayload::named("Test");
//! let name = payload.validated_name().unwrap();
//! assert_eq!(name, "Test");
//!
//! let id = CustomerId::generate();
//! assert_eq!(id.to_string().len(), 36);
//! ```

mod customer;

pub use customer::{Customer, CustomerId, CustomerPayload, MAX_NAME_LENGTH};
