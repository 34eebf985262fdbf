//! Brewery Persistence Layer
//!
//! This crate owns the customer collection. It defines the
//! [`CustomerService`](core::CustomerService) trait, the customer record types,
//! and the storage backends that implement the trait.
//!
//! # Features
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//!
//! The in-memory backend is always available.
//!
//! # Architecture
//!
//! - [`types`] - Customer records and payloads
//! - [`error`] - Error types for all operations
//! - [`core`] - The service trait
//! - [`backends`] - Backend implementations (memory, SQLite)
//!
//! # Guarantees
//!
//! - Ids are generated by the server and never reused, even after deletion.
//! - Update and get fail with [`StorageError::NotFound`] for absent ids.
//! - Delete is idempotent.
//! - Every operation applies fully or not at all.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use core::CustomerService;
pub use error::{StorageError, StorageResult};
pub use types::{Customer, CustomerId, CustomerPayload};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
