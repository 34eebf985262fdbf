//! SQLite backend implementation.
//!
//! Supports both in-memory databases (great for testing) and file-based
//! databases. Every mutating operation runs inside its own transaction, and
//! deletes leave a tombstone row so that an id is never reused.
//!
//! # Example
//!
//! ```no_run
//! use brewery_persistence::backends::sqlite::SqliteBackend;
//! use brewery_persistence::core::CustomerService;
//! use brewery_persistence::types::CustomerPayload;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! let customer = backend.create(CustomerPayload::named("Test")).await?;
//! let read = backend.get(customer.id).await?;
//! assert_eq!(read.name, "Test");
//! # Ok(())
//! # }
//! ```

mod backend;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use schema::SCHEMA_VERSION;
