//! Customer storage backends.
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | Memory | always | `HashMap` behind a read/write lock, lost on restart |
//! | SQLite | `sqlite` | Embedded database, in-memory or file-based |
//!
//! # Example
//!
//! ```no_run
//! use brewery_persistence::backends::memory::InMemoryBackend;
//! # #[cfg(feature = "sqlite")]
//! use brewery_persistence::backends::sqlite::SqliteBackend;
//!
//! # #[cfg(feature = "sqlite")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let memory = InMemoryBackend::new();
//!
//! let sqlite = SqliteBackend::open("./data/customers.db")?;
//! sqlite.init_schema()?;
//! # Ok(())
//! # }
//! ```

pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;
