//! SQLite schema definitions and migrations.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

fn migration_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::MigrationError { message })
}

/// Initialize the database schema.
///
/// Runs inside one transaction; calling it on an up-to-date database is a
/// no-op.
pub fn initialize_schema(conn: &mut Connection) -> StorageResult<()> {
    let tx = conn
        .transaction()
        .map_err(|e| migration_error(format!("Failed to begin transaction: {}", e)))?;

    let current_version = get_schema_version(&tx)?;

    if current_version == 0 {
        create_schema_v1(&tx)?;
        set_schema_version(&tx, SCHEMA_VERSION)?;
    } else if current_version > SCHEMA_VERSION {
        return Err(migration_error(format!(
            "Database schema version {} is newer than supported version {}",
            current_version, SCHEMA_VERSION
        )));
    }

    tx.commit()
        .map_err(|e| migration_error(format!("Failed to commit schema: {}", e)))
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| migration_error(format!("Failed to create schema_version table: {}", e)))?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|e| migration_error(format!("Failed to read schema_version: {}", e)))?;

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| migration_error(format!("Failed to clear schema_version: {}", e)))?;

    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
        .map_err(|e| migration_error(format!("Failed to set schema_version: {}", e)))?;

    Ok(())
}

/// Create the initial schema.
///
/// Deleted customers keep their row with `deleted_at` set; the primary key
/// therefore reserves every id ever issued.
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS customers (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            last_modified TEXT NOT NULL,
            deleted_at TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_customers_live
            ON customers (id) WHERE deleted_at IS NULL;",
    )
    .map_err(|e| migration_error(format!("Failed to create customers table: {}", e)))
}
