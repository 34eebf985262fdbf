//! CustomerService implementation for SQLite.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::core::CustomerService;
use crate::error::{BackendError, StorageError, StorageResult};
use crate::types::{Customer, CustomerId, CustomerPayload};

use super::SqliteBackend;

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

fn query_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::QueryError { message })
}

#[async_trait]
impl CustomerService for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn get(&self, id: CustomerId) -> StorageResult<Customer> {
        let conn = self.get_connection()?;

        let name: Option<String> = conn
            .query_row(
                "SELECT name FROM customers WHERE id = ?1 AND deleted_at IS NULL",
                params![id.to_string()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| query_error(format!("Failed to read customer: {}", e)))?;

        name.map(|name| Customer::new(id, name))
            .ok_or(StorageError::NotFound { id })
    }

    async fn create(&self, payload: CustomerPayload) -> StorageResult<Customer> {
        let name = payload.validated_name()?;

        let mut conn = self.get_connection()?;
        let tx = conn
            .transaction()
            .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

        // Tombstones are included so a retired id is never issued again
        let id = loop {
            let candidate = CustomerId::generate();
            let taken: bool = tx
                .query_row(
                    "SELECT 1 FROM customers WHERE id = ?1",
                    params![candidate.to_string()],
                    |_| Ok(true),
                )
                .optional()
                .map_err(|e| query_error(format!("Failed to check id: {}", e)))?
                .unwrap_or(false);
            if !taken {
                break candidate;
            }
        };

        let now = Utc::now().to_rfc3339();
        tx.execute(
            "INSERT INTO customers (id, name, created_at, last_modified, deleted_at)
             VALUES (?1, ?2, ?3, ?3, NULL)",
            params![id.to_string(), name, now],
        )
        .map_err(|e| internal_error(format!("Failed to insert customer: {}", e)))?;

        tx.commit()
            .map_err(|e| internal_error(format!("Failed to commit transaction: {}", e)))?;

        debug!(id = %id, "Customer inserted");
        Ok(Customer::new(id, name))
    }

    async fn update(&self, id: CustomerId, payload: CustomerPayload) -> StorageResult<()> {
        let name = payload.validated_name()?;

        let mut conn = self.get_connection()?;
        let tx = conn
            .transaction()
            .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

        let now = Utc::now().to_rfc3339();
        let updated = tx
            .execute(
                "UPDATE customers SET name = ?2, last_modified = ?3
                 WHERE id = ?1 AND deleted_at IS NULL",
                params![id.to_string(), name, now],
            )
            .map_err(|e| internal_error(format!("Failed to update customer: {}", e)))?;

        if updated == 0 {
            return Err(StorageError::NotFound { id });
        }

        tx.commit()
            .map_err(|e| internal_error(format!("Failed to commit transaction: {}", e)))?;

        debug!(id = %id, "Customer updated");
        Ok(())
    }

    async fn delete(&self, id: CustomerId) -> StorageResult<()> {
        let mut conn = self.get_connection()?;
        let tx = conn
            .transaction()
            .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

        let now = Utc::now().to_rfc3339();
        let deleted = tx
            .execute(
                "UPDATE customers SET deleted_at = ?2, last_modified = ?2
                 WHERE id = ?1 AND deleted_at IS NULL",
                params![id.to_string(), now],
            )
            .map_err(|e| internal_error(format!("Failed to delete customer: {}", e)))?;

        tx.commit()
            .map_err(|e| internal_error(format!("Failed to commit transaction: {}", e)))?;

        debug!(id = %id, deleted = deleted > 0, "Customer delete processed");
        Ok(())
    }

    async fn count(&self) -> StorageResult<u64> {
        let conn = self.get_connection()?;

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM customers WHERE deleted_at IS NULL",
                [],
                |row| row.get(0),
            )
            .map_err(|e| query_error(format!("Failed to count customers: {}", e)))?;

        Ok(count as u64)
    }
}
