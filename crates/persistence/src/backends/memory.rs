//! In-memory backend.
//!
//! Keeps customers in a `HashMap` behind a `parking_lot::RwLock`. Reads share
//! the lock; create, update and delete hold it exclusively for the whole
//! operation. Deleted ids move to a retired set so they are never handed out
//! again.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::core::CustomerService;
use crate::error::{StorageError, StorageResult};
use crate::types::{Customer, CustomerId, CustomerPayload};

/// In-memory customer storage.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    customers: HashMap<CustomerId, String>,
    retired: HashSet<CustomerId>,
}

impl MemoryState {
    fn fresh_id(&self) -> CustomerId {
        loop {
            let id = CustomerId::generate();
            if !self.customers.contains_key(&id) && !self.retired.contains(&id) {
                return id;
            }
        }
    }
}

impl InMemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the id has been deleted at some point.
    pub fn is_retired(&self, id: CustomerId) -> bool {
        self.state.read().retired.contains(&id)
    }
}

#[async_trait]
impl CustomerService for InMemoryBackend {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, id: CustomerId) -> StorageResult<Customer> {
        let state = self.state.read();
        state
            .customers
            .get(&id)
            .map(|name| Customer::new(id, name.clone()))
            .ok_or(StorageError::NotFound { id })
    }

    async fn create(&self, payload: CustomerPayload) -> StorageResult<Customer> {
        let name = payload.validated_name()?;

        let mut state = self.state.write();
        let id = state.fresh_id();
        state.customers.insert(id, name.clone());
        debug!(id = %id, "Customer stored in memory");

        Ok(Customer::new(id, name))
    }

    async fn update(&self, id: CustomerId, payload: CustomerPayload) -> StorageResult<()> {
        let name = payload.validated_name()?;

        let mut state = self.state.write();
        match state.customers.get_mut(&id) {
            Some(stored) => {
                *stored = name;
                Ok(())
            }
            None => Err(StorageError::NotFound { id }),
        }
    }

    async fn delete(&self, id: CustomerId) -> StorageResult<()> {
        let mut state = self.state.write();
        if state.customers.remove(&id).is_some() {
            state.retired.insert(id);
            debug!(id = %id, "Customer removed from memory");
        }
        Ok(())
    }

    async fn count(&self) -> StorageResult<u64> {
        Ok(self.state.read().customers.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_server_id() {
        let backend = InMemoryBackend::new();
        let client_id = CustomerId::generate();

        let created = backend
            .create(CustomerPayload::named("Test").with_id(client_id))
            .await
            .unwrap();

        assert_ne!(created.id, client_id);
        assert_eq!(created.name, "Test");
        assert_eq!(backend.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_name() {
        let backend = InMemoryBackend::new();

        let err = backend.create(CustomerPayload::default()).await.unwrap_err();

        assert!(err.is_invalid_argument());
        assert_eq!(backend.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_retires_id() {
        let backend = InMemoryBackend::new();
        let created = backend.create(CustomerPayload::named("Test")).await.unwrap();

        backend.delete(created.id).await.unwrap();

        assert!(backend.is_retired(created.id));
        assert!(backend.get(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_does_not_retire() {
        let backend = InMemoryBackend::new();
        let id = CustomerId::generate();

        backend.delete(id).await.unwrap();

        assert!(!backend.is_retired(id));
    }

    #[tokio::test]
    async fn test_update_missing_id_leaves_collection_unchanged() {
        let backend = InMemoryBackend::new();
        let existing = backend.create(CustomerPayload::named("Test")).await.unwrap();

        let err = backend
            .update(CustomerId::generate(), CustomerPayload::named("Other"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(backend.count().await.unwrap(), 1);
        assert_eq!(backend.get(existing.id).await.unwrap().name, "Test");
    }
}
