//! Contract tests for CustomerService backends.
//!
//! Every backend runs the same scenarios: create/get, update, idempotent
//! delete, id uniqueness and the full lifecycle.

use std::collections::HashSet;

use brewery_persistence::backends::memory::InMemoryBackend;
use brewery_persistence::core::CustomerService;
use brewery_persistence::types::{Customer, CustomerId, CustomerPayload};

#[cfg(feature = "sqlite")]
use brewery_persistence::backends::sqlite::SqliteBackend;

// ============================================================================
// Scenarios
// ============================================================================

async fn create_then_get_returns_input_plus_id<S: CustomerService>(service: S) {
    let created = service.create(CustomerPayload::named("Test")).await.unwrap();
    assert_eq!(created.name, "Test");

    let read = service.get(created.id).await.unwrap();
    assert_eq!(read, created);
}

async fn create_then_get_preserves_whitespace<S: CustomerService>(service: S) {
    let input = "  Test  ";
    let created = service.create(CustomerPayload::named(input)).await.unwrap();
    assert_eq!(created.name, input);

    let read = service.get(created.id).await.unwrap();
    assert_eq!(read, Customer::new(created.id, input));

    service
        .update(created.id, CustomerPayload::named(" Test2 "))
        .await
        .unwrap();
    assert_eq!(service.get(created.id).await.unwrap().name, " Test2 ");
}

async fn get_unknown_id_is_not_found<S: CustomerService>(service: S) {
    let err = service.get(CustomerId::generate()).await.unwrap_err();
    assert!(err.is_not_found());
}

async fn create_ignores_client_id<S: CustomerService>(service: S) {
    let client_id = CustomerId::generate();
    let created = service
        .create(CustomerPayload::named("Test").with_id(client_id))
        .await
        .unwrap();

    assert_ne!(created.id, client_id);
    assert!(service.get(client_id).await.unwrap_err().is_not_found());
}

async fn create_rejects_malformed_payload<S: CustomerService>(service: S) {
    for payload in [
        CustomerPayload::default(),
        CustomerPayload::named(""),
        CustomerPayload::named("   "),
        CustomerPayload::named("x".repeat(101)),
    ] {
        let err = service.create(payload).await.unwrap_err();
        assert!(err.is_invalid_argument());
    }
    assert_eq!(service.count().await.unwrap(), 0);
}

async fn update_changes_only_name<S: CustomerService>(service: S) {
    let created = service.create(CustomerPayload::named("Test")).await.unwrap();

    // A conflicting id in the body must not move the record
    let body = CustomerPayload::named("Test2").with_id(CustomerId::generate());
    service.update(created.id, body).await.unwrap();

    let read = service.get(created.id).await.unwrap();
    assert_eq!(read.id, created.id);
    assert_eq!(read.name, "Test2");
    assert_eq!(service.count().await.unwrap(), 1);
}

async fn update_unknown_id_leaves_collection_unchanged<S: CustomerService>(service: S) {
    let created = service.create(CustomerPayload::named("Test")).await.unwrap();

    let err = service
        .update(CustomerId::generate(), CustomerPayload::named("Other"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(service.count().await.unwrap(), 1);
    assert_eq!(service.get(created.id).await.unwrap().name, "Test");
}

async fn update_validates_before_lookup<S: CustomerService>(service: S) {
    let err = service
        .update(CustomerId::generate(), CustomerPayload::default())
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

async fn delete_is_idempotent<S: CustomerService>(service: S) {
    let created = service.create(CustomerPayload::named("Test")).await.unwrap();

    service.delete(created.id).await.unwrap();
    assert!(service.get(created.id).await.unwrap_err().is_not_found());

    service.delete(created.id).await.unwrap();
    assert!(service.get(created.id).await.unwrap_err().is_not_found());

    service.delete(CustomerId::generate()).await.unwrap();
    assert_eq!(service.count().await.unwrap(), 0);
}

async fn ids_are_unique<S: CustomerService>(service: S) {
    let mut seen = HashSet::new();
    for i in 0..50 {
        let created = service
            .create(CustomerPayload::named(format!("Customer {}", i)))
            .await
            .unwrap();
        if i % 2 == 0 {
            service.delete(created.id).await.unwrap();
        }
        assert!(seen.insert(created.id), "id {} issued twice", created.id);
    }
    assert_eq!(service.count().await.unwrap(), 25);
}

async fn full_lifecycle<S: CustomerService>(service: S) {
    let created = service.create(CustomerPayload::named("Test")).await.unwrap();
    let id = created.id;
    assert_eq!(created.name, "Test");

    assert_eq!(service.get(id).await.unwrap().name, "Test");

    service
        .update(id, CustomerPayload::named("Test2"))
        .await
        .unwrap();

    let read = service.get(id).await.unwrap();
    assert_eq!(read.id, id);
    assert_eq!(read.name, "Test2");

    service.delete(id).await.unwrap();
    assert!(service.get(id).await.unwrap_err().is_not_found());
}

// ============================================================================
// Backend instantiations
// ============================================================================

macro_rules! contract_tests {
    ($backend:ident, $make:expr) => {
        mod $backend {
            use super::*;

            #[tokio::test]
            async fn test_create_then_get_returns_input_plus_id() {
                create_then_get_returns_input_plus_id($make).await;
            }

            #[tokio::test]
            async fn test_create_then_get_preserves_whitespace() {
                create_then_get_preserves_whitespace($make).await;
            }

            #[tokio::test]
            async fn test_get_unknown_id_is_not_found() {
                get_unknown_id_is_not_found($make).await;
            }

            #[tokio::test]
            async fn test_create_ignores_client_id() {
                create_ignores_client_id($make).await;
            }

            #[tokio::test]
            async fn test_create_rejects_malformed_payload() {
                create_rejects_malformed_payload($make).await;
            }

            #[tokio::test]
            async fn test_update_changes_only_name() {
                update_changes_only_name($make).await;
            }

            #[tokio::test]
            async fn test_update_unknown_id_leaves_collection_unchanged() {
                update_unknown_id_leaves_collection_unchanged($make).await;
            }

            #[tokio::test]
            async fn test_update_validates_before_lookup() {
                update_validates_before_lookup($make).await;
            }

            #[tokio::test]
            async fn test_delete_is_idempotent() {
                delete_is_idempotent($make).await;
            }

            #[tokio::test]
            async fn test_ids_are_unique() {
                ids_are_unique($make).await;
            }

            #[tokio::test]
            async fn test_full_lifecycle() {
                full_lifecycle($make).await;
            }
        }
    };
}

contract_tests!(memory, InMemoryBackend::new());

#[cfg(feature = "sqlite")]
fn create_sqlite_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

#[cfg(feature = "sqlite")]
contract_tests!(sqlite, create_sqlite_backend());

// ============================================================================
// SQLite file persistence
// ============================================================================

/// Customers survive reopening a file-backed database.
#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_sqlite_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("customers.db");

    let id = {
        let backend = SqliteBackend::open(&path).unwrap();
        backend.init_schema().unwrap();
        backend
            .create(CustomerPayload::named("Test"))
            .await
            .unwrap()
            .id
    };

    let reopened = SqliteBackend::open(&path).unwrap();
    reopened.init_schema().unwrap();
    assert_eq!(reopened.get(id).await.unwrap().name, "Test");
}

/// Concurrent writers through a shared Arc all land.
#[tokio::test]
async fn test_concurrent_creates_through_arc() {
    let service = std::sync::Arc::new(InMemoryBackend::new());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create(CustomerPayload::named(format!("Customer {}", i)))
                    .await
                    .unwrap()
                    .id
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }

    assert_eq!(ids.len(), 16);
    assert_eq!(service.count().await.unwrap(), 16);
}
