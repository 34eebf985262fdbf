//! End-to-end customer lifecycle over HTTP against real backends.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use brewery_persistence::backends::memory::InMemoryBackend;
use brewery_persistence::core::CustomerService;
use brewery_persistence::types::CustomerId;
use brewery_rest::docs::{
    CUSTOMER_SNIPPET, DocumentedService, Operation, Outcome, SnippetRecorder,
};
use serde_json::{Value, json};

#[cfg(feature = "sqlite")]
use brewery_persistence::backends::sqlite::SqliteBackend;

use common::harness::{customer_path, test_server};

async fn create_customer(server: &TestServer, name: &str) -> CustomerId {
    let response = server
        .post("/api/v1/customer")
        .json(&json!({"name": name}))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap()
}

/// create(Test), get, update(Test2), get, delete, get -> 404.
async fn run_lifecycle(server: &TestServer) {
    let id = create_customer(server, "Test").await;

    let read = server.get(&customer_path(id)).await;
    read.assert_status_ok();
    assert_eq!(read.json::<Value>()["name"], "Test");

    server
        .put(&customer_path(id))
        .json(&json!({"name": "Test2"}))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let read = server.get(&customer_path(id)).await;
    read.assert_status_ok();
    assert_eq!(
        read.json::<Value>(),
        json!({"id": id.to_string(), "name": "Test2"})
    );

    server.delete(&customer_path(id)).await.assert_status_ok();
    server
        .get(&customer_path(id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Idempotent
    server.delete(&customer_path(id)).await.assert_status_ok();
}

#[tokio::test]
async fn test_lifecycle_memory() {
    let server = test_server(Arc::new(InMemoryBackend::new()));
    run_lifecycle(&server).await;
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_lifecycle_sqlite() {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    let server = test_server(Arc::new(backend));
    run_lifecycle(&server).await;
}

#[tokio::test]
async fn test_update_ignores_body_id() {
    let backend = Arc::new(InMemoryBackend::new());
    let server = test_server(Arc::clone(&backend));
    let id = create_customer(&server, "Test").await;
    let other = CustomerId::generate();

    server
        .put(&customer_path(id))
        .json(&json!({"id": other.to_string(), "name": "Test2"}))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(backend.get(id).await.unwrap().name, "Test2");
    assert!(backend.get(other).await.unwrap_err().is_not_found());
    assert_eq!(backend.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_ids_not_reused_after_delete() {
    let server = test_server(Arc::new(InMemoryBackend::new()));
    let mut seen = HashSet::new();

    for i in 0..10 {
        let id = create_customer(&server, &format!("Customer {}", i)).await;
        server.delete(&customer_path(id)).await.assert_status_ok();
        assert!(seen.insert(id));
    }
}

#[tokio::test]
async fn test_name_is_stored_verbatim() {
    let server = test_server(Arc::new(InMemoryBackend::new()));
    let id = create_customer(&server, "  Test  ").await;

    let read = server.get(&customer_path(id)).await;
    assert_eq!(read.json::<Value>()["name"], "  Test  ");

    server
        .put(&customer_path(id))
        .json(&json!({"name": " Test2\t"}))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let read = server.get(&customer_path(id)).await;
    assert_eq!(read.json::<Value>()["name"], " Test2\t");
}

#[tokio::test]
async fn test_documented_server_writes_snippets() {
    let service = DocumentedService::new(InMemoryBackend::new());
    let recorder = service.recorder().clone();
    let server = test_server(Arc::new(service));

    run_lifecycle(&server).await;

    let snippets = recorder.snippets();
    let operations: Vec<_> = snippets.iter().map(|s| s.operation).collect();
    assert_eq!(
        operations,
        vec![
            Operation::Create,
            Operation::Get,
            Operation::Update,
            Operation::Get,
            Operation::Delete,
            Operation::Get,
            Operation::Delete,
        ]
    );
    assert!(snippets.iter().all(|s| s.is_clean()));
    assert_eq!(snippets[5].outcome, Outcome::NotFound);

    let dir = tempfile::tempdir().unwrap();
    let paths = recorder.write_to(dir.path()).unwrap();
    assert_eq!(paths.len(), 7);

    let snippet_dir = dir.path().join(CUSTOMER_SNIPPET);
    assert!(snippet_dir.join("001-create-customer.json").exists());
    assert!(snippet_dir.join("007-delete-customer.json").exists());

    let create: Value = serde_json::from_str(
        &std::fs::read_to_string(snippet_dir.join("001-create-customer.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(create["method"], "POST");
    assert_eq!(create["path_template"], "/api/v1/customer");
    assert_eq!(create["request"]["name"], "Test");
    assert_eq!(create["response_fields"][1]["description"], "Name of the Customer");
    assert_eq!(create["response_fields"][0]["type"], "STRING");
}

#[tokio::test]
async fn test_documented_server_holds_bounded_snippets() {
    let recorder = SnippetRecorder::with_capacity(4);
    let service = DocumentedService::with_recorder(InMemoryBackend::new(), recorder.clone());
    let server = test_server(Arc::new(service));

    let path = customer_path(create_customer(&server, "Test").await);

    for _ in 0..200 {
        server.get(&path).await.assert_status_ok();
    }

    assert_eq!(recorder.len(), 4);
    assert_eq!(recorder.dropped(), 197);

    let dir = tempfile::tempdir().unwrap();
    let paths = recorder.write_to(dir.path()).unwrap();
    assert_eq!(paths.len(), 4);
    assert!(paths[3].ends_with("v1/customer/201-get-customer.json"));
    assert!(recorder.is_empty());
}
