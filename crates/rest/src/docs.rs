//! API documentation recording.
//!
//! [`DocumentedService`] wraps any [`CustomerService`] and records one
//! [`Snippet`] per call: the operation, its path template and concrete path,
//! the documented fields and parameters, the request and response bodies, and
//! the outcome. Recording never changes what the wrapped service returns.
//!
//! Snippets wait in a bounded [`SnippetRecorder`] until they are flushed to
//! disk with [`SnippetRecorder::write_to`].
//!
//! Payloads are checked against the field descriptors as they are recorded.
//! A missing, undocumented or mistyped field is logged and stored on the
//! snippet as a problem.
//!
//! # Example
//!
//! ```rust
//! use brewery_persistence::backends::memory::InMemoryBackend;
//! use brewery_persistence::core::CustomerService;
//! use brewery_persistence::types::CustomerPayload;
//! use brewery_rest::docs::DocumentedService;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let service = DocumentedService::new(InMemoryBackend::new());
//! let created = service.create(CustomerPayload::named("Test")).await.unwrap();
//! service.get(created.id).await.unwrap();
//!
//! assert_eq!(service.recorder().len(), 2);
//! # });
//! ```

#![allow(missing_docs)]

use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use brewery_persistence::core::CustomerService;
use brewery_persistence::error::{StorageError, StorageResult};
use brewery_persistence::types::{Customer, CustomerId, CustomerPayload};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::routing::CUSTOMER_BASE_PATH;

/// Snippet identifier for customer operations.
pub const CUSTOMER_SNIPPET: &str = "v1/customer";

/// JSON type of a documented field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Null,
}

impl FieldType {
    /// Returns the type of a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => FieldType::String,
            Value::Number(_) => FieldType::Number,
            Value::Bool(_) => FieldType::Boolean,
            Value::Object(_) => FieldType::Object,
            Value::Array(_) => FieldType::Array,
            Value::Null => FieldType::Null,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldType::String => "STRING",
            FieldType::Number => "NUMBER",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Object => "OBJECT",
            FieldType::Array => "ARRAY",
            FieldType::Null => "NULL",
        };
        f.write_str(s)
    }
}

/// Describes one field of a request or response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub path: String,
    pub description: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub optional: bool,
}

impl FieldDescriptor {
    /// Creates a required field descriptor.
    pub fn new(
        path: impl Into<String>,
        field_type: FieldType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
            field_type,
            optional: false,
        }
    }

    /// Marks the field as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Describes one path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub description: String,
}

/// Fields of a customer as returned by the API.
pub fn customer_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("id", FieldType::String, "Id of the Customer"),
        FieldDescriptor::new("name", FieldType::String, "Name of the Customer"),
    ]
}

/// Fields of a customer as accepted by create and update.
///
/// The id is accepted but ignored, so it is optional.
pub fn customer_request_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("id", FieldType::String, "Id of the Customer").optional(),
        FieldDescriptor::new("name", FieldType::String, "Name of the Customer"),
    ]
}

/// The `customerId` path parameter.
pub fn customer_id_parameter() -> ParameterDescriptor {
    ParameterDescriptor {
        name: "customerId".to_string(),
        description: "Id of the Customer".to_string(),
    }
}

/// A documented customer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// HTTP method of the operation.
    pub fn method(&self) -> &'static str {
        match self {
            Operation::Get => "GET",
            Operation::Create => "POST",
            Operation::Update => "PUT",
            Operation::Delete => "DELETE",
        }
    }

    /// Path template of the operation.
    pub fn path_template(&self) -> String {
        match self {
            Operation::Create => CUSTOMER_BASE_PATH.to_string(),
            _ => format!("{}/{{customerId}}", CUSTOMER_BASE_PATH),
        }
    }

    /// File name stem used when writing snippets.
    pub fn file_name(&self) -> &'static str {
        match self {
            Operation::Get => "get-customer",
            Operation::Create => "create-customer",
            Operation::Update => "update-customer",
            Operation::Delete => "delete-customer",
        }
    }

    /// Path parameters of the operation.
    pub fn path_parameters(&self) -> Vec<ParameterDescriptor> {
        match self {
            Operation::Create => Vec::new(),
            _ => vec![customer_id_parameter()],
        }
    }

    /// Documented request body fields.
    pub fn request_fields(&self) -> Vec<FieldDescriptor> {
        match self {
            Operation::Create | Operation::Update => customer_request_fields(),
            Operation::Get | Operation::Delete => Vec::new(),
        }
    }

    /// Documented response body fields.
    pub fn response_fields(&self) -> Vec<FieldDescriptor> {
        match self {
            Operation::Get | Operation::Create => customer_fields(),
            Operation::Update | Operation::Delete => Vec::new(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// How a recorded call ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success,
    NotFound,
    InvalidArgument { message: String },
    Failed { message: String },
}

impl From<&StorageError> for Outcome {
    fn from(err: &StorageError) -> Self {
        match err {
            StorageError::NotFound { .. } => Outcome::NotFound,
            StorageError::InvalidArgument(e) => Outcome::InvalidArgument {
                message: e.to_string(),
            },
            StorageError::Backend(e) => Outcome::Failed {
                message: e.to_string(),
            },
        }
    }
}

/// One recorded documentation example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub identifier: String,
    pub operation: Operation,
    pub method: String,
    pub path_template: String,
    pub path: String,
    pub path_parameters: Vec<ParameterDescriptor>,
    pub request_fields: Vec<FieldDescriptor>,
    pub response_fields: Vec<FieldDescriptor>,
    pub request: Option<Value>,
    pub response: Option<Value>,
    pub outcome: Outcome,
    #[serde(default)]
    pub problems: Vec<String>,
    pub recorded_at: DateTime<Utc>,
}

impl Snippet {
    /// Returns true if the recorded payloads matched their descriptors.
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Errors raised while checking or writing snippets.
#[derive(Debug, Error)]
pub enum DocsError {
    #[error("documented field '{path}' is missing from the payload")]
    MissingField { path: String },

    #[error("field '{path}' is not documented")]
    UndocumentedField { path: String },

    #[error("field '{path}' is documented as {expected} but was {actual}")]
    WrongType {
        path: String,
        expected: FieldType,
        actual: FieldType,
    },

    #[error("payload is {actual}, expected an OBJECT")]
    NotAnObject { actual: FieldType },

    #[error("failed to serialize snippet: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to write snippet to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Checks a JSON body against field descriptors.
///
/// Returns every mismatch found. A `null` optional field counts as absent.
pub fn check_fields(descriptors: &[FieldDescriptor], body: &Value) -> Vec<DocsError> {
    let Some(object) = body.as_object() else {
        return vec![DocsError::NotAnObject {
            actual: FieldType::of(body),
        }];
    };

    let mut problems = Vec::new();

    for descriptor in descriptors {
        match object.get(&descriptor.path) {
            None | Some(Value::Null) if descriptor.optional => {}
            None => problems.push(DocsError::MissingField {
                path: descriptor.path.clone(),
            }),
            Some(value) => {
                let actual = FieldType::of(value);
                if actual != descriptor.field_type {
                    problems.push(DocsError::WrongType {
                        path: descriptor.path.clone(),
                        expected: descriptor.field_type,
                        actual,
                    });
                }
            }
        }
    }

    for key in object.keys() {
        if !descriptors.iter().any(|d| &d.path == key) {
            problems.push(DocsError::UndocumentedField { path: key.clone() });
        }
    }

    problems
}

/// Number of snippets a recorder holds before dropping the oldest.
pub const DEFAULT_SNIPPET_CAPACITY: usize = 1000;

#[derive(Debug)]
struct RecorderState {
    /// Pending snippets with their sequence numbers, oldest first.
    pending: VecDeque<(usize, Snippet)>,
    capacity: usize,
    next_sequence: usize,
    dropped: u64,
}

impl RecorderState {
    fn evict_overflow(&mut self) {
        while self.pending.len() > self.capacity {
            self.pending.pop_front();
            self.dropped += 1;
        }
    }
}

/// Shared, thread-safe, bounded queue of recorded snippets.
///
/// Every snippet gets a sequence number when it is recorded. Once
/// `capacity` snippets are pending the oldest one is dropped. [`write_to`]
/// drains the queue, so numbering carries on across flushes.
///
/// [`write_to`]: SnippetRecorder::write_to
#[derive(Debug, Clone)]
pub struct SnippetRecorder {
    state: Arc<Mutex<RecorderState>>,
}

impl Default for SnippetRecorder {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SNIPPET_CAPACITY)
    }
}

impl SnippetRecorder {
    /// Creates an empty recorder with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty recorder holding at most `capacity` snippets.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Arc::new(Mutex::new(RecorderState {
                pending: VecDeque::with_capacity(capacity.min(64)),
                capacity,
                next_sequence: 1,
                dropped: 0,
            })),
        }
    }

    /// Appends a snippet, dropping the oldest pending one when full.
    pub fn record(&self, snippet: Snippet) {
        let mut state = self.state.lock();
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.pending.push_back((sequence, snippet));

        if state.pending.len() > state.capacity {
            state.evict_overflow();
            debug!(dropped = state.dropped, "Snippet recorder full, dropped oldest snippet");
        }
    }

    /// Returns a copy of every pending snippet, in recording order.
    pub fn snippets(&self) -> Vec<Snippet> {
        self.state
            .lock()
            .pending
            .iter()
            .map(|(_, snippet)| snippet.clone())
            .collect()
    }

    /// Number of pending snippets.
    pub fn len(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.state.lock().pending.is_empty()
    }

    /// Maximum number of pending snippets.
    pub fn capacity(&self) -> usize {
        self.state.lock().capacity
    }

    /// Number of snippets dropped because the recorder was full.
    pub fn dropped(&self) -> u64 {
        self.state.lock().dropped
    }

    /// Drops every pending snippet.
    pub fn clear(&self) {
        self.state.lock().pending.clear();
    }

    /// Drains the pending snippets and writes each as pretty JSON to
    /// `<dir>/<identifier>/<nnn>-<operation>.json`, returning the paths.
    ///
    /// `nnn` is the sequence number given at recording time. On failure the
    /// snippets not yet written are put back at the front of the queue.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, DocsError> {
        let dir = dir.as_ref();
        let mut pending = std::mem::take(&mut self.state.lock().pending);
        let mut written = Vec::with_capacity(pending.len());

        while let Some((sequence, snippet)) = pending.pop_front() {
            match write_snippet(dir, sequence, &snippet) {
                Ok(path) => written.push(path),
                Err(e) => {
                    pending.push_front((sequence, snippet));
                    self.requeue(pending);
                    return Err(e);
                }
            }
        }

        debug!(count = written.len(), dir = %dir.display(), "Wrote documentation snippets");
        Ok(written)
    }

    fn requeue(&self, mut unwritten: VecDeque<(usize, Snippet)>) {
        let mut state = self.state.lock();
        unwritten.append(&mut state.pending);
        state.pending = unwritten;
        state.evict_overflow();
    }
}

fn write_snippet(dir: &Path, sequence: usize, snippet: &Snippet) -> Result<PathBuf, DocsError> {
    let target_dir = dir.join(&snippet.identifier);
    std::fs::create_dir_all(&target_dir).map_err(|source| DocsError::Io {
        path: target_dir.clone(),
        source,
    })?;

    let path = target_dir.join(format!(
        "{:03}-{}.json",
        sequence,
        snippet.operation.file_name()
    ));
    let json = serde_json::to_string_pretty(snippet)?;
    std::fs::write(&path, json).map_err(|source| DocsError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// A [`CustomerService`] that records a [`Snippet`] for every CRUD call.
pub struct DocumentedService<S> {
    inner: S,
    recorder: SnippetRecorder,
}

impl<S: CustomerService> DocumentedService<S> {
    /// Wraps a service with a fresh recorder.
    pub fn new(inner: S) -> Self {
        Self::with_recorder(inner, SnippetRecorder::new())
    }

    /// Wraps a service, recording into an existing recorder.
    pub fn with_recorder(inner: S, recorder: SnippetRecorder) -> Self {
        Self { inner, recorder }
    }

    /// Returns the recorder.
    pub fn recorder(&self) -> &SnippetRecorder {
        &self.recorder
    }

    /// Returns the wrapped service.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn record(
        &self,
        operation: Operation,
        id: Option<CustomerId>,
        request: Option<&CustomerPayload>,
        response: Option<&Customer>,
        outcome: Outcome,
    ) {
        let path = match id {
            Some(id) => format!("{}/{}", CUSTOMER_BASE_PATH, id),
            None => CUSTOMER_BASE_PATH.to_string(),
        };

        let mut problems = Vec::new();
        let request_fields = operation.request_fields();
        let response_fields = operation.response_fields();

        let request = request.and_then(|payload| {
            to_documented_value(payload, &request_fields, &mut problems)
        });
        let response = response.and_then(|customer| {
            to_documented_value(customer, &response_fields, &mut problems)
        });

        let problems: Vec<String> = problems.iter().map(ToString::to_string).collect();
        for problem in &problems {
            warn!(operation = %operation, path = %path, problem = %problem, "Documentation mismatch");
        }

        self.recorder.record(Snippet {
            identifier: CUSTOMER_SNIPPET.to_string(),
            operation,
            method: operation.method().to_string(),
            path_template: operation.path_template(),
            path,
            path_parameters: operation.path_parameters(),
            request_fields,
            response_fields,
            request,
            response,
            outcome,
            problems,
            recorded_at: Utc::now(),
        });
    }
}

/// Serializes a body and checks it against its descriptors.
fn to_documented_value<T: Serialize>(
    body: &T,
    descriptors: &[FieldDescriptor],
    problems: &mut Vec<DocsError>,
) -> Option<Value> {
    match serde_json::to_value(body) {
        Ok(value) => {
            problems.extend(check_fields(descriptors, &value));
            Some(value)
        }
        Err(e) => {
            problems.push(DocsError::Serialization(e));
            None
        }
    }
}

fn outcome_of<T>(result: &StorageResult<T>) -> Outcome {
    match result {
        Ok(_) => Outcome::Success,
        Err(e) => Outcome::from(e),
    }
}

#[async_trait]
impl<S: CustomerService> CustomerService for DocumentedService<S> {
    fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }

    async fn get(&self, id: CustomerId) -> StorageResult<Customer> {
        let result = self.inner.get(id).await;
        self.record(
            Operation::Get,
            Some(id),
            None,
            result.as_ref().ok(),
            outcome_of(&result),
        );
        result
    }

    async fn create(&self, payload: CustomerPayload) -> StorageResult<Customer> {
        let request = payload.clone();
        let result = self.inner.create(payload).await;
        self.record(
            Operation::Create,
            None,
            Some(&request),
            result.as_ref().ok(),
            outcome_of(&result),
        );
        result
    }

    async fn update(&self, id: CustomerId, payload: CustomerPayload) -> StorageResult<()> {
        let request = payload.clone();
        let result = self.inner.update(id, payload).await;
        self.record(
            Operation::Update,
            Some(id),
            Some(&request),
            None,
            outcome_of(&result),
        );
        result
    }

    async fn delete(&self, id: CustomerId) -> StorageResult<()> {
        let result = self.inner.delete(id).await;
        self.record(Operation::Delete, Some(id), None, None, outcome_of(&result));
        result
    }

    async fn count(&self) -> StorageResult<u64> {
        self.inner.count().await
    }
}
