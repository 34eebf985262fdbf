//! Recording test double for `CustomerService`.

use async_trait::async_trait;
use brewery_persistence::core::CustomerService;
use brewery_persistence::error::{BackendError, StorageError, StorageResult};
use brewery_persistence::types::{Customer, CustomerId, CustomerPayload};
use parking_lot::Mutex;

/// A call received by the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(CustomerId),
    Create(CustomerPayload),
    Update(CustomerId, CustomerPayload),
    Delete(CustomerId),
}

/// Test double that answers from a single canned customer.
///
/// - `get` returns the canned customer when the id matches, else `NotFound`.
/// - `create` validates the payload and returns `next_id` with the name.
/// - `update` validates, then fails with `NotFound` unless the id matches.
/// - `delete` always succeeds.
pub struct MockCustomerService {
    pub canned: Option<Customer>,
    pub next_id: CustomerId,
    pub backend_down: bool,
    calls: Mutex<Vec<Call>>,
}

impl MockCustomerService {
    pub fn new() -> Self {
        Self {
            canned: None,
            next_id: CustomerId::generate(),
            backend_down: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A mock whose `get` returns the given customer.
    pub fn returning(customer: Customer) -> Self {
        Self {
            canned: Some(customer),
            ..Self::new()
        }
    }

    /// A mock whose storage is unreachable.
    pub fn unavailable() -> Self {
        Self {
            backend_down: true,
            ..Self::new()
        }
    }

    /// Every call received, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn is_canned(&self, id: CustomerId) -> bool {
        self.canned.as_ref().is_some_and(|c| c.id == id)
    }

    fn check_backend(&self) -> StorageResult<()> {
        if self.backend_down {
            return Err(BackendError::ConnectionFailed {
                backend_name: "mock".to_string(),
                message: "connection refused".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerService for MockCustomerService {
    fn backend_name(&self) -> &'static str {
        "mock"
    }

    async fn get(&self, id: CustomerId) -> StorageResult<Customer> {
        self.calls.lock().push(Call::Get(id));
        self.check_backend()?;
        match &self.canned {
            Some(customer) if customer.id == id => Ok(customer.clone()),
            _ => Err(StorageError::NotFound { id }),
        }
    }

    async fn create(&self, payload: CustomerPayload) -> StorageResult<Customer> {
        self.calls.lock().push(Call::Create(payload.clone()));
        self.check_backend()?;
        let name = payload.validated_name()?;
        Ok(Customer::new(self.next_id, name))
    }

    async fn update(&self, id: CustomerId, payload: CustomerPayload) -> StorageResult<()> {
        self.calls.lock().push(Call::Update(id, payload.clone()));
        self.check_backend()?;
        payload.validated_name()?;
        if self.is_canned(id) {
            Ok(())
        } else {
            Err(StorageError::NotFound { id })
        }
    }

    async fn delete(&self, id: CustomerId) -> StorageResult<()> {
        self.calls.lock().push(Call::Delete(id));
        self.check_backend()
    }

    async fn count(&self) -> StorageResult<u64> {
        self.check_backend()?;
        Ok(u64::from(self.canned.is_some()))
    }
}
