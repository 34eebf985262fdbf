//! Customer service trait.
//!
//! This module defines the [`CustomerService`] trait, which provides the CRUD
//! operations over the customer collection.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{Customer, CustomerId, CustomerPayload};

/// Sole authority over customer existence and state.
///
/// Every operation is a single atomic step over the collection: it either
/// fully applies or has no effect. Implementations must serialize writers and
/// may let readers run concurrently.
///
/// # Example
///
/// ```
/// use brewery_persistence::backends::memory::InMemoryBackend;
/// use brewery_persistence::core::CustomerService;
/// use brewery_persistence::types::CustomerPayload;
///
/// # tokio_test_runtime(async {
/// let service = InMemoryBackend::new();
///
/// let created = service.create(CustomerPayload::named("Test")).await?;
/// assert_eq!(service.get(created.id).await?.name, "Test");
///
/// service.update(created.id, CustomerPayload::named("Test2")).await?;
/// assert_eq!(service.get(created.id).await?.name, "Test2");
///
/// service.delete(created.id).await?;
/// assert!(service.get(created.id).await.is_err());
/// # Ok::<(), brewery_persistence::StorageError>(())
/// # }).unwrap();
/// # fn tokio_test_runtime<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Returns a human-readable name for this backend.
    fn backend_name(&self) -> &'static str;

    /// Reads a customer by id.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound` - If no live customer has this id
    async fn get(&self, id: CustomerId) -> StorageResult<Customer>;

    /// Creates a customer.
    ///
    /// A fresh id is always generated; any id in the payload is ignored.
    ///
    /// # Errors
    ///
    /// * `StorageError::InvalidArgument` - If the payload fails validation
    async fn create(&self, payload: CustomerPayload) -> StorageResult<Customer>;

    /// Replaces the name of an existing customer.
    ///
    /// The payload is validated before the lookup, so a malformed payload for
    /// a missing id reports `InvalidArgument`.
    ///
    /// # Errors
    ///
    /// * `StorageError::InvalidArgument` - If the payload fails validation
    /// * `StorageError::NotFound` - If no live customer has this id
    async fn update(&self, id: CustomerId, payload: CustomerPayload) -> StorageResult<()>;

    /// Removes a customer if present.
    ///
    /// Succeeds whether or not the customer existed.
    async fn delete(&self, id: CustomerId) -> StorageResult<()>;

    /// Returns the number of live customers.
    async fn count(&self) -> StorageResult<u64>;
}

#[async_trait]
impl<S> CustomerService for Arc<S>
where
    S: CustomerService + ?Sized,
{
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    async fn get(&self, id: CustomerId) -> StorageResult<Customer> {
        (**self).get(id).await
    }

    async fn create(&self, payload: CustomerPayload) -> StorageResult<Customer> {
        (**self).create(payload).await
    }

    async fn update(&self, id: CustomerId, payload: CustomerPayload) -> StorageResult<()> {
        (**self).update(id, payload).await
    }

    async fn delete(&self, id: CustomerId) -> StorageResult<()> {
        (**self).delete(id).await
    }

    async fn count(&self) -> StorageResult<u64> {
        (**self).count().await
    }
}
