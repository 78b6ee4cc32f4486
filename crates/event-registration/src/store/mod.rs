//! Durable storage for validated registrations.

mod memory;
mod surreal;

pub use memory::{MemoryStore, StoredRegistration};
pub use surreal::SurrealStore;

use crate::error::StoreError;
use crate::registration::{Identity, Registration};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Table (or collection) that holds registration documents.
pub const REGISTRATION_TABLE: &str = "registration";

/// Persistence for registrations.
///
/// Implementations write each registration as a single document and assign it a
/// fresh identity. They never retry; retry policy belongs to the caller.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Persist a registration and return its new identity.
    async fn create(&self, registration: Registration) -> Result<Identity, StoreError>;

    /// Whether the backing storage is currently reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}

/// Store handle shared by all request handlers.
pub type SharedStore = Arc<dyn RegistrationStore>;

/// Wait at most `limit` for a store write to be acknowledged.
///
/// Elapsing maps to [`StoreError::Timeout`]. The write future is dropped, which
/// does not undo anything the backend has already applied.
pub async fn with_write_timeout<T, F>(limit: Duration, write: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(limit, write)
        .await
        .map_err(|_| StoreError::Timeout(limit))?
}
