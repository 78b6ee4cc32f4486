//! In-memory registration store.

use super::RegistrationStore;
use crate::error::StoreError;
use crate::registration::{Identity, Registration};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// A registration as held by [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct StoredRegistration {
    pub id: Identity,
    pub registration: Registration,
    pub created_at: DateTime<Utc>,
}

/// Registration store kept in process memory.
///
/// Nothing survives a restart. Useful for tests and local runs; it can also be
/// switched into an unavailable mode to exercise storage failures.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<Identity, StoredRegistration>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Create an empty, available store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose writes always fail.
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.set_available(false);
        store
    }

    /// Toggle whether writes succeed.
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Look up a stored registration.
    pub async fn get(&self, id: &Identity) -> Option<StoredRegistration> {
        self.records.read().await.get(id).cloned()
    }

    /// All stored registrations, oldest first.
    pub async fn list(&self) -> Vec<StoredRegistration> {
        let mut records: Vec<_> = self.records.read().await.values().cloned().collect();
        records.sort_by_key(|r| r.created_at);
        records
    }

    /// Number of stored registrations.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn create(&self, registration: Registration) -> Result<Identity, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "memory store is marked unavailable".into(),
            ));
        }

        let id = Identity::new(Uuid::new_v4().to_string());
        let record = StoredRegistration {
            id: id.clone(),
            registration,
            created_at: Utc::now(),
        };

        let mut records = self.records.write().await;
        records.insert(id.clone(), record);
        debug!(%id, total = records.len(), "Memory store: registration inserted");

        Ok(id)
    }

    async fn health_check(&self) -> bool {
        !self.unavailable.load(Ordering::SeqCst)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
