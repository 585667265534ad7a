//! Storage contract — the black-box key-value engine behind the cache.
//!
//! DESIGN
//! ======
//! The engine is an external collaborator: an async string-keyed map of JSON
//! values, scoped to a named partition within a named database. The library
//! only ever opens the one fixed partition ([`CACHE_DATABASE`] /
//! [`CACHE_PARTITION`]) and relies on the engine's own consistency
//! guarantees for concurrent key-scoped operations.
//!
//! `MemoryBackend` is the bundled process-local implementation, for hosts
//! without a persistent engine and for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

/// Database name the cache partition lives in.
pub const CACHE_DATABASE: &str = "fs-db";

/// Partition name for form records.
pub const CACHE_PARTITION: &str = "formstore";

// =============================================================================
// ERROR
// =============================================================================

/// Genuine storage failures. Absent keys are never an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The engine failed mid-operation (I/O error, corruption).
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// The engine refused a write for capacity reasons.
    #[error("storage quota exceeded: {0}")]
    QuotaExceeded(String),
}

// =============================================================================
// TRAITS
// =============================================================================

/// A key-value engine able to open named partitions.
pub trait KeyValueBackend: Send + Sync {
    /// Open a partition, creating it if the engine supports that. Repeated
    /// calls with the same names address the same data.
    fn open_partition(&self, database: &str, partition: &str) -> Arc<dyn KeyValuePartition>;
}

/// One partition: an async map from string keys to JSON values.
#[async_trait]
pub trait KeyValuePartition: Send + Sync {
    /// Read a value. Absent keys are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] only on genuine storage failures.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Upsert a value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on storage failure or exhausted quota.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Delete a key. Deleting an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] only on genuine storage failures.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

// =============================================================================
// MEMORY BACKEND
// =============================================================================

/// Process-local reference backend. Partitions are plain locked maps; all
/// handles opened for the same database/partition pair share data.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    partitions: Arc<Mutex<HashMap<(String, String), Arc<MemoryPartition>>>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn open_partition(&self, database: &str, partition: &str) -> Arc<dyn KeyValuePartition> {
        let mut partitions = self
            .partitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let handle = partitions
            .entry((database.to_owned(), partition.to_owned()))
            .or_default();
        Arc::clone(handle) as Arc<dyn KeyValuePartition>
    }
}

#[derive(Default)]
struct MemoryPartition {
    entries: Mutex<HashMap<String, Value>>,
}

#[async_trait]
impl KeyValuePartition for MemoryPartition {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
