//! Cache gateway — typed load/save/remove for form records.
//!
//! Thin wrapper over one storage partition, translating between
//! [`FormRecord`] and the engine's JSON values. Absence is `None`, never an
//! error; everything else propagates to the caller.

use std::sync::Arc;

use crate::record::FormRecord;
use crate::store::{CACHE_DATABASE, CACHE_PARTITION, KeyValueBackend, KeyValuePartition, StoreError};

// =============================================================================
// ERROR
// =============================================================================

/// Failures crossing the gateway.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The storage engine failed.
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),

    /// A stored value did not decode as a form record.
    #[error("cached record decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// A record did not encode to a JSON value.
    #[error("record encode failed: {0}")]
    Encode(#[source] serde_json::Error),
}

// =============================================================================
// GATEWAY
// =============================================================================

/// Record-typed view of the fixed cache partition. Cloning shares the
/// partition handle.
#[derive(Clone)]
pub struct CacheGateway {
    partition: Arc<dyn KeyValuePartition>,
}

impl CacheGateway {
    /// Open the gateway over the fixed [`CACHE_DATABASE`] /
    /// [`CACHE_PARTITION`] names.
    #[must_use]
    pub fn open(backend: &dyn KeyValueBackend) -> Self {
        Self { partition: backend.open_partition(CACHE_DATABASE, CACHE_PARTITION) }
    }

    /// Load the record stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`CacheError`] on storage failure or a malformed stored
    /// value. A missing record is `Ok(None)`.
    pub async fn load(&self, key: &str) -> Result<Option<FormRecord>, CacheError> {
        let Some(value) = self.partition.get(key).await? else {
            return Ok(None);
        };
        let record = serde_json::from_value(value).map_err(CacheError::Decode)?;
        Ok(Some(record))
    }

    /// Upsert the record under `key`, overwriting any prior one.
    ///
    /// # Errors
    ///
    /// Returns a [`CacheError`] on storage failure or an unencodable record.
    pub async fn save(&self, key: &str, record: &FormRecord) -> Result<(), CacheError> {
        let value = serde_json::to_value(record).map_err(CacheError::Encode)?;
        self.partition.set(key, value).await?;
        Ok(())
    }

    /// Delete the record under `key`. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`CacheError`] only on genuine storage failures.
    pub async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.partition.delete(key).await?;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
