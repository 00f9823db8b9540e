//! In-process store backed by a moka cache.

use std::sync::Arc;

use moka::future::Cache as MokaCache;

use super::{KeyValueStore, StoreError, validate_key};

/// In-memory key-value store.
///
/// Built without TTL or capacity bound: entries live as long as the store.
/// Values are shared as `Arc<[u8]>`, so a reader always sees a whole value.
#[derive(Clone)]
pub struct MemoryStore {
    entries: MokaCache<String, Arc<[u8]>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: MokaCache::builder().build(),
        }
    }

    /// Number of stored entries (for monitoring).
    pub async fn len(&self) -> u64 {
        // moka counts lazily; flush pending bookkeeping first
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    /// Check whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// List stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|(k, _)| (*k).clone()).collect();
        keys.sort();
        keys
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        validate_key(key)?;
        Ok(self.entries.get(key).await.map(|v| v.to_vec()))
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries.insert(key.to_string(), Arc::from(value)).await;
        Ok(())
    }
}
