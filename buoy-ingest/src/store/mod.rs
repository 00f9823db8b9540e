//! Durable key-value stores.
//!
//! Every persistent concern in the crate (response cache, entity archive,
//! export target) goes through [`KeyValueStore`]. Keys are relative
//! `/`-separated paths such as `pages/3fa1….html` or `stations/46086.json`.

use std::future::Future;
use std::sync::Arc;

mod disk;
mod error;
mod memory;

pub use disk::DiskStore;
pub use error::StoreError;
pub use memory::MemoryStore;

/// A byte store keyed by string identity.
///
/// Implementations must tolerate concurrent `get`/`put` from many tasks and
/// must never expose a partially written value to a reader.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>, StoreError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &[u8]) -> impl Future<Output = Result<(), StoreError>> + Send;
}

impl<S: KeyValueStore> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>, StoreError>> + Send {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).put(key, value)
    }
}

/// Check that a key is a relative path without parent references.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|part| part.is_empty() || part == "." || part == "..");

    if invalid {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}
