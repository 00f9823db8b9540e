//! Response cache for fetched pages.
//!
//! Bodies are memoised by [`Signature`] in any [`KeyValueStore`]. There is no
//! invalidation here: the cache is an append-only memo, and pruning belongs
//! to whoever owns the backing store.

mod signature;

use tracing::{debug, warn};

use crate::store::KeyValueStore;

pub use signature::Signature;

/// Signature-addressed cache of response bodies.
#[derive(Debug, Clone)]
pub struct ResponseCache<S> {
    store: S,
}

impl<S: KeyValueStore> ResponseCache<S> {
    /// Create a cache over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Look up a cached body.
    ///
    /// Only an entry stored under exactly this signature is returned. A store
    /// read failure or a non-UTF-8 entry is reported as a miss.
    pub async fn get(&self, signature: &Signature) -> Option<String> {
        match self.store.get(&signature.cache_key()).await {
            Ok(Some(bytes)) => match String::from_utf8(bytes) {
                Ok(body) => {
                    debug!(%signature, "cache hit");
                    Some(body)
                }
                Err(e) => {
                    warn!(%signature, error = %e, "cached body is not UTF-8, ignoring");
                    None
                }
            },
            Ok(None) => {
                debug!(%signature, "cache miss");
                None
            }
            Err(e) => {
                warn!(%signature, error = %e, "cache read failed");
                None
            }
        }
    }

    /// Store a body. Returns `false` if the write failed.
    ///
    /// Failure only means this entry is not cached; callers carry on.
    pub async fn put(&self, signature: &Signature, body: &str) -> bool {
        match self.store.put(&signature.cache_key(), body.as_bytes()).await {
            Ok(()) => true,
            Err(e) => {
                warn!(%signature, error = %e, "cache write failed");
                false
            }
        }
    }
}
