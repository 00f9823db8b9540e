//! Store error types.

/// Errors from a key-value store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key is empty, absolute, or escapes the store root
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
}
