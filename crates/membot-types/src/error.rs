use thiserror::Error;

/// Errors from the backing vector index (used by the `VectorIndex` trait
/// definition in membot-core).
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("collection not initialized")]
    NotInitialized,

    #[error("backing index unavailable: {0}")]
    Unavailable(String),

    #[error("index operation failed: {0}")]
    Backend(String),
}

/// Errors surfaced by the long-term store.
///
/// `Unavailable` is fatal to store operations until the store is
/// reinitialized; `Write` and `Read` are recoverable and the caller decides
/// whether to retry, degrade, or propagate.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store write failed: {0}")]
    Write(String),

    #[error("store read failed: {0}")]
    Read(String),
}
