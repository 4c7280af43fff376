//! Backing vector index trait.
//!
//! Defines the interface the long-term store expects from its backing
//! index: collection lifecycle, insertion, nearest-neighbor search, and
//! full enumeration. The bundled brute-force implementation lives in
//! membot-infra; any index honoring the ranking contract (ascending
//! distance, insertion order on ties) can be substituted.

use membot_types::error::IndexError;
use membot_types::memory::{MemoryRecord, ScoredRecord};

/// Trait for vector-indexed record storage with nearest-neighbor search.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in membot-infra.
pub trait VectorIndex: Send + Sync {
    /// (Re)create the collection. With `reset` true any prior contents are
    /// discarded; with `reset` false an existing collection is kept as-is.
    fn create_collection(
        &self,
        reset: bool,
    ) -> impl std::future::Future<Output = Result<(), IndexError>> + Send;

    /// Insert a record. Each insert is individually atomic; no ordering
    /// guarantee relative to concurrent inserts.
    fn insert(
        &self,
        record: MemoryRecord,
    ) -> impl std::future::Future<Output = Result<(), IndexError>> + Send;

    /// Return up to `top_k` records nearest to `embedding` by cosine
    /// distance, ascending, ties broken by earlier insertion first.
    fn search(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> impl std::future::Future<Output = Result<Vec<ScoredRecord>, IndexError>> + Send;

    /// Number of records in the collection.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, IndexError>> + Send;

    /// Full enumeration in insertion order.
    fn all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<MemoryRecord>, IndexError>> + Send;

    /// Atomically empty the collection.
    fn clear(&self) -> impl std::future::Future<Output = Result<(), IndexError>> + Send;
}
