//! Long-term semantic memory store.
//!
//! Composes an [`Embedder`] with a backing [`VectorIndex`]: text goes in,
//! gets embedded and persisted with a fresh id, and similarity queries come
//! back ranked by cosine similarity. Records are add-only until an explicit
//! clear.

use chrono::Utc;
use uuid::Uuid;

use membot_types::error::{IndexError, StoreError};
use membot_types::memory::{MemoryMetadata, MemoryRecord, MetadataValue, RetrievedMemory};

use super::embedder::Embedder;
use super::index::VectorIndex;

/// Long-term memory store over a backing vector index.
///
/// Similarity search is approximate by construction (hashed embeddings are
/// lossy): the contract is a ranking consistent with feature overlap
/// between query and stored text, not retrieval of the single true best
/// match.
pub struct LongTermStore<I, E> {
    index: I,
    embedder: E,
}

impl<I: VectorIndex, E: Embedder> LongTermStore<I, E> {
    pub fn new(index: I, embedder: E) -> Self {
        Self { index, embedder }
    }

    /// (Re)create the underlying collection.
    ///
    /// With `reset` true any prior contents are discarded. Fails with
    /// [`StoreError::Unavailable`], which is fatal to dependent operations
    /// until initialization is retried.
    pub async fn initialize(&self, reset: bool) -> Result<(), StoreError> {
        self.index
            .create_collection(reset)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    /// Embed `text`, mint a fresh id, and persist the record.
    ///
    /// `created_at` is injected into the metadata so it travels with the
    /// record into any backing index. Returns the new id.
    pub async fn add(
        &self,
        text: &str,
        mut metadata: MemoryMetadata,
    ) -> Result<String, StoreError> {
        let embedding = self.embedder.embed(text);
        let id = format!("mem_{}", Uuid::now_v7().simple());
        let created_at = Utc::now();
        metadata.insert(
            "created_at".to_string(),
            MetadataValue::Str(created_at.to_rfc3339()),
        );

        let record = MemoryRecord {
            id: id.clone(),
            text: text.to_string(),
            embedding,
            metadata,
            created_at,
        };

        self.index
            .insert(record)
            .await
            .map_err(|e| map_recoverable(e, StoreError::Write))?;

        tracing::debug!(id = %id, "persisted long-term memory");
        Ok(id)
    }

    /// Return the `top_k` stored records most similar to `text`, ordered by
    /// descending similarity (`1 - cosine distance`), ties broken by
    /// earlier insertion.
    ///
    /// An empty store (or `top_k == 0`) yields an empty vec, never an
    /// error.
    pub async fn query(
        &self,
        text: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedMemory>, StoreError> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let embedding = self.embedder.embed(text);
        let hits = self
            .index
            .search(&embedding, top_k)
            .await
            .map_err(|e| map_recoverable(e, StoreError::Read))?;

        Ok(hits
            .into_iter()
            .map(|hit| RetrievedMemory {
                text: hit.record.text,
                similarity: 1.0 - hit.distance,
                metadata: hit.record.metadata,
            })
            .collect())
    }

    /// Number of records stored. Returns 0 on failure rather than
    /// propagating (non-critical diagnostic).
    pub async fn count(&self) -> u64 {
        match self.index.count().await {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(error = %err, "memory count unavailable, reporting 0");
                0
            }
        }
    }

    /// Full enumeration in insertion order, for inspection.
    pub async fn all(&self) -> Result<Vec<MemoryRecord>, StoreError> {
        self.index
            .all()
            .await
            .map_err(|e| map_recoverable(e, StoreError::Read))
    }

    /// Atomically empty the collection.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.index
            .clear()
            .await
            .map_err(|e| map_recoverable(e, StoreError::Write))
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }
}

/// Availability failures stay `Unavailable`; backend failures become the
/// operation-specific recoverable variant.
fn map_recoverable(err: IndexError, variant: fn(String) -> StoreError) -> StoreError {
    match err {
        IndexError::NotInitialized | IndexError::Unavailable(_) => {
            StoreError::Unavailable(err.to_string())
        }
        IndexError::Backend(msg) => variant(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use membot_types::memory::ScoredRecord;
    use std::sync::Mutex;

    /// Embedder stub: one-hot on text length, unit norm by construction.
    struct LenEmbedder;

    impl Embedder for LenEmbedder {
        fn embed(&self, text: &str) -> Vec<f32> {
            let mut v = vec![0.0; 8];
            if !text.is_empty() {
                v[text.len() % 8] = 1.0;
            }
            v
        }

        fn name(&self) -> &str {
            "len-onehot-8"
        }

        fn dimension(&self) -> usize {
            8
        }
    }

    /// Vec-backed index stub with exact dot-product distance.
    #[derive(Default)]
    struct VecIndex {
        records: Mutex<Vec<MemoryRecord>>,
    }

    impl VectorIndex for VecIndex {
        async fn create_collection(&self, reset: bool) -> Result<(), IndexError> {
            if reset {
                self.records.lock().unwrap().clear();
            }
            Ok(())
        }

        async fn insert(&self, record: MemoryRecord) -> Result<(), IndexError> {
            self.records.lock().unwrap().push(record);
            Ok(())
        }

        async fn search(
            &self,
            embedding: &[f32],
            top_k: usize,
        ) -> Result<Vec<ScoredRecord>, IndexError> {
            let records = self.records.lock().unwrap();
            let mut hits: Vec<ScoredRecord> = records
                .iter()
                .map(|r| {
                    let dot: f32 = r
                        .embedding
                        .iter()
                        .zip(embedding)
                        .map(|(a, b)| a * b)
                        .sum();
                    ScoredRecord {
                        record: r.clone(),
                        distance: 1.0 - dot,
                    }
                })
                .collect();
            hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap());
            hits.truncate(top_k);
            Ok(hits)
        }

        async fn count(&self) -> Result<u64, IndexError> {
            Ok(self.records.lock().unwrap().len() as u64)
        }

        async fn all(&self) -> Result<Vec<MemoryRecord>, IndexError> {
            Ok(self.records.lock().unwrap().clone())
        }

        async fn clear(&self) -> Result<(), IndexError> {
            self.records.lock().unwrap().clear();
            Ok(())
        }
    }

    /// Index stub where every operation fails.
    struct BrokenIndex;

    impl VectorIndex for BrokenIndex {
        async fn create_collection(&self, _reset: bool) -> Result<(), IndexError> {
            Err(IndexError::Unavailable("connection refused".to_string()))
        }

        async fn insert(&self, _record: MemoryRecord) -> Result<(), IndexError> {
            Err(IndexError::Backend("insert rejected".to_string()))
        }

        async fn search(
            &self,
            _embedding: &[f32],
            _top_k: usize,
        ) -> Result<Vec<ScoredRecord>, IndexError> {
            Err(IndexError::Backend("search failed".to_string()))
        }

        async fn count(&self) -> Result<u64, IndexError> {
            Err(IndexError::Backend("count failed".to_string()))
        }

        async fn all(&self) -> Result<Vec<MemoryRecord>, IndexError> {
            Err(IndexError::NotInitialized)
        }

        async fn clear(&self) -> Result<(), IndexError> {
            Err(IndexError::Backend("clear failed".to_string()))
        }
    }

    #[tokio::test]
    async fn test_add_injects_created_at_and_returns_unique_ids() {
        let store = LongTermStore::new(VecIndex::default(), LenEmbedder);
        store.initialize(true).await.unwrap();

        let id1 = store.add("first", MemoryMetadata::new()).await.unwrap();
        let id2 = store.add("second", MemoryMetadata::new()).await.unwrap();
        assert!(id1.starts_with("mem_"));
        assert_ne!(id1, id2);

        let records = store.all().await.unwrap();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record.metadata.contains_key("created_at"));
        }
    }

    #[tokio::test]
    async fn test_query_converts_distance_to_similarity() {
        let store = LongTermStore::new(VecIndex::default(), LenEmbedder);
        store.initialize(true).await.unwrap();

        // "abc" and "xyz" share length 3, so their stub embeddings match.
        store.add("abc", MemoryMetadata::new()).await.unwrap();
        store.add("much longer", MemoryMetadata::new()).await.unwrap();

        let results = store.query("xyz", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "abc");
        assert!((results[0].similarity - 1.0).abs() < 1e-6);
        assert!(results[0].similarity >= results[1].similarity);
    }

    #[tokio::test]
    async fn test_query_top_k_zero_is_empty() {
        let store = LongTermStore::new(VecIndex::default(), LenEmbedder);
        store.initialize(true).await.unwrap();
        store.add("anything", MemoryMetadata::new()).await.unwrap();

        let results = store.query("anything", 0).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_clear_then_count_zero() {
        let store = LongTermStore::new(VecIndex::default(), LenEmbedder);
        store.initialize(true).await.unwrap();
        store.add("a", MemoryMetadata::new()).await.unwrap();
        store.add("b", MemoryMetadata::new()).await.unwrap();
        assert_eq!(store.count().await, 2);

        store.clear().await.unwrap();
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_initialize_failure_maps_to_unavailable() {
        let store = LongTermStore::new(BrokenIndex, LenEmbedder);
        let err = store.initialize(true).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_add_failure_maps_to_write() {
        let store = LongTermStore::new(BrokenIndex, LenEmbedder);
        let err = store
            .add("text", MemoryMetadata::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Write(_)));
    }

    #[tokio::test]
    async fn test_query_failure_maps_to_read() {
        let store = LongTermStore::new(BrokenIndex, LenEmbedder);
        let err = store.query("text", 3).await.unwrap_err();
        assert!(matches!(err, StoreError::Read(_)));
    }

    #[tokio::test]
    async fn test_all_uninitialized_maps_to_unavailable() {
        let store = LongTermStore::new(BrokenIndex, LenEmbedder);
        let err = store.all().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_count_returns_zero_on_failure() {
        let store = LongTermStore::new(BrokenIndex, LenEmbedder);
        assert_eq!(store.count().await, 0);
    }
}
