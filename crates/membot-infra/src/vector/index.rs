//! In-memory brute-force vector index.
//!
//! Exact nearest-neighbor search over a flat record list, guarded by a
//! tokio `RwLock`. Intended for single-process use and tests; contents
//! vanish on drop. Honors the `VectorIndex` ranking contract: ascending
//! cosine distance, ties broken by earlier insertion first.

use tokio::sync::RwLock;

use membot_core::memory::index::VectorIndex;
use membot_types::error::IndexError;
use membot_types::memory::{MemoryRecord, ScoredRecord};

/// Volatile vector index with exact cosine search.
///
/// All operations before `create_collection` fail with
/// [`IndexError::NotInitialized`].
#[derive(Debug, Default)]
pub struct InMemoryVectorIndex {
    collection: RwLock<Option<Vec<MemoryRecord>>>,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VectorIndex for InMemoryVectorIndex {
    async fn create_collection(&self, reset: bool) -> Result<(), IndexError> {
        let mut guard = self.collection.write().await;
        if reset || guard.is_none() {
            *guard = Some(Vec::new());
        }
        Ok(())
    }

    async fn insert(&self, record: MemoryRecord) -> Result<(), IndexError> {
        let mut guard = self.collection.write().await;
        let records = guard.as_mut().ok_or(IndexError::NotInitialized)?;
        records.push(record);
        Ok(())
    }

    async fn search(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredRecord>, IndexError> {
        let guard = self.collection.read().await;
        let records = guard.as_ref().ok_or(IndexError::NotInitialized)?;

        let mut hits: Vec<ScoredRecord> = records
            .iter()
            .map(|record| ScoredRecord {
                record: record.clone(),
                distance: cosine_distance(embedding, &record.embedding),
            })
            .collect();

        // Stable sort keeps insertion order for equal distances.
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(top_k);
        Ok(hits)
    }

    async fn count(&self) -> Result<u64, IndexError> {
        let guard = self.collection.read().await;
        let records = guard.as_ref().ok_or(IndexError::NotInitialized)?;
        Ok(records.len() as u64)
    }

    async fn all(&self) -> Result<Vec<MemoryRecord>, IndexError> {
        let guard = self.collection.read().await;
        let records = guard.as_ref().ok_or(IndexError::NotInitialized)?;
        Ok(records.clone())
    }

    async fn clear(&self) -> Result<(), IndexError> {
        let mut guard = self.collection.write().await;
        let records = guard.as_mut().ok_or(IndexError::NotInitialized)?;
        records.clear();
        Ok(())
    }
}

/// Cosine distance in [0, 2]. Either vector having zero norm yields the
/// maximum-uncertainty distance 1.0 (similarity 0), so degenerate
/// embeddings rank behind any real match without erroring.
fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}
