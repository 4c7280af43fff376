//! Embedder trait for text-to-vector conversion.
//!
//! Defines the interface for embedding text into fixed-dimension vectors
//! for similarity search. The reference hashing implementation lives in
//! membot-infra; a real embedding model can be substituted behind the same
//! interface.

/// Trait for converting text into an embedding vector.
///
/// Implementations must be deterministic and total: `embed` never fails,
/// never blocks, and has no side effects. The returned vector always has
/// length [`dimension`](Embedder::dimension) and is either unit-normalized
/// or the zero vector (degenerate input).
pub trait Embedder: Send + Sync {
    /// Embed a single text into a vector of length `dimension()`.
    fn embed(&self, text: &str) -> Vec<f32>;

    /// The name of the embedding scheme (e.g., "hash-bow-384").
    fn name(&self) -> &str;

    /// The dimensionality of the output vectors.
    fn dimension(&self) -> usize;
}
