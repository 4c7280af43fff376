//! Hashed bag-of-words reference embedder.
//!
//! A coarse, explicitly approximate embedding: each lowercase word hashes
//! to a bucket by summing its character code points modulo the dimension,
//! and the accumulator is unit-normalized. Collisions are allowed and
//! expected. It exists to give the memory subsystem something concrete and
//! deterministic to run against without a model or network dependency; a
//! real embedding model substitutes behind the same `Embedder` trait.

use membot_core::memory::embedder::Embedder;

/// Deterministic hashing embedder with a configurable dimension.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
    name: String,
}

impl HashEmbedder {
    /// Create an embedder producing vectors of length `dimension`.
    ///
    /// `dimension` must be positive; it is fixed for the lifetime of any
    /// store built on this embedder.
    pub fn new(dimension: usize) -> Self {
        assert!(dimension > 0, "embedding dimension must be positive");
        Self {
            dimension,
            name: format!("hash-bow-{dimension}"),
        }
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        let mut accumulator = vec![0.0f32; self.dimension];

        for word in text.to_lowercase().split_whitespace() {
            let hash: u32 = word.chars().map(|c| c as u32).sum();
            let bucket = (hash as usize) % self.dimension;
            accumulator[bucket] += 1.0;
        }

        let norm = accumulator.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut accumulator {
                *value /= norm;
            }
        }

        accumulator
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(v: &[f32]) -> f32 {
        v.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let embedder = HashEmbedder::new(384);
        let v = embedder.embed("");
        assert_eq!(v.len(), 384);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_whitespace_only_is_zero_vector() {
        let embedder = HashEmbedder::new(384);
        let v = embedder.embed("   ");
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_nonempty_text_is_unit_normalized() {
        let embedder = HashEmbedder::new(64);
        let v = embedder.embed("the quick brown fox");
        assert_eq!(v.len(), 64);
        assert!((norm(&v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_deterministic() {
        let embedder = HashEmbedder::new(128);
        let a = embedder.embed("I like JavaScript");
        let b = embedder.embed("I like JavaScript");
        assert_eq!(a, b);
    }

    #[test]
    fn test_case_insensitive_tokenization() {
        let embedder = HashEmbedder::new(128);
        assert_eq!(embedder.embed("Hello World"), embedder.embed("hello world"));
    }

    #[test]
    fn test_word_overlap_raises_similarity() {
        let embedder = HashEmbedder::new(384);
        let record = embedder.embed("project is Orion");
        let overlapping = embedder.embed("what is my project");
        let unrelated = embedder.embed("completely different words here");

        // "project" and "is" hash identically in both texts.
        assert!(cosine(&record, &overlapping) > cosine(&record, &unrelated));
    }

    #[test]
    fn test_name_reports_dimension() {
        let embedder = HashEmbedder::new(384);
        assert_eq!(embedder.name(), "hash-bow-384");
        assert_eq!(embedder.dimension(), 384);
    }

    #[test]
    #[should_panic(expected = "dimension must be positive")]
    fn test_zero_dimension_panics() {
        HashEmbedder::new(0);
    }
}
