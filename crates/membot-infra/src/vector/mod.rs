//! Vector infrastructure for memory embeddings.
//!
//! Provides the hashed bag-of-words reference embedder and an in-memory
//! brute-force cosine index implementing the `VectorIndex` port.

pub mod embedder;
pub mod index;
