//! Long-term memory types for membot.
//!
//! A `MemoryRecord` is a durable (text, embedding, metadata) triple stored
//! in the backing vector index; `RetrievedMemory` is what a similarity
//! query returns to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::fmt;

/// A scalar metadata value attached to a memory record.
///
/// Mirrors what backing vector indexes accept as metadata: strings,
/// integers, floats, and booleans only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Str(s) => write!(f, "{s}"),
            MetadataValue::Int(i) => write!(f, "{i}"),
            MetadataValue::Float(x) => write!(f, "{x}"),
            MetadataValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::Str(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::Str(s)
    }
}

/// String-keyed scalar metadata for a memory record.
///
/// BTreeMap keeps enumeration order deterministic.
pub type MemoryMetadata = BTreeMap<String, MetadataValue>;

/// A single durable memory held by the long-term store.
///
/// Never mutated after creation; deleted only by an explicit clear.
/// The embedding is either unit-normalized or the zero vector (degenerate
/// source text), always of the store's fixed dimensionality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Opaque id, unique within a collection for its lifetime.
    pub id: String,
    pub text: String,
    pub embedding: Vec<f32>,
    /// Caller-supplied metadata plus a `created_at` entry injected at add
    /// time.
    pub metadata: MemoryMetadata,
    pub created_at: DateTime<Utc>,
}

/// A memory returned from a similarity query, ranked by similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedMemory {
    pub text: String,
    /// Cosine similarity to the query, `1 - distance`. Effectively in
    /// [0, 1] for hashed non-negative features.
    pub similarity: f32,
    pub metadata: MemoryMetadata,
}

/// A record paired with its raw cosine distance, as produced by the
/// backing index before the store converts distance to similarity.
#[derive(Debug, Clone)]
pub struct ScoredRecord {
    pub record: MemoryRecord,
    pub distance: f32,
}
