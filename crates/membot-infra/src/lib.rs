//! Infrastructure implementations for membot.
//!
//! Implements the ports defined in `membot-core`: the hashed reference
//! embedder, the in-memory brute-force vector index, the OpenAI-compatible
//! chat provider, and the `config.toml` loader.

pub mod config;
pub mod llm;
pub mod vector;
