//! Configuration types for membot.
//!
//! `AppConfig` represents the top-level `config.toml` controlling the memory
//! subsystem and the chat collaborator. All fields have defaults so a
//! missing or partial file still yields a working configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from `~/.membot/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub chat: ChatConfig,
}

/// Memory subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Short-term buffer capacity C. Zero is legal and means no short-term
    /// context is ever retained.
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,

    /// Embedding dimensionality D, fixed for the store's lifetime.
    #[serde(default = "default_embedding_dimension")]
    pub embedding_dimension: usize,

    /// Number of long-term memories retrieved per turn.
    #[serde(default = "default_retrieval_top_k")]
    pub retrieval_top_k: usize,

    /// Whether `initialize()` discards any prior collection contents.
    #[serde(default = "default_reset_on_init")]
    pub reset_on_init: bool,
}

fn default_buffer_capacity() -> usize {
    20
}

fn default_embedding_dimension() -> usize {
    384
}

fn default_retrieval_top_k() -> usize {
    2
}

fn default_reset_on_init() -> bool {
    true
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
            embedding_dimension: default_embedding_dimension(),
            retrieval_top_k: default_retrieval_top_k(),
            reset_on_init: default_reset_on_init(),
        }
    }
}

/// Chat collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Completion token cap per chat call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Base system prompt prepended to every assembled context.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_system_prompt() -> String {
    "You are a helpful assistant with memory.".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            system_prompt: default_system_prompt(),
        }
    }
}
