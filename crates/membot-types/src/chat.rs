//! Conversation message and buffer statistics types for membot.
//!
//! `ChatMessage` is the unit held by the short-term buffer: immutable once
//! created, ordered by insertion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export MessageRole from llm (used in both chat and llm contexts).
pub use crate::llm::MessageRole;

/// A single message in a conversation, as held by the short-term buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message stamped with the current time.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Derived, side-effect-free report over a short-term buffer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BufferStats {
    pub total: usize,
    pub user: usize,
    pub assistant: usize,
    pub system: usize,
    /// Average content length in characters, rounded to nearest.
    pub avg_content_len: usize,
    pub capacity: usize,
}
