//! Bounded short-term conversation buffer.
//!
//! FIFO with a fixed capacity: appending beyond capacity evicts the oldest
//! message, preserving the relative order of the remainder. One buffer per
//! conversation session; discarded when the session ends.

use std::collections::VecDeque;

use membot_types::chat::{BufferStats, ChatMessage, MessageRole};

/// Bounded FIFO of recent conversation messages.
///
/// Capacity zero is legal: every append is immediately evicted and no
/// short-term context is ever retained.
#[derive(Debug)]
pub struct ShortTermBuffer {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl ShortTermBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert at the end, evicting from the front until `len() <= capacity`.
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push_back(message);
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }

    /// Ordered view of the held messages, oldest first. Does not mutate.
    pub fn snapshot(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    /// Remove all messages.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Counts by role and average content length.
    pub fn stats(&self) -> BufferStats {
        let mut stats = BufferStats {
            total: self.messages.len(),
            capacity: self.capacity,
            ..BufferStats::default()
        };

        let mut total_chars = 0usize;
        for msg in &self.messages {
            match msg.role {
                MessageRole::User => stats.user += 1,
                MessageRole::Assistant => stats.assistant += 1,
                MessageRole::System => stats.system += 1,
            }
            total_chars += msg.content.chars().count();
        }

        if stats.total > 0 {
            stats.avg_content_len =
                ((total_chars as f64) / (stats.total as f64)).round() as usize;
        }

        stats
    }
}
