//! Memory orchestrator: composes short-term and long-term memory into the
//! context for each chat call.
//!
//! Pure coordinator -- no state of its own beyond the buffer/store pair it
//! owns. Callers serialize `turn`/`record_reply` per orchestrator;
//! independent orchestrators share nothing.

use membot_types::error::StoreError;
use membot_types::llm::{Message, MessageRole};
use membot_types::memory::{MemoryMetadata, RetrievedMemory};

use membot_types::chat::ChatMessage;

use super::buffer::ShortTermBuffer;
use super::embedder::Embedder;
use super::index::VectorIndex;
use super::store::LongTermStore;

/// Context assembled for one turn: the ordered message sequence to send to
/// the chat collaborator, plus the memories that were included.
#[derive(Debug)]
pub struct TurnContext {
    pub messages: Vec<Message>,
    pub used_memories: Vec<RetrievedMemory>,
}

/// Composes a [`ShortTermBuffer`] and a [`LongTermStore`] into chat context
/// and records new turns back into the buffer.
pub struct MemoryOrchestrator<I, E> {
    buffer: ShortTermBuffer,
    long_term: LongTermStore<I, E>,
    top_k: usize,
    system_prompt: String,
}

impl<I: VectorIndex, E: Embedder> MemoryOrchestrator<I, E> {
    pub fn new(
        buffer: ShortTermBuffer,
        long_term: LongTermStore<I, E>,
        top_k: usize,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            buffer,
            long_term,
            top_k,
            system_prompt: system_prompt.into(),
        }
    }

    /// Run the context-assembly half of a turn.
    ///
    /// Appends the user message to the buffer, retrieves up to `top_k`
    /// relevant long-term memories, and returns `[system] ++ buffer` as the
    /// message sequence. A failed retrieval degrades to buffer-only context
    /// with a warning; the turn never aborts here.
    pub async fn turn(&mut self, user_text: &str) -> TurnContext {
        self.buffer.append(ChatMessage::user(user_text));

        let used_memories = match self.long_term.query(user_text, self.top_k).await {
            Ok(memories) => memories,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "long-term retrieval failed, proceeding with buffer-only context"
                );
                Vec::new()
            }
        };

        let mut messages = Vec::with_capacity(self.buffer.len() + 1);
        messages.push(Message::new(
            MessageRole::System,
            self.build_system_prompt(&used_memories),
        ));
        messages.extend(
            self.buffer
                .snapshot()
                .map(|m| Message::new(m.role, m.content.clone())),
        );

        if !used_memories.is_empty() {
            tracing::debug!(count = used_memories.len(), "included long-term memories");
        }

        TurnContext {
            messages,
            used_memories,
        }
    }

    /// Append the assistant reply to the buffer.
    ///
    /// Does not persist to long-term memory: that is an explicit action via
    /// [`remember`](Self::remember), never an implicit side effect of a
    /// turn.
    pub fn record_reply(&mut self, assistant_text: &str) {
        self.buffer.append(ChatMessage::assistant(assistant_text));
    }

    /// Explicitly persist a durable memory. Failures propagate: this was
    /// the caller's stated intent, so silent degradation would be wrong.
    pub async fn remember(
        &self,
        text: &str,
        metadata: MemoryMetadata,
    ) -> Result<String, StoreError> {
        self.long_term.add(text, metadata).await
    }

    fn build_system_prompt(&self, memories: &[RetrievedMemory]) -> String {
        if memories.is_empty() {
            return self.system_prompt.clone();
        }

        let mut prompt = self.system_prompt.clone();
        prompt.push_str("\n\nRelevant things you remember:\n");
        for (i, memory) in memories.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, memory.text));
        }
        prompt
    }

    pub fn buffer(&self) -> &ShortTermBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut ShortTermBuffer {
        &mut self.buffer
    }

    pub fn long_term(&self) -> &LongTermStore<I, E> {
        &self.long_term
    }
}
