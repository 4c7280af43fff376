//! Chat service: one memory-aware turn end to end.
//!
//! Assembles context through the orchestrator, calls the provider, and
//! records the assistant reply back into the short-term buffer. Provider
//! errors propagate unchanged; the user message stays in the buffer so the
//! caller can retry or `/reset`.

use std::time::Instant;

use membot_types::llm::{CompletionRequest, LlmError};
use membot_types::memory::RetrievedMemory;

use crate::memory::embedder::Embedder;
use crate::memory::index::VectorIndex;
use crate::memory::orchestrator::MemoryOrchestrator;

use super::provider::ChatProvider;

/// Outcome of one completed turn.
#[derive(Debug)]
pub struct ChatTurn {
    pub reply: String,
    pub tokens_used: u32,
    /// Long-term memories that were included in the context.
    pub used_memories: Vec<RetrievedMemory>,
    pub elapsed_ms: u64,
}

/// Drives memory-aware conversations against a chat provider.
pub struct ChatService<P, I, E> {
    provider: P,
    orchestrator: MemoryOrchestrator<I, E>,
    model: String,
    max_tokens: u32,
}

impl<P: ChatProvider, I: VectorIndex, E: Embedder> ChatService<P, I, E> {
    pub fn new(
        provider: P,
        orchestrator: MemoryOrchestrator<I, E>,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            provider,
            orchestrator,
            model: model.into(),
            max_tokens,
        }
    }

    /// Run one full turn: assemble context, call the provider, record the
    /// reply.
    pub async fn send(&mut self, user_text: &str) -> Result<ChatTurn, LlmError> {
        let context = self.orchestrator.turn(user_text).await;

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: context.messages,
            max_tokens: self.max_tokens,
        };

        let started = Instant::now();
        let response = self.provider.complete(&request).await?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            provider = self.provider.name(),
            model = %self.model,
            tokens_used = response.tokens_used,
            elapsed_ms,
            memories = context.used_memories.len(),
            "chat completion finished"
        );

        self.orchestrator.record_reply(&response.content);

        Ok(ChatTurn {
            reply: response.content,
            tokens_used: response.tokens_used,
            used_memories: context.used_memories,
            elapsed_ms,
        })
    }

    pub fn orchestrator(&self) -> &MemoryOrchestrator<I, E> {
        &self.orchestrator
    }

    pub fn orchestrator_mut(&mut self) -> &mut MemoryOrchestrator<I, E> {
        &mut self.orchestrator
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use membot_types::error::IndexError;
    use membot_types::llm::{CompletionResponse, MessageRole};
    use membot_types::memory::{MemoryRecord, ScoredRecord};

    use crate::memory::buffer::ShortTermBuffer;
    use crate::memory::store::LongTermStore;

    use std::sync::Mutex;

    /// Provider double that echoes the last user message.
    struct EchoProvider {
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl EchoProvider {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChatProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            let last_user = request
                .messages
                .iter()
                .rev()
                .find(|m| m.role == MessageRole::User)
                .map(|m| m.content.clone())
                .unwrap_or_default();
            Ok(CompletionResponse {
                content: format!("you said: {last_user}"),
                tokens_used: 42,
            })
        }
    }

    /// Provider double that always fails.
    struct DownProvider;

    impl ChatProvider for DownProvider {
        fn name(&self) -> &str {
            "down"
        }

        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Err(LlmError::Transport("connection reset".to_string()))
        }
    }

    struct NullEmbedder;

    impl Embedder for NullEmbedder {
        fn embed(&self, _text: &str) -> Vec<f32> {
            vec![0.0; 4]
        }

        fn name(&self) -> &str {
            "null-4"
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    #[derive(Default)]
    struct EmptyIndex;

    impl VectorIndex for EmptyIndex {
        async fn create_collection(&self, _reset: bool) -> Result<(), IndexError> {
            Ok(())
        }

        async fn insert(&self, _record: MemoryRecord) -> Result<(), IndexError> {
            Ok(())
        }

        async fn search(
            &self,
            _embedding: &[f32],
            _top_k: usize,
        ) -> Result<Vec<ScoredRecord>, IndexError> {
            Ok(Vec::new())
        }

        async fn count(&self) -> Result<u64, IndexError> {
            Ok(0)
        }

        async fn all(&self) -> Result<Vec<MemoryRecord>, IndexError> {
            Ok(Vec::new())
        }

        async fn clear(&self) -> Result<(), IndexError> {
            Ok(())
        }
    }

    fn service<P: ChatProvider>(provider: P) -> ChatService<P, EmptyIndex, NullEmbedder> {
        let orchestrator = MemoryOrchestrator::new(
            ShortTermBuffer::new(4),
            LongTermStore::new(EmptyIndex, NullEmbedder),
            2,
            "system prompt",
        );
        ChatService::new(provider, orchestrator, "test-model", 500)
    }

    #[tokio::test]
    async fn test_send_records_both_sides_of_the_turn() {
        let mut svc = service(EchoProvider::new());

        let turn = svc.send("hello").await.unwrap();
        assert_eq!(turn.reply, "you said: hello");
        assert_eq!(turn.tokens_used, 42);
        assert!(turn.used_memories.is_empty());

        let roles: Vec<MessageRole> = svc
            .orchestrator()
            .buffer()
            .snapshot()
            .map(|m| m.role)
            .collect();
        assert_eq!(roles, vec![MessageRole::User, MessageRole::Assistant]);
    }

    #[tokio::test]
    async fn test_send_passes_model_and_max_tokens() {
        let mut svc = service(EchoProvider::new());
        svc.send("check the request").await.unwrap();

        let requests = svc.provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "test-model");
        assert_eq!(requests[0].max_tokens, 500);
        assert_eq!(requests[0].messages[0].role, MessageRole::System);
    }

    #[tokio::test]
    async fn test_provider_error_propagates_and_keeps_user_message() {
        let mut svc = service(DownProvider);

        let err = svc.send("are you there?").await.unwrap_err();
        assert!(matches!(err, LlmError::Transport(_)));

        // The user message stays; no assistant reply was recorded.
        let roles: Vec<MessageRole> = svc
            .orchestrator()
            .buffer()
            .snapshot()
            .map(|m| m.role)
            .collect();
        assert_eq!(roles, vec![MessageRole::User]);
    }
}
