//! ChatProvider trait definition.
//!
//! The chat completion call is an external collaborator: an ordered message
//! sequence goes in, one assistant message plus a token count comes back.
//! Provider-specific response shapes are mapped to the fixed
//! `CompletionResponse` at this boundary.

use membot_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat completion backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in membot-infra (e.g., `OpenAiChatProvider`).
pub trait ChatProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    ///
    /// Fails with [`LlmError::Transport`] or [`LlmError::Quota`]; the core
    /// never retries on its own.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
