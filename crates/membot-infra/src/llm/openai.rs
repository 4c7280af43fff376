//! OpenAI chat provider.
//!
//! Implements the [`ChatProvider`] port over any OpenAI-compatible chat
//! completions endpoint, using [`async_openai`] for type-safe request and
//! response handling. The default base URL points at OpenAI; a custom base
//! covers compatible gateways.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};

use membot_core::chat::provider::ChatProvider;
use membot_types::llm::{CompletionRequest, CompletionResponse, LlmError, MessageRole};

/// Chat provider backed by an OpenAI-compatible completions API.
///
/// Does NOT derive Debug: the API key lives inside the `async_openai`
/// client and must not leak into logs.
pub struct OpenAiChatProvider {
    client: Client<OpenAIConfig>,
    name: String,
}

impl OpenAiChatProvider {
    /// Provider against the official OpenAI endpoint.
    pub fn new(api_key: &str) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            name: "openai".to_string(),
        }
    }

    /// Provider against a custom OpenAI-compatible base URL.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Client::with_config(config),
            name: "openai-compatible".to_string(),
        }
    }

    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let messages: Vec<ChatCompletionRequestMessage> = request
            .messages
            .iter()
            .map(|msg| match msg.role {
                MessageRole::System => {
                    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                        content: ChatCompletionRequestSystemMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    })
                }
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
                        name: None,
                    })
                }
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            msg.content.clone(),
                        )),
                        refusal: None,
                        name: None,
                        audio: None,
                        tool_calls: None,
                        function_call: None,
                    })
                }
            })
            .collect();

        CreateChatCompletionRequest {
            model: request.model.clone(),
            messages,
            max_completion_tokens: Some(request.max_tokens),
            ..Default::default()
        }
    }
}

impl ChatProvider for OpenAiChatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let oai_request = self.build_request(request);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| {
                LlmError::InvalidResponse("completion returned no choices".to_string())
            })?;

        let tokens_used = response.usage.map(|u| u.total_tokens).unwrap_or(0);

        Ok(CompletionResponse {
            content,
            tokens_used,
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => classify_api_error(
            api_err.code.as_deref().unwrap_or(""),
            api_err.r#type.as_deref().unwrap_or(""),
            &api_err.message,
        ),
        OpenAIError::Reqwest(reqwest_err) => {
            if reqwest_err.status().map(|s| s.as_u16()) == Some(429) {
                LlmError::Quota(err.to_string())
            } else {
                LlmError::Transport(err.to_string())
            }
        }
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::InvalidResponse(format!("failed to parse response: {content}"))
        }
        _ => LlmError::Transport(err.to_string()),
    }
}

/// Classify an API-level error body by its code, type, and message.
fn classify_api_error(code: &str, error_type: &str, message: &str) -> LlmError {
    if code == "rate_limit_exceeded"
        || code == "insufficient_quota"
        || error_type == "rate_limit_error"
        || error_type == "insufficient_quota"
        || message.contains("quota")
    {
        LlmError::Quota(message.to_string())
    } else {
        LlmError::Transport(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use membot_types::llm::Message;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![
                Message::new(MessageRole::System, "Be helpful"),
                Message::new(MessageRole::User, "Hello"),
                Message::new(MessageRole::Assistant, "Hi there!"),
            ],
            max_tokens: 500,
        }
    }

    #[test]
    fn test_build_request_maps_all_roles() {
        let provider = OpenAiChatProvider::new("sk-test");
        let oai_req = provider.build_request(&request());

        assert_eq!(oai_req.model, "gpt-4o-mini");
        assert_eq!(oai_req.messages.len(), 3);
        assert_eq!(oai_req.max_completion_tokens, Some(500));
        assert!(matches!(
            oai_req.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            oai_req.messages[1],
            ChatCompletionRequestMessage::User(_)
        ));
        assert!(matches!(
            oai_req.messages[2],
            ChatCompletionRequestMessage::Assistant(_)
        ));
    }

    #[test]
    fn test_provider_names() {
        assert_eq!(OpenAiChatProvider::new("sk-test").name(), "openai");
        assert_eq!(
            OpenAiChatProvider::with_base_url("sk-test", "http://localhost:1234/v1").name(),
            "openai-compatible"
        );
    }

    #[test]
    fn test_classify_rate_limit_as_quota() {
        let err = classify_api_error("rate_limit_exceeded", "", "Rate limit reached");
        assert!(matches!(err, LlmError::Quota(_)));

        let err = classify_api_error("", "rate_limit_error", "Too many requests");
        assert!(matches!(err, LlmError::Quota(_)));
    }

    #[test]
    fn test_classify_insufficient_quota() {
        let err = classify_api_error(
            "insufficient_quota",
            "",
            "You exceeded your current quota",
        );
        assert!(matches!(err, LlmError::Quota(_)));
    }

    #[test]
    fn test_classify_other_api_errors_as_transport() {
        let err = classify_api_error("server_error", "", "The server had an error");
        assert!(matches!(err, LlmError::Transport(_)));
    }

    #[test]
    fn test_map_json_deserialize_as_invalid_response() {
        use async_openai::error::OpenAIError;
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = map_openai_error(OpenAIError::JSONDeserialize(
            json_err,
            "not json".to_string(),
        ));
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }
}
