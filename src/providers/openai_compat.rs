//! OpenAI-compatible chat completions (OpenAI, xAI, Gemini)
//!
//! Every prompt pair becomes a `system` turn followed by a `user` turn, and
//! the completion is the first choice's message content.

use super::http::HttpClient;
use super::Dispatcher;
use crate::core_types::{ProviderFamily, ProviderTarget, NO_RESPONSE};
use crate::error::PollResult;
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};

/// Chat message sent to the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat completion request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Dispatcher for the [`ProviderFamily::ChatCompletions`] family
#[derive(Debug, Clone)]
pub struct ChatCompletionsDispatcher {
    http: HttpClient,
}

impl ChatCompletionsDispatcher {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Build the request body for a target
    pub fn build_request(target: &ProviderTarget) -> ChatRequest {
        let messages = target
            .inputs
            .iter()
            .flat_map(|pair| {
                [
                    ChatMessage {
                        role: "system".to_string(),
                        content: pair.system_prompt.clone(),
                    },
                    ChatMessage {
                        role: "user".to_string(),
                        content: pair.user_prompt.clone(),
                    },
                ]
            })
            .collect();

        ChatRequest {
            model: target.model.clone(),
            messages,
        }
    }
}

/// First non-empty completion, or the placeholder text
pub(crate) fn first_completion(response: ChatResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .unwrap_or_else(|| NO_RESPONSE.to_string())
}

#[async_trait::async_trait]
impl Dispatcher for ChatCompletionsDispatcher {
    fn family(&self) -> ProviderFamily {
        ProviderFamily::ChatCompletions
    }

    async fn complete(&self, target: &ProviderTarget) -> PollResult<String> {
        let url = format!("{}/chat/completions", target.resolved_endpoint());
        let headers = HttpClient::bearer_headers(&target.credential)?;
        let request = Self::build_request(target);

        log_debug!(
            provider = %target.provider,
            model = %target.model,
            url = %url,
            message_count = request.messages.len(),
            "Sending chat completion request"
        );

        let response: ChatResponse = self.http.post_json(&url, &headers, &request).await?;
        Ok(first_completion(response))
    }
}
