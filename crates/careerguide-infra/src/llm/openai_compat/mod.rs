//! OpenAI-compatible LLM provider implementation.
//!
//! Talks to any `/chat/completions` endpoint (OpenAI, Mistral, a local
//! gateway, or Gemini's OpenAI-compatible surface) selected by base URL.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use careerguide_core::llm::provider::LlmProvider;
use careerguide_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use self::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use super::{build_http_client, error_from_response};

/// Base URL used when a candidate names no `base_url`.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Provider for any OpenAI-compatible API, bound to one model.
///
/// Does NOT derive Debug; the bearer key is only exposed in the
/// `Authorization` header.
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(api_key: SecretString, model: String, base_url: Option<&str>) -> Self {
        Self {
            client: build_http_client(Duration::from_secs(120)),
            api_key,
            base_url: base_url
                .unwrap_or(OPENAI_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model,
        }
    }

    fn build_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(ref system) = request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: Some(system.clone()),
            });
        }
        messages.extend(request.messages.iter().map(|m| ChatMessage {
            role: m.role.to_string(),
            content: Some(m.content.clone()),
        }));

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        "openai_compatible"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.build_request(request);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        let choice = parsed.choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;
        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            model: parsed.model.unwrap_or_else(|| self.model.clone()),
            finish_reason: choice.finish_reason,
        })
    }
}
