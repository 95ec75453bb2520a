//! GeminiProvider -- [`LlmProvider`] for the Google Gemini REST API.
//!
//! Sends non-streaming `generateContent` requests. The API key travels in
//! the `x-goog-api-key` header and is held as a [`SecretString`].

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use careerguide_core::llm::provider::LlmProvider;
use careerguide_types::llm::{CompletionRequest, CompletionResponse, LlmError, MessageRole};

use self::types::{
    GeminiContent, GeminiPart, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use super::{build_http_client, error_from_response};

/// Default Gemini API root.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini provider bound to one model.
///
/// # API Key Security
///
/// Does NOT derive Debug. The key is only exposed when building the
/// request header.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: SecretString, model: String) -> Self {
        Self {
            client: build_http_client(Duration::from_secs(120)),
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
            model,
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Convert a generic [`CompletionRequest`] into a Gemini request body.
    ///
    /// Gemini has no system role inside `contents`; system-role messages are
    /// folded into the system instruction after the request's own prompt.
    fn to_gemini_request(request: &CompletionRequest) -> GenerateContentRequest {
        let mut system_parts: Vec<GeminiPart> = request
            .system
            .iter()
            .map(|s| GeminiPart {
                text: Some(s.clone()),
            })
            .collect();

        let mut contents = Vec::with_capacity(request.messages.len());
        for msg in &request.messages {
            let role = match msg.role {
                MessageRole::System => {
                    system_parts.push(GeminiPart {
                        text: Some(msg.content.clone()),
                    });
                    continue;
                }
                MessageRole::User => "user",
                MessageRole::Assistant => "model",
            };
            contents.push(GeminiContent {
                role: Some(role.to_string()),
                parts: vec![GeminiPart {
                    text: Some(msg.content.clone()),
                }],
            });
        }

        GenerateContentRequest {
            system_instruction: (!system_parts.is_empty()).then(|| GeminiContent {
                role: None,
                parts: system_parts,
            }),
            contents,
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = Self::to_gemini_request(request);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        let content = parsed.text().ok_or(LlmError::EmptyResponse)?;
        Ok(CompletionResponse {
            content,
            model: parsed
                .model_version
                .clone()
                .unwrap_or_else(|| self.model.clone()),
            finish_reason: parsed.finish_reason(),
        })
    }
}
