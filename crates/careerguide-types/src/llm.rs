//! LLM request/response types.
//!
//! These types model the data shapes for completion calls: role-tagged
//! messages, requests, responses, the provider error taxonomy, and the
//! tagged outcome of a best-effort generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Author of a message. Stored as text under
/// `CHECK (role IN ('user', 'assistant', 'system'))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// Stored and wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [MessageRole::System, MessageRole::User, MessageRole::Assistant]
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown message role '{s}'"))
    }
}

/// A single message in an LLM conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Request to an LLM provider for a completion.
///
/// The model is not part of the request: each provider instance is bound
/// to one model, so a candidate list can mix models freely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Response from an LLM provider for a non-streaming completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Sampling and time limits for one kind of generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub timeout: Duration,
}

/// Outcome of a best-effort generation.
///
/// Generation never fails outright: when no candidate produces text the
/// result is `Degraded`, carrying the fixed fallback text and the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    Generated { text: String, provider: String },
    Degraded { text: String, reason: String },
}

impl Generation {
    pub fn text(&self) -> &str {
        match self {
            Generation::Generated { text, .. } | Generation::Degraded { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Generation::Generated { text, .. } | Generation::Degraded { text, .. } => text,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Generation::Degraded { .. })
    }
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("provider returned no text")]
    EmptyResponse,

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("no providers configured")]
    NoProviders,
}
