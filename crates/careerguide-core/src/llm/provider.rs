//! LlmProvider trait definition.
//!
//! This is the core abstraction that all completion backends implement.
//! Uses RPITIT for `complete`; `BoxLlmProvider` adds dynamic dispatch.

use careerguide_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (Gemini, OpenAI-compatible, etc.).
///
/// Each instance is bound to one model. Implementations live in
/// careerguide-infra (e.g., `GeminiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "gemini", "openai_compatible").
    fn name(&self) -> &str;

    /// Model identifier this instance sends requests to.
    fn model(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
