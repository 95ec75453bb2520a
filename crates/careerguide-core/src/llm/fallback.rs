//! Sequential candidate fallback.
//!
//! A `FallbackChain` holds an ordered list of candidate backends. A request
//! goes to each candidate in turn until one returns non-empty text; every
//! failure (HTTP error, bad body, empty text) moves on to the next. There is
//! no backoff and no re-try of the same candidate.

use std::time::Duration;

use careerguide_types::llm::{CompletionRequest, CompletionResponse, Generation, LlmError};
use tracing::Instrument;

use super::box_provider::BoxLlmProvider;

/// Result of a successful completion through the chain.
#[derive(Debug)]
pub struct FallbackResult {
    pub response: CompletionResponse,
    /// `name/model` of the candidate that answered.
    pub provider: String,
    /// How many candidates failed before this one.
    pub failed_before: usize,
}

/// Ordered list of candidate backends.
#[derive(Debug, Default)]
pub struct FallbackChain {
    candidates: Vec<BoxLlmProvider>,
}

impl FallbackChain {
    pub fn new(candidates: Vec<BoxLlmProvider>) -> Self {
        Self { candidates }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Candidate labels in try order.
    pub fn labels(&self) -> Vec<String> {
        self.candidates.iter().map(BoxLlmProvider::label).collect()
    }

    /// Send `request` to each candidate in order until one yields text.
    ///
    /// Returns the last candidate's error when all of them fail, or
    /// `LlmError::NoProviders` when the chain is empty.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<FallbackResult, LlmError> {
        let mut last_error = LlmError::NoProviders;

        for (idx, provider) in self.candidates.iter().enumerate() {
            let label = provider.label();
            let span = tracing::info_span!(
                "gen_ai.complete",
                gen_ai.operation.name = "chat",
                gen_ai.provider.name = provider.name(),
                gen_ai.request.model = provider.model(),
                gen_ai.request.max_tokens = request.max_tokens,
                gen_ai.request.temperature = ?request.temperature,
            );
            let outcome = match provider.complete(request).instrument(span).await {
                Ok(response) if response.content.trim().is_empty() => Err(LlmError::EmptyResponse),
                other => other,
            };

            match outcome {
                Ok(response) => {
                    if idx > 0 {
                        tracing::info!(provider = %label, failed_before = idx, "Fallback candidate answered");
                    }
                    return Ok(FallbackResult {
                        response,
                        provider: label,
                        failed_before: idx,
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        provider = %label,
                        error = %err,
                        "Provider failed, trying next in chain"
                    );
                    last_error = err;
                }
            }
        }

        Err(last_error)
    }

    /// Best-effort completion bounded by `timeout`.
    ///
    /// Never fails: an empty chain, exhausted candidates, or a timeout all
    /// produce `Generation::Degraded` with `fallback` as the text.
    pub async fn generate(
        &self,
        request: &CompletionRequest,
        timeout: Duration,
        fallback: &str,
    ) -> Generation {
        let outcome = match tokio::time::timeout(timeout, self.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(timeout)),
        };

        match outcome {
            Ok(result) => Generation::Generated {
                text: result.response.content,
                provider: result.provider,
            },
            Err(err) => {
                let reason = err.to_string();
                tracing::warn!(
                    candidates = self.candidates.len(),
                    reason = %reason,
                    "Generation degraded to fallback text"
                );
                Generation::Degraded {
                    text: fallback.to_string(),
                    reason,
                }
            }
        }
    }
}
