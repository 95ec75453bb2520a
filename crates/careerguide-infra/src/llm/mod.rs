//! LLM provider implementations.
//!
//! Concrete [`LlmProvider`](careerguide_core::llm::provider::LlmProvider)
//! backends for Gemini and OpenAI-compatible APIs, a provider factory
//! ([`create_provider`]), and [`build_chain`], which turns configured
//! candidates into a [`FallbackChain`].

pub mod gemini;
pub mod openai_compat;

use std::time::Duration;

use secrecy::SecretString;

use careerguide_core::llm::box_provider::BoxLlmProvider;
use careerguide_core::llm::fallback::FallbackChain;
use careerguide_types::config::{CandidateConfig, ProviderKind};
use careerguide_types::llm::LlmError;

use self::gemini::GeminiProvider;
use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxLlmProvider`] for one configured candidate.
pub fn create_provider(candidate: &CandidateConfig, api_key: SecretString) -> BoxLlmProvider {
    match candidate.provider {
        ProviderKind::Gemini => {
            let mut provider = GeminiProvider::new(api_key, candidate.model.clone());
            if let Some(ref base_url) = candidate.base_url {
                provider = provider.with_base_url(base_url.as_str());
            }
            BoxLlmProvider::new(provider)
        }
        ProviderKind::OpenaiCompatible => BoxLlmProvider::new(OpenAiCompatibleProvider::new(
            api_key,
            candidate.model.clone(),
            candidate.base_url.as_deref(),
        )),
    }
}

/// Build a chain from candidates, reading API keys from the process environment.
pub fn build_chain(candidates: &[CandidateConfig]) -> FallbackChain {
    build_chain_with(candidates, |var| std::env::var(var).ok())
}

/// Build a chain from candidates, resolving API keys through `lookup`.
///
/// Candidates whose key is unset or blank are skipped with a warning, so an
/// unconfigured deployment still starts and answers with fallback text.
pub fn build_chain_with<F>(candidates: &[CandidateConfig], lookup: F) -> FallbackChain
where
    F: Fn(&str) -> Option<String>,
{
    let providers = candidates
        .iter()
        .filter_map(|candidate| {
            match lookup(&candidate.api_key_env).filter(|k| !k.trim().is_empty()) {
                Some(key) => Some(create_provider(candidate, SecretString::from(key))),
                None => {
                    tracing::warn!(
                        provider = %candidate.provider,
                        model = %candidate.model,
                        env = %candidate.api_key_env,
                        "API key not set, skipping candidate"
                    );
                    None
                }
            }
        })
        .collect();

    FallbackChain::new(providers)
}

/// Shared HTTP client with a request timeout.
///
/// Falls back to a default client if the builder fails (TLS backend init).
pub(crate) fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to build HTTP client, using defaults");
            reqwest::Client::new()
        })
}

/// Map a non-success HTTP response to an [`LlmError`], consuming the body.
pub(crate) async fn error_from_response(response: reqwest::Response) -> LlmError {
    let status = response.status();
    let retry_after_ms = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(|secs| secs.saturating_mul(1000));
    let error_body = response.text().await.unwrap_or_default();

    match status.as_u16() {
        401 | 403 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited { retry_after_ms },
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {error_body}"),
        },
    }
}
