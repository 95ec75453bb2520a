//! Type-erased completion backend.
//!
//! `LlmProvider` returns `impl Future`, so it cannot be a trait object.
//! A private erased trait with a boxed future is blanket-implemented for
//! every provider, and `BoxLlmProvider` owns one of those behind a `Box`.

use std::future::Future;
use std::pin::Pin;

use careerguide_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use super::provider::LlmProvider;

type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;

trait ErasedProvider: Send + Sync {
    fn erased_complete<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a>;
}

impl<P: LlmProvider> ErasedProvider for P {
    fn erased_complete<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a> {
        Box::pin(self.complete(request))
    }
}

/// A candidate backend chosen at runtime from configuration.
///
/// Name and model are captured once at construction; they are what the
/// fallback chain reports in logs, spans and `Generation::Generated`.
pub struct BoxLlmProvider {
    name: String,
    model: String,
    inner: Box<dyn ErasedProvider>,
}

impl BoxLlmProvider {
    pub fn new<P: LlmProvider + 'static>(provider: P) -> Self {
        Self {
            name: provider.name().to_string(),
            model: provider.model().to_string(),
            inner: Box::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// `name/model`.
    pub fn label(&self) -> String {
        format!("{}/{}", self.name, self.model)
    }

    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        self.inner.erased_complete(request).await
    }
}

impl std::fmt::Debug for BoxLlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BoxLlmProvider").field(&self.label()).finish()
    }
}
