//! Scripted `LlmProvider` for generator and service tests.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use careerguide_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use super::provider::LlmProvider;

#[derive(Clone)]
pub enum MockResult {
    Text(String),
    Failure(String),
    Slow(Duration),
}

pub struct MockProvider {
    name: String,
    model: String,
    result: MockResult,
    /// Every request this provider received, in order.
    pub seen: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    pub fn ok(name: &str, text: &str) -> Self {
        Self::with(name, MockResult::Text(text.to_string()))
    }

    pub fn failing(name: &str) -> Self {
        Self::with(name, MockResult::Failure(format!("{name} is down")))
    }

    pub fn slow(name: &str, delay: Duration) -> Self {
        Self::with(name, MockResult::Slow(delay))
    }

    fn with(name: &str, result: MockResult) -> Self {
        Self {
            name: name.to_string(),
            model: format!("{name}-model"),
            result,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
        self.seen.lock().unwrap().push(request.clone());
        let result = self.result.clone();
        let model = self.model.clone();
        async move {
            match result {
                MockResult::Text(text) => Ok(CompletionResponse {
                    content: text,
                    model,
                    finish_reason: Some("STOP".to_string()),
                }),
                MockResult::Failure(message) => Err(LlmError::Provider { message }),
                MockResult::Slow(delay) => {
                    tokio::time::sleep(delay).await;
                    Ok(CompletionResponse {
                        content: "too late".to_string(),
                        model,
                        finish_reason: None,
                    })
                }
            }
        }
    }
}
