//! Assistant reply generation.
//!
//! `ReplyGenerator` sends the conversation history behind a fixed
//! career-guide persona prompt. It never fails: when no candidate answers,
//! the reply is the static greeting in [`REPLY_FALLBACK`].

use careerguide_types::llm::{CompletionRequest, Generation, GenerationParams, Message};

use super::fallback::FallbackChain;

/// System prompt for every reply call.
pub const CAREER_GUIDE_SYSTEM_PROMPT: &str = "You are a career guide assistant. \
Always reply in well-formatted Markdown. \
Use headings (##), bullet points, and **bold** keywords where useful. \
Keep responses structured, concise, clear and in bullet points, similar to ChatGPT style.";

/// Reply text used whenever generation is degraded.
pub const REPLY_FALLBACK: &str = "Hello, I am your career guide.";

/// Produces assistant replies from an ordered message history.
#[derive(Debug)]
pub struct ReplyGenerator {
    chain: FallbackChain,
    params: GenerationParams,
}

impl ReplyGenerator {
    pub fn new(chain: FallbackChain, params: GenerationParams) -> Self {
        Self { chain, params }
    }

    pub fn chain(&self) -> &FallbackChain {
        &self.chain
    }

    /// Build the completion request for `history` (oldest first).
    pub fn build_request(&self, history: &[Message]) -> CompletionRequest {
        CompletionRequest {
            messages: history.to_vec(),
            system: Some(CAREER_GUIDE_SYSTEM_PROMPT.to_string()),
            max_tokens: self.params.max_output_tokens,
            temperature: Some(self.params.temperature),
        }
    }

    /// Generate a reply to `history`.
    #[tracing::instrument(name = "generate_reply", skip_all, fields(history_len = history.len()))]
    pub async fn generate(&self, history: &[Message]) -> Generation {
        let request = self.build_request(history);
        let generation = self
            .chain
            .generate(&request, self.params.timeout, REPLY_FALLBACK)
            .await;

        if let Generation::Generated { provider, .. } = &generation {
            tracing::debug!(%provider, "Reply generated");
        }
        generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::box_provider::BoxLlmProvider;
    use crate::llm::mock::MockProvider;
    use careerguide_types::llm::MessageRole;
    use std::time::Duration;

    fn params() -> GenerationParams {
        GenerationParams {
            temperature: 0.7,
            max_output_tokens: 512,
            timeout: Duration::from_secs(5),
        }
    }

    fn history() -> Vec<Message> {
        vec![
            Message::new(MessageRole::User, "I want advice on resumes"),
            Message::new(MessageRole::Assistant, "## Resume basics"),
            Message::new(MessageRole::User, "What about interviews?"),
        ]
    }

    #[tokio::test]
    async fn test_reply_passes_history_behind_persona_prompt() {
        let provider = MockProvider::ok("gemini", "## Interview tips");
        let seen = provider.seen.clone();
        let generator =
            ReplyGenerator::new(FallbackChain::new(vec![BoxLlmProvider::new(provider)]), params());

        let generation = generator.generate(&history()).await;
        assert_eq!(
            generation,
            Generation::Generated {
                text: "## Interview tips".to_string(),
                provider: "gemini/gemini-model".to_string(),
            }
        );

        let requests = seen.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.system.as_deref(), Some(CAREER_GUIDE_SYSTEM_PROMPT));
        assert_eq!(request.messages, history());
        assert_eq!(request.max_tokens, 512);
        assert_eq!(request.temperature, Some(0.7));
    }

    #[tokio::test]
    async fn test_reply_without_credentials_degrades() {
        let generator = ReplyGenerator::new(FallbackChain::default(), params());
        let generation = generator.generate(&history()).await;
        assert!(generation.is_degraded());
        assert_eq!(generation.text(), REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn test_reply_provider_failure_degrades() {
        let generator = ReplyGenerator::new(
            FallbackChain::new(vec![BoxLlmProvider::new(MockProvider::failing("gemini"))]),
            params(),
        );
        let generation = generator.generate(&history()).await;
        match generation {
            Generation::Degraded { text, reason } => {
                assert_eq!(text, "Hello, I am your career guide.");
                assert!(reason.contains("gemini is down"));
            }
            other => panic!("expected degraded, got {other:?}"),
        }
    }

    #[test]
    fn test_persona_prompt_constraints() {
        assert!(CAREER_GUIDE_SYSTEM_PROMPT.contains("career guide"));
        assert!(CAREER_GUIDE_SYSTEM_PROMPT.contains("Markdown"));
        assert!(CAREER_GUIDE_SYSTEM_PROMPT.contains("bullet points"));
    }
}
