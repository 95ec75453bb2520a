//! Session title generation via LLM.
//!
//! `TitleGenerator` asks for a very short topic title based on the early
//! messages of a conversation. Candidates are tried in order; if none
//! yields usable text the title is [`TITLE_FALLBACK`].

use careerguide_types::llm::{CompletionRequest, Generation, GenerationParams, Message, MessageRole};

use super::fallback::FallbackChain;

/// System prompt for the title generation call.
const TITLE_SYSTEM_PROMPT: &str = r#"You are a session title generator.
Rules:
- Generate a very short title (max 4 words).
- Summarize the overall topic of the conversation.
- Do NOT use greetings like "Hello" or "Hi".
- Use concise, professional wording.
Return ONLY the title text, nothing else."#;

/// Closing instruction appended after the conversation excerpt.
const TITLE_INSTRUCTION: &str = "Based on our exchange above, generate a title.";

/// Title used whenever generation is degraded.
pub const TITLE_FALLBACK: &str = "New Conversation";

/// Upper bound on a stored title, in characters.
pub const MAX_TITLE_CHARS: usize = 60;

/// Produces short session titles.
#[derive(Debug)]
pub struct TitleGenerator {
    chain: FallbackChain,
    params: GenerationParams,
}

impl TitleGenerator {
    pub fn new(chain: FallbackChain, params: GenerationParams) -> Self {
        Self { chain, params }
    }

    pub fn chain(&self) -> &FallbackChain {
        &self.chain
    }

    /// Generate a title from the early messages of a session.
    ///
    /// A generated title is cleaned with [`clean_title`]; if nothing is left
    /// after cleaning the result is degraded.
    #[tracing::instrument(name = "generate_title", skip_all, fields(messages = messages.len()))]
    pub async fn generate(&self, messages: &[Message]) -> Generation {
        let mut conversation = messages.to_vec();
        conversation.push(Message::new(MessageRole::User, TITLE_INSTRUCTION));

        let request = CompletionRequest {
            messages: conversation,
            system: Some(TITLE_SYSTEM_PROMPT.to_string()),
            max_tokens: self.params.max_output_tokens,
            temperature: Some(self.params.temperature),
        };

        match self
            .chain
            .generate(&request, self.params.timeout, TITLE_FALLBACK)
            .await
        {
            Generation::Generated { text, provider } => {
                let title = clean_title(&text);
                if title.is_empty() {
                    tracing::warn!(%provider, "Title response was empty after cleanup");
                    Generation::Degraded {
                        text: TITLE_FALLBACK.to_string(),
                        reason: "title empty after cleanup".to_string(),
                    }
                } else {
                    Generation::Generated { text: title, provider }
                }
            }
            degraded => degraded,
        }
    }
}

/// Normalize a model-produced title.
///
/// Keeps the first non-empty line, strips markdown heading/emphasis markers,
/// surrounding quotes and trailing punctuation, and caps the length.
pub fn clean_title(raw: &str) -> String {
    let line = raw
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");

    let title = line
        .trim_start_matches('#')
        .trim()
        .trim_matches('*')
        .trim()
        .trim_matches('"')
        .trim_matches('\'')
        .trim()
        .trim_end_matches(['.', ':', '!'])
        .trim();

    truncate_chars(title, MAX_TITLE_CHARS)
}

/// First `max` characters of `text`, trimmed. Never splits a character.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.trim().chars().take(max).collect::<String>().trim().to_string()
}
