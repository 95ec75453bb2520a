//! Session lifecycle operations, all scoped to the calling user.

use std::sync::Arc;

use careerguide_types::chat::{ChatSession, DEFAULT_SESSION_TITLE, SessionId};
use careerguide_types::error::ChatError;
use careerguide_types::llm::{Generation, Message};
use careerguide_types::user::UserId;
use chrono::Utc;
use tracing::{debug, info};

use crate::chat::repository::ChatRepository;
use crate::llm::title::{TITLE_FALLBACK, TitleGenerator};

/// Creates, lists, renames and deletes the caller's sessions.
///
/// Generic over `ChatRepository` so careerguide-core never depends on
/// careerguide-infra.
pub struct SessionService<C: ChatRepository> {
    repo: Arc<C>,
    titles: Arc<TitleGenerator>,
}

impl<C: ChatRepository> SessionService<C> {
    pub fn new(repo: Arc<C>, titles: Arc<TitleGenerator>) -> Self {
        Self { repo, titles }
    }

    /// All of the owner's sessions, most recently active first.
    pub async fn list(&self, owner: UserId) -> Result<Vec<ChatSession>, ChatError> {
        Ok(self.repo.list_sessions(owner).await?)
    }

    /// Create a session. A missing or blank title becomes `"New Chat"`.
    pub async fn create(
        &self,
        owner: UserId,
        title: Option<&str>,
    ) -> Result<ChatSession, ChatError> {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_SESSION_TITLE);

        let session = self.repo.create_session(owner, title, Utc::now()).await?;
        info!(session_id = %session.id, user_id = %owner, "Session created");
        Ok(session)
    }

    /// Rename an owned session.
    ///
    /// The title must be non-blank; it is stored trimmed. Sessions that do
    /// not exist or belong to someone else yield `SessionNotFound`.
    pub async fn update_title(
        &self,
        owner: UserId,
        session_id: SessionId,
        title: &str,
    ) -> Result<ChatSession, ChatError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ChatError::validation("title", "must not be empty"));
        }

        let session = self
            .repo
            .update_title(owner, session_id, title)
            .await?
            .ok_or(ChatError::SessionNotFound)?;
        info!(session_id = %session_id, "Session title updated");
        Ok(session)
    }

    /// Delete an owned session and its messages.
    ///
    /// Idempotent: a foreign or missing id is a no-op. Returns whether
    /// anything was removed.
    pub async fn delete(&self, owner: UserId, session_id: SessionId) -> Result<bool, ChatError> {
        let removed = self.repo.delete_session(owner, session_id).await?;
        if removed {
            info!(session_id = %session_id, "Session deleted");
        } else {
            debug!(session_id = %session_id, user_id = %owner, "Delete matched no owned session");
        }
        Ok(removed)
    }

    /// Suggest a title for an arbitrary message list. Nothing is stored.
    ///
    /// A list with no text (including an empty one) gets the fallback
    /// title without a generator call.
    pub async fn summarize_title(&self, messages: &[Message]) -> Result<Generation, ChatError> {
        if messages.iter().all(|m| m.content.trim().is_empty()) {
            debug!("No message text to summarize; using fallback title");
            return Ok(Generation::Degraded {
                text: TITLE_FALLBACK.to_string(),
                reason: "no message text".to_string(),
            });
        }
        Ok(self.titles.generate(messages).await)
    }
}
