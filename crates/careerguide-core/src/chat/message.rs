//! Message listing and the send-message workflow.
//!
//! A send persists the caller's message before anything external is
//! attempted, so a reply failure can never lose it. Reply and title
//! generation are best effort and never abort a send.

use std::sync::Arc;

use careerguide_types::chat::{ChatMessage, ChatSession, Exchange, MessageRole, SessionId};
use careerguide_types::error::ChatError;
use careerguide_types::llm::{Generation, Message};
use careerguide_types::user::UserId;
use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, error, info, warn};

use crate::chat::repository::ChatRepository;
use crate::llm::reply::ReplyGenerator;
use crate::llm::title::{MAX_TITLE_CHARS, TitleGenerator, truncate_chars};

/// Lists messages and orchestrates sending one.
pub struct MessageService<C: ChatRepository> {
    repo: Arc<C>,
    replies: Arc<ReplyGenerator>,
    titles: Arc<TitleGenerator>,
}

impl<C: ChatRepository> MessageService<C> {
    pub fn new(repo: Arc<C>, replies: Arc<ReplyGenerator>, titles: Arc<TitleGenerator>) -> Self {
        Self {
            repo,
            replies,
            titles,
        }
    }

    /// Messages of an owned session, oldest first; empty when not owned.
    pub async fn list(
        &self,
        owner: UserId,
        session_id: SessionId,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.repo.list_messages(owner, session_id).await?)
    }

    /// Send `content` to an owned session and store the assistant's reply.
    ///
    /// On the session's first exchange, a title is derived when the session
    /// still has the placeholder title (see [`Self::derive_title`]).
    #[tracing::instrument(name = "send_message", skip_all, fields(user_id = %owner, session_id = %session_id))]
    pub async fn send_message(
        &self,
        owner: UserId,
        session_id: SessionId,
        content: &str,
    ) -> Result<Exchange, ChatError> {
        if content.trim().is_empty() {
            return Err(ChatError::validation("content", "must not be empty"));
        }

        let session = self
            .repo
            .get_session(owner, session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;

        let user = self
            .repo
            .insert_message(owner, session_id, MessageRole::User, content, Utc::now())
            .await?
            .ok_or(ChatError::SessionNotFound)?;

        let history = self.repo.list_messages(owner, session_id).await?;
        let first_exchange = history.iter().all(|m| m.id == user.id);
        let prompt: Vec<Message> = history
            .iter()
            .map(|m| Message::new(m.role, m.content.clone()))
            .collect();

        let reply = self.replies.generate(&prompt).await;
        if let Generation::Degraded { reason, .. } = &reply {
            warn!(%reason, "Reply degraded; storing fallback text");
        }

        let assistant = match self
            .repo
            .insert_message(
                owner,
                session_id,
                MessageRole::Assistant,
                reply.text(),
                Utc::now(),
            )
            .await
        {
            Ok(Some(message)) => message,
            Ok(None) => {
                warn!(user_message_id = %user.id, "Session vanished before the reply was stored");
                return Err(ChatError::SessionNotFound);
            }
            Err(err) => {
                error!(
                    user_message_id = %user.id,
                    error = %err,
                    "Failed to store assistant reply; user message is persisted without one"
                );
                return Err(err.into());
            }
        };

        let touched_at = next_touch(session.updated_at, Utc::now());
        self.repo.touch_session(owner, session_id, touched_at).await?;

        if first_exchange && session.has_placeholder_title() {
            self.derive_title(owner, &session, &user, &assistant).await;
        }

        info!(
            user_message_id = %user.id,
            assistant_message_id = %assistant.id,
            "Message exchange stored"
        );
        Ok(Exchange { user, assistant })
    }

    /// Title the session after its first exchange.
    ///
    /// Uses the title generator; when that degrades, the caller's message
    /// truncated to 60 characters becomes the title. Failures to store the
    /// title are logged and otherwise ignored.
    async fn derive_title(
        &self,
        owner: UserId,
        session: &ChatSession,
        user: &ChatMessage,
        assistant: &ChatMessage,
    ) {
        let excerpt = [
            Message::new(MessageRole::User, user.content.clone()),
            Message::new(MessageRole::Assistant, assistant.content.clone()),
        ];

        let title = match self.titles.generate(&excerpt).await {
            Generation::Generated { text, .. } => text,
            Generation::Degraded { reason, .. } => {
                debug!(%reason, "Title generation degraded; truncating first message");
                title_from_content(&user.content)
            }
        };

        match self.repo.update_title(owner, session.id, &title).await {
            Ok(Some(_)) => info!(session_id = %session.id, "Session title derived"),
            Ok(None) => warn!(session_id = %session.id, "Session vanished before its title was stored"),
            Err(err) => warn!(session_id = %session.id, error = %err, "Failed to store derived title"),
        }
    }
}

/// Collapse whitespace in `content` and cap it at the title length.
pub fn title_from_content(content: &str) -> String {
    let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, MAX_TITLE_CHARS)
}

/// The next `updated_at` value: now, but always strictly after `previous`.
pub fn next_touch(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(previous + TimeDelta::microseconds(1))
}
