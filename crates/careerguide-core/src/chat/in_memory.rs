//! In-memory `ChatRepository` for service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use careerguide_types::chat::{ChatMessage, ChatSession, MessageId, MessageRole, SessionId};
use careerguide_types::error::RepositoryError;
use careerguide_types::user::UserId;
use chrono::{DateTime, Utc};

use super::repository::ChatRepository;

#[derive(Default)]
struct Tables {
    sessions: Vec<ChatSession>,
    messages: Vec<ChatMessage>,
    next_session_id: i64,
    next_message_id: i64,
}

#[derive(Default)]
pub struct InMemoryChatRepository {
    tables: Mutex<Tables>,
    /// When set, assistant-role inserts fail with a query error.
    pub fail_assistant_inserts: AtomicBool,
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message_count(&self) -> usize {
        self.tables.lock().unwrap().messages.len()
    }
}

impl ChatRepository for InMemoryChatRepository {
    async fn list_sessions(&self, owner: UserId) -> Result<Vec<ChatSession>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        let mut sessions: Vec<ChatSession> = tables
            .sessions
            .iter()
            .filter(|s| s.user_id == owner)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(sessions)
    }

    async fn get_session(
        &self,
        owner: UserId,
        session_id: SessionId,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .sessions
            .iter()
            .find(|s| s.id == session_id && s.user_id == owner)
            .cloned())
    }

    async fn create_session(
        &self,
        owner: UserId,
        title: &str,
        at: DateTime<Utc>,
    ) -> Result<ChatSession, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_session_id += 1;
        let session = ChatSession {
            id: SessionId(tables.next_session_id),
            user_id: owner,
            title: Some(title.to_string()),
            created_at: at,
            updated_at: at,
        };
        tables.sessions.push(session.clone());
        Ok(session)
    }

    async fn update_title(
        &self,
        owner: UserId,
        session_id: SessionId,
        title: &str,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id && s.user_id == owner)
            .map(|s| {
                s.title = Some(title.to_string());
                s.clone()
            }))
    }

    async fn delete_session(
        &self,
        owner: UserId,
        session_id: SessionId,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.sessions.len();
        tables
            .sessions
            .retain(|s| !(s.id == session_id && s.user_id == owner));
        let removed = tables.sessions.len() < before;
        if removed {
            tables.messages.retain(|m| m.session_id != session_id);
        }
        Ok(removed)
    }

    async fn touch_session(
        &self,
        owner: UserId,
        session_id: SessionId,
        at: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id && s.user_id == owner)
            .map(|s| {
                s.updated_at = s.updated_at.max(at);
                s.updated_at
            }))
    }

    async fn insert_message(
        &self,
        owner: UserId,
        session_id: SessionId,
        role: MessageRole,
        content: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<ChatMessage>, RepositoryError> {
        if role == MessageRole::Assistant && self.fail_assistant_inserts.load(Ordering::SeqCst) {
            return Err(RepositoryError::Query("disk I/O error".to_string()));
        }
        let mut tables = self.tables.lock().unwrap();
        let owned = tables
            .sessions
            .iter()
            .any(|s| s.id == session_id && s.user_id == owner);
        if !owned {
            return Ok(None);
        }
        tables.next_message_id += 1;
        let message = ChatMessage {
            id: MessageId(tables.next_message_id),
            session_id,
            role,
            content: content.to_string(),
            created_at: at,
        };
        tables.messages.push(message.clone());
        Ok(Some(message))
    }

    async fn list_messages(
        &self,
        owner: UserId,
        session_id: SessionId,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        let owned = tables
            .sessions
            .iter()
            .any(|s| s.id == session_id && s.user_id == owner);
        if !owned {
            return Ok(Vec::new());
        }
        let mut messages: Vec<ChatMessage> = tables
            .messages
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(messages)
    }
}
