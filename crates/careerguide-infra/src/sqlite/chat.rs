//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `careerguide-core` using sqlx with split
//! read/write pools. Every statement carries the owner filter, including
//! the message insert, which only writes when the session is owned.

use careerguide_core::chat::repository::ChatRepository;
use careerguide_types::chat::{ChatMessage, ChatSession, MessageId, MessageRole, SessionId};
use careerguide_types::error::RepositoryError;
use careerguide_types::user::UserId;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `ChatRepository`.
#[derive(Clone)]
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

const SESSION_COLUMNS: &str = "id, user_id, title, created_at, updated_at";
const MESSAGE_COLUMNS: &str = "id, session_id, role, content, created_at";

/// Internal row type for mapping SQLite rows to domain ChatSession.
struct ChatSessionRow {
    id: i64,
    user_id: i64,
    title: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ChatSessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_session(self) -> Result<ChatSession, RepositoryError> {
        Ok(ChatSession {
            id: SessionId(self.id),
            user_id: UserId(self.user_id),
            title: self.title,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain ChatMessage.
struct ChatMessageRow {
    id: i64,
    session_id: i64,
    role: String,
    content: String,
    created_at: String,
}

impl ChatMessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(ChatMessage {
            id: MessageId(self.id),
            session_id: SessionId(self.session_id),
            role,
            content: self.content,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

fn session_from(row: &sqlx::sqlite::SqliteRow) -> Result<ChatSession, RepositoryError> {
    ChatSessionRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_session()
}

fn message_from(row: &sqlx::sqlite::SqliteRow) -> Result<ChatMessage, RepositoryError> {
    ChatMessageRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_message()
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn list_sessions(&self, owner: UserId) -> Result<Vec<ChatSession>, RepositoryError> {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE user_id = ? ORDER BY updated_at DESC, id DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(owner.0)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(session_from).collect()
    }

    async fn get_session(
        &self,
        owner: UserId,
        session_id: SessionId,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ? AND user_id = ?");
        let row = sqlx::query(&sql)
            .bind(session_id.0)
            .bind(owner.0)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(session_from).transpose()
    }

    async fn create_session(
        &self,
        owner: UserId,
        title: &str,
        at: DateTime<Utc>,
    ) -> Result<ChatSession, RepositoryError> {
        let now = format_datetime(&at);
        let sql = format!(
            r#"INSERT INTO sessions (user_id, title, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               RETURNING {SESSION_COLUMNS}"#
        );
        let row = sqlx::query(&sql)
            .bind(owner.0)
            .bind(title)
            .bind(&now)
            .bind(&now)
            .fetch_one(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        session_from(&row)
    }

    async fn update_title(
        &self,
        owner: UserId,
        session_id: SessionId,
        title: &str,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let sql = format!(
            "UPDATE sessions SET title = ? WHERE id = ? AND user_id = ? RETURNING {SESSION_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(title)
            .bind(session_id.0)
            .bind(owner.0)
            .fetch_optional(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(session_from).transpose()
    }

    async fn delete_session(
        &self,
        owner: UserId,
        session_id: SessionId,
    ) -> Result<bool, RepositoryError> {
        // Messages go with it via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM sessions WHERE id = ? AND user_id = ?")
            .bind(session_id.0)
            .bind(owner.0)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn touch_session(
        &self,
        owner: UserId,
        session_id: SessionId,
        at: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, RepositoryError> {
        let row = sqlx::query(
            r#"UPDATE sessions SET updated_at = MAX(updated_at, ?)
               WHERE id = ? AND user_id = ?
               RETURNING updated_at"#,
        )
        .bind(format_datetime(&at))
        .bind(session_id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let updated_at: String = row
                    .try_get("updated_at")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(parse_datetime(&updated_at)?))
            }
            None => Ok(None),
        }
    }

    async fn insert_message(
        &self,
        owner: UserId,
        session_id: SessionId,
        role: MessageRole,
        content: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<ChatMessage>, RepositoryError> {
        let sql = format!(
            r#"INSERT INTO messages (session_id, role, content, created_at)
               SELECT ?, ?, ?, ?
               WHERE EXISTS (SELECT 1 FROM sessions WHERE id = ? AND user_id = ?)
               RETURNING {MESSAGE_COLUMNS}"#
        );
        let row = sqlx::query(&sql)
            .bind(session_id.0)
            .bind(role.to_string())
            .bind(content)
            .bind(format_datetime(&at))
            .bind(session_id.0)
            .bind(owner.0)
            .fetch_optional(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(message_from).transpose()
    }

    async fn list_messages(
        &self,
        owner: UserId,
        session_id: SessionId,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT m.id, m.session_id, m.role, m.content, m.created_at
               FROM messages m
               JOIN sessions s ON s.id = m.session_id
               WHERE m.session_id = ? AND s.user_id = ?
               ORDER BY m.created_at ASC, m.id ASC"#,
        )
        .bind(session_id.0)
        .bind(owner.0)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(message_from).collect()
    }
}
