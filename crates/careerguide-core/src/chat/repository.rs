//! ChatRepository trait definition.
//!
//! Every method takes the owner's `UserId` and applies it as a filter in
//! the storage query itself, so a session belonging to another user is
//! indistinguishable from one that does not exist.

use careerguide_types::chat::{ChatMessage, ChatSession, MessageRole, SessionId};
use careerguide_types::error::RepositoryError;
use careerguide_types::user::UserId;
use chrono::{DateTime, Utc};

/// Repository trait for chat session and message persistence.
///
/// Implementations live in careerguide-infra (e.g., `SqliteChatRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatRepository: Send + Sync {
    /// List the owner's sessions, most recently updated first.
    fn list_sessions(
        &self,
        owner: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Get a session if it exists and belongs to `owner`.
    fn get_session(
        &self,
        owner: UserId,
        session_id: SessionId,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Insert a session; `created_at` and `updated_at` are both set to `at`.
    fn create_session(
        &self,
        owner: UserId,
        title: &str,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<ChatSession, RepositoryError>> + Send;

    /// Set the title of an owned session. `None` when nothing matched.
    fn update_title(
        &self,
        owner: UserId,
        session_id: SessionId,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Delete an owned session and its messages. Returns whether a row was removed.
    fn delete_session(
        &self,
        owner: UserId,
        session_id: SessionId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Move `updated_at` forward to `at`; never moves it backwards.
    ///
    /// Returns the stored value afterwards, `None` when the session is not owned.
    fn touch_session(
        &self,
        owner: UserId,
        session_id: SessionId,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<DateTime<Utc>>, RepositoryError>> + Send;

    /// Append a message to an owned session. `None` when the session is not owned.
    fn insert_message(
        &self,
        owner: UserId,
        session_id: SessionId,
        role: MessageRole,
        content: &str,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<ChatMessage>, RepositoryError>> + Send;

    /// All messages of an owned session, oldest first. Empty when not owned.
    fn list_messages(
        &self,
        owner: UserId,
        session_id: SessionId,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;
}
