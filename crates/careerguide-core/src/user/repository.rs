//! UserRepository trait definition.

use careerguide_types::error::RepositoryError;
use careerguide_types::identity::ExternalIdentity;
use careerguide_types::user::{User, UserId};
use chrono::{DateTime, Utc};

/// Repository trait for local user records.
///
/// Implementations live in careerguide-infra (e.g., `SqliteUserRepository`).
pub trait UserRepository: Send + Sync {
    /// Insert the user for `identity.subject`, or refresh email/name if it exists.
    ///
    /// Must be a single atomic statement so concurrent first requests from
    /// the same identity converge on one row.
    fn upsert_user(
        &self,
        identity: &ExternalIdentity,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    fn get_user(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;
}
