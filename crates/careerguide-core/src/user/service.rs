use careerguide_types::error::RepositoryError;
use careerguide_types::identity::ExternalIdentity;
use careerguide_types::user::{User, UserId};
use chrono::Utc;

use super::repository::UserRepository;

/// Ensures a local user exists for every authenticated identity.
pub struct UserService<U: UserRepository> {
    repo: U,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(repo: U) -> Self {
        Self { repo }
    }

    /// Create-if-absent the local user for `identity`, refreshing email/name.
    pub async fn ensure_user(&self, identity: &ExternalIdentity) -> Result<User, RepositoryError> {
        let user = self.repo.upsert_user(identity, Utc::now()).await?;
        tracing::debug!(user_id = %user.id, "Caller user ensured");
        Ok(user)
    }

    pub async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        self.repo.get_user(id).await
    }
}
