//! SQLite user repository implementation.

use careerguide_core::user::repository::UserRepository;
use careerguide_types::error::RepositoryError;
use careerguide_types::identity::ExternalIdentity;
use careerguide_types::user::{User, UserId};
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `UserRepository`.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain User.
struct UserRow {
    id: i64,
    auth_id: String,
    email: Option<String>,
    name: Option<String>,
    created_at: String,
    updated_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            auth_id: row.try_get("auth_id")?,
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_user(self) -> Result<User, RepositoryError> {
        Ok(User {
            id: UserId(self.id),
            auth_id: self.auth_id,
            email: self.email,
            name: self.name,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

const USER_COLUMNS: &str = "id, auth_id, email, name, created_at, updated_at";

impl UserRepository for SqliteUserRepository {
    async fn upsert_user(
        &self,
        identity: &ExternalIdentity,
        at: DateTime<Utc>,
    ) -> Result<User, RepositoryError> {
        let now = format_datetime(&at);
        let sql = format!(
            r#"INSERT INTO users (auth_id, email, name, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)
               ON CONFLICT(auth_id) DO UPDATE
               SET email = excluded.email, name = excluded.name, updated_at = excluded.updated_at
               RETURNING {USER_COLUMNS}"#
        );

        let row = sqlx::query(&sql)
            .bind(&identity.subject)
            .bind(&identity.email)
            .bind(&identity.name)
            .bind(&now)
            .bind(&now)
            .fetch_one(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        UserRow::from_row(&row)
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .into_user()
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let user_row =
                    UserRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(user_row.into_user()?))
            }
            None => Ok(None),
        }
    }
}
