//! SQLite connection pools for the chat store.
//!
//! WAL lets readers proceed while a write is in progress, but SQLite still
//! serializes writers. Reads therefore go through a pool of read-only
//! connections and every mutation goes through a single writer connection.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

const READER_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Reader and writer pools over one database file.
#[derive(Clone)]
pub struct DatabasePool {
    /// Read-only connections for SELECTs.
    pub reader: SqlitePool,
    /// The single connection all writes share.
    pub writer: SqlitePool,
}

/// A row of `_sqlx_migrations` that finished successfully.
#[derive(Debug, Clone)]
pub struct AppliedMigration {
    pub version: i64,
    pub description: String,
}

impl DatabasePool {
    /// Open (creating if needed) the database at `database_url`.
    ///
    /// Pending migrations are applied on the writer before any reader
    /// connection exists, so readers always see the current schema.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await?;
        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(READER_CONNECTIONS)
            .connect_with(options.read_only(true))
            .await?;

        tracing::debug!(url = %database_url, "Database pools opened");
        Ok(Self { reader, writer })
    }

    /// Migrations recorded as applied, oldest first.
    pub async fn applied_migrations(&self) -> Result<Vec<AppliedMigration>, sqlx::Error> {
        sqlx::query(
            "SELECT version, description FROM _sqlx_migrations WHERE success = 1 ORDER BY version",
        )
        .fetch_all(&self.reader)
        .await?
        .iter()
        .map(|row| {
            Ok(AppliedMigration {
                version: row.try_get("version")?,
                description: row.try_get("description")?,
            })
        })
        .collect()
    }

    /// Close both pools, waiting for in-flight queries.
    pub async fn close(&self) {
        self.writer.close().await;
        self.reader.close().await;
    }
}

/// Default database URL: `{data_dir}/careerguide.db`, created if missing.
pub fn default_database_url(data_dir: &Path) -> String {
    format!(
        "sqlite://{}?mode=rwc",
        data_dir.join("careerguide.db").display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open(name: &str) -> (tempfile::TempDir, DatabasePool) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join(name);
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, pool)
    }

    #[tokio::test]
    async fn test_schema_tables_exist() {
        let (_dir, pool) = open("schema.db").await;

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(&pool.reader)
        .await
        .unwrap();

        let table_names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert_eq!(table_names, vec!["messages", "sessions", "users"]);
    }

    #[tokio::test]
    async fn test_writer_pragmas() {
        let (_dir, pool) = open("pragmas.db").await;

        let (journal,): (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool.writer)
            .await
            .unwrap();
        let (foreign_keys,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool.writer)
            .await
            .unwrap();

        assert_eq!(journal.to_lowercase(), "wal");
        assert_eq!(foreign_keys, 1);
    }

    #[tokio::test]
    async fn test_reader_is_read_only() {
        let (_dir, pool) = open("test_ro.db").await;

        let result = sqlx::query(
            "INSERT INTO users (auth_id, created_at, updated_at) VALUES ('x', 'a', 'a')",
        )
        .execute(&pool.reader)
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_applied_migrations_listed() {
        let (_dir, pool) = open("test_migrations.db").await;
        let applied = pool.applied_migrations().await.unwrap();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].version, 1);
        assert_eq!(applied[0].description, "init");
    }

    #[test]
    fn test_default_database_url() {
        let url = default_database_url(Path::new("/tmp/cg"));
        assert!(url.starts_with("sqlite://"));
        assert!(url.contains("careerguide.db"));
    }
}
