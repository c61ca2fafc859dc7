use async_trait::async_trait;
use jiff::Timestamp;
use linkhop_core::repository::{ReadRepository, Repository, Result};
use linkhop_core::{Destination, LinkMapping, StorageError, Token};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::info;

const SCHEMA: &str = include_str!("../ddl/sqlite/links.sql");

/// SQLite implementation of the repository contract.
///
/// Token uniqueness is enforced by the primary key, so a single `INSERT`
/// is the atomic insert-if-absent. Rows are never updated or deleted.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a repository from an existing pool. The schema must exist.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `database_url` and
    /// applies the schema.
    ///
    /// `sqlite::memory:` databases live and die with their connection, so
    /// they get a single connection that is never recycled.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);

        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let repository = Self::new(pool);
        repository.migrate().await?;
        info!(database_url, "sqlite repository ready");
        Ok(repository)
    }

    /// Applies the `links` table schema. Safe to run repeatedly.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Number of committed mappings.
    pub async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM links")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        let total: i64 = row.try_get("total").map_err(map_sqlx_error)?;
        u64::try_from(total)
            .map_err(|_| StorageError::InvalidData(format!("negative row count: {total}")))
    }

    /// All committed tokens starting with `prefix`.
    pub async fn tokens_with_prefix(&self, prefix: &str) -> Result<Vec<Token>> {
        let rows = sqlx::query(
            r#"
            SELECT token
            FROM links
            WHERE substr(token, 1, ?) = ?
            "#,
        )
        .bind(prefix.chars().count() as i64)
        .bind(prefix)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("token")
                    .map(Token::new_unchecked)
                    .map_err(map_sqlx_error)
            })
            .collect()
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn parse_created_at(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", seconds))
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Configuration(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for SqliteRepository {
    async fn get(&self, token: &Token) -> Result<Option<LinkMapping>> {
        let row = sqlx::query(
            r#"
            SELECT destination, created_at
            FROM links
            WHERE token = ?
            LIMIT 1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let destination: String = row.try_get("destination").map_err(map_sqlx_error)?;
        let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

        Ok(Some(LinkMapping {
            token: token.clone(),
            destination: Destination::from_trusted(destination),
            created_at: parse_created_at(created_at)?,
        }))
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn insert(&self, mapping: LinkMapping) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO links (token, destination, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(mapping.token.as_str())
        .bind(mapping.destination.as_str())
        .bind(mapping.created_at.as_second())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(mapping.token.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
