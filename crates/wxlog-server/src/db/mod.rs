//! Database pool, migrations and repositories

pub mod weather_records;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseConfig;

/// Embedded schema migrations
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Database operation errors with contextual information
#[derive(Error, Debug)]
pub enum DbError {
    /// SQL query or connection error
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Schema migration failed
    #[error("Database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Database configuration is invalid or missing
    #[error("Database configuration error: {0}. Check DATABASE_URL and connection settings.")]
    Config(String),

    /// Requested record does not exist
    #[error("{0}")]
    NotFound(String),
}

impl DbError {
    /// Create a not found error with resource context
    pub fn not_found(resource_type: &str, identifier: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} '{}' not found in database", resource_type, identifier))
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound(_))
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Open the connection pool, creating the database file if it does not exist
pub async fn create_pool(config: &DatabaseConfig) -> DbResult<SqlitePool> {
    if !config.url.starts_with("sqlite:") {
        return Err(DbError::config(format!(
            "unsupported DATABASE_URL '{}', expected a sqlite: URL",
            config.url
        )));
    }

    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| DbError::config(format!("invalid DATABASE_URL '{}': {}", config.url, e)))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect_with(options)
        .await?;

    tracing::info!(
        url = %config.url,
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool created"
    );

    Ok(pool)
}

/// Apply pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations completed");
    Ok(())
}

pub async fn health_check(pool: &SqlitePool) -> DbResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(DbError::from)
}

/// Migrated in-memory database holding a single connection
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}
