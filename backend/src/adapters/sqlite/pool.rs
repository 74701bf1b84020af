//! SQLite pool construction and schema migration.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Opens the pool described by `config`, creating the database file and its
/// parent directory when missing, and applies migrations if enabled.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DomainError> {
    let file_path = config.file_path();

    if let Some(parent) = file_path.as_deref().and_then(|p| p.parent()) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to create database directory: {}", e),
                )
                .with_detail("path", parent.display().to_string())
            })?;
        }
    }

    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid database URL: {}", e))
        })?
        .create_if_missing(true);

    let mut pool_options = SqlitePoolOptions::new().acquire_timeout(config.acquire_timeout());
    pool_options = if file_path.is_some() {
        pool_options.max_connections(config.max_connections)
    } else {
        // Every connection to `:memory:` is its own database; keep exactly one alive.
        pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    };

    let pool = pool_options.connect_with(options).await.map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to open database: {}", e))
    })?;

    if config.run_migrations {
        migrate(&pool).await?;
    }

    Ok(pool)
}

/// Applies pending schema migrations.
pub async fn migrate(pool: &SqlitePool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations").run(pool).await.map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to run migrations: {}", e))
    })
}

/// Fresh, migrated in-memory database.
pub async fn connect_in_memory() -> Result<SqlitePool, DomainError> {
    connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        run_migrations: true,
        ..Default::default()
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("data").join("conferences.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            ..Default::default()
        };

        let pool = connect(&config).await.unwrap();

        assert!(db_path.exists());
        let tables: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'conferences'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(tables.0, 1);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = connect_in_memory().await.unwrap();
        assert!(migrate(&pool).await.is_ok());
    }

    #[tokio::test]
    async fn skips_migrations_when_disabled() {
        let pool = connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            run_migrations: false,
            ..Default::default()
        })
        .await
        .unwrap();

        let tables: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'conferences'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(tables.0, 0);
    }
}
