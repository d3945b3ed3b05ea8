// ABOUTME: SQLite database manager with schema migrations and shared row helpers
// ABOUTME: Owns the connection pool used by users, trainings, and motivation log storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

//! # Database Management
//!
//! `SQLite` storage for users, training sessions, and motivation logs.
//! Identifiers are stored as hyphenated UUID text and timestamps as
//! fixed-width RFC 3339 text in UTC, so string comparison in SQL orders
//! rows chronologically.

mod motivation_logs;
mod trainings;
mod users;

/// Repository traits and their `SQLite` implementations
pub mod repositories;

pub use onper_core::errors::DatabaseError;
pub use trainings::{TrainingUpdate, TrainingUpdateOutcome};
pub use users::ProfileUpdate;

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tokio::fs;
use tracing::info;
use uuid::Uuid;

/// Pool size for file-backed databases
const MAX_FILE_CONNECTIONS: u32 = 5;

/// Database manager for all persisted records
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the parent directory cannot be
    /// created, the connection fails, or a migration fails
    pub async fn new(database_url: &str) -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| DatabaseError::ConnectionError {
                context: format!("Invalid database URL '{database_url}': {e}"),
            })?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `:memory:` is a separate database, so keep exactly one alive
        let in_memory = database_url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            Self::ensure_parent_dir(options.get_filename()).await?;
            SqlitePoolOptions::new().max_connections(MAX_FILE_CONNECTIONS)
        };

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            DatabaseError::ConnectionError {
                context: format!("Failed to open {database_url}: {e}"),
            }
        })?;

        let db = Self { pool };
        db.migrate().await?;

        info!(database_url, in_memory, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run idempotent schema migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        self.migrate_users().await?;
        self.migrate_trainings().await?;
        self.migrate_motivation_logs().await?;
        Ok(())
    }

    /// Close the pool, waiting for in-flight queries
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn ensure_parent_dir(path: &Path) -> Result<(), DatabaseError> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| DatabaseError::ConnectionError {
                        context: format!("Cannot create {}: {e}", parent.display()),
                    })
            }
            _ => Ok(()),
        }
    }
}

/// Map a schema statement failure to a migration error
pub(crate) fn migration_error(table: &str, error: &sqlx::Error) -> DatabaseError {
    DatabaseError::MigrationError {
        context: format!("{table}: {error}"),
    }
}

/// Storage form of a timestamp
pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Read a UUID column
pub(crate) fn get_uuid(row: &SqliteRow, column: &'static str) -> Result<Uuid, DatabaseError> {
    let raw: String = row.try_get(column)?;
    Uuid::parse_str(&raw).map_err(|_| DatabaseError::InvalidData {
        field: column,
        value: raw,
    })
}

/// Read a timestamp column
pub(crate) fn get_timestamp(
    row: &SqliteRow,
    column: &'static str,
) -> Result<DateTime<Utc>, DatabaseError> {
    let raw: String = row.try_get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| DatabaseError::InvalidData {
            field: column,
            value: raw,
        })
}

/// Read an enumeration column through its `FromStr`
pub(crate) fn get_enum<T: FromStr>(
    row: &SqliteRow,
    column: &'static str,
) -> Result<T, DatabaseError> {
    let raw: String = row.try_get(column)?;
    raw.parse()
        .map_err(|_| DatabaseError::InvalidData { field: column, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_migrates_twice() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();

        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(db.pool())
                .await
                .unwrap();
        assert!(tables.contains(&"users".to_owned()));
        assert!(tables.contains(&"trainings".to_owned()));
        assert!(tables.contains(&"motivation_logs".to_owned()));
    }

    #[test]
    fn test_timestamp_format_is_fixed_width() {
        let early = DateTime::parse_from_rfc3339("2025-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let late = DateTime::parse_from_rfc3339("2025-01-02T03:04:05.5Z")
            .unwrap()
            .with_timezone(&Utc);

        let (a, b) = (format_timestamp(&early), format_timestamp(&late));
        assert_eq!(a.len(), b.len());
        assert!(a < b);
        assert_eq!(a, "2025-01-02T03:04:05.000000Z");
    }
}
