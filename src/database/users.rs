// ABOUTME: User account database operations
// ABOUTME: Handles registration inserts, lookups by id or email, and profile updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use chrono::Utc;
use onper_core::models::{Goal, Level, User};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{format_timestamp, get_enum, get_timestamp, get_uuid, migration_error, Database};
use onper_core::errors::DatabaseError;

/// Partial profile update, absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,
    /// New training goal
    pub goal: Option<Goal>,
    /// New experience level
    pub level: Option<Level>,
}

impl ProfileUpdate {
    /// True when no field would change
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.goal.is_none() && self.level.is_none()
    }
}

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_users(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                goal TEXT NOT NULL DEFAULT 'FULL' CHECK (goal IN ('FIVE_K', 'TEN_K', 'HALF', 'FULL')),
                level TEXT NOT NULL DEFAULT 'BEGINNER' CHECK (level IN ('BEGINNER', 'INTERMEDIATE', 'ADVANCED')),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| migration_error("users", &e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await
            .map_err(|e| migration_error("users", &e))?;

        Ok(())
    }

    /// Insert a new user
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Duplicate`] if the email is already registered
    pub async fn create_user(&self, user: &User) -> Result<Uuid, DatabaseError> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, name, password_hash, goal, level, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.goal.as_str())
        .bind(user.level.as_str())
        .bind(format_timestamp(&user.created_at))
        .bind(format_timestamp(&user.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| match DatabaseError::from(e) {
            DatabaseError::Duplicate { .. } => DatabaseError::Duplicate {
                entity_type: "User",
                detail: user.email.clone(),
            },
            other => other,
        })?;

        Ok(user.id)
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    /// Get a user by exact email
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    /// Apply a profile update and return the stored user
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the user does not exist
    pub async fn update_user_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<User, DatabaseError> {
        let mut user = self
            .get_user(user_id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound {
                entity_type: "User",
                entity_id: user_id.to_string(),
            })?;

        if update.is_empty() {
            return Ok(user);
        }

        if let Some(name) = &update.name {
            user.name.clone_from(name);
        }
        if let Some(goal) = update.goal {
            user.goal = goal;
        }
        if let Some(level) = update.level {
            user.level = level;
        }
        user.updated_at = Utc::now();

        sqlx::query(
            r"
            UPDATE users SET name = $2, goal = $3, level = $4, updated_at = $5
            WHERE id = $1
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(user.goal.as_str())
        .bind(user.level.as_str())
        .bind(format_timestamp(&user.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    fn row_to_user(row: &SqliteRow) -> Result<User, DatabaseError> {
        Ok(User {
            id: get_uuid(row, "id")?,
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            password_hash: row.try_get("password_hash")?,
            goal: get_enum(row, "goal")?,
            level: get_enum(row, "level")?,
            created_at: get_timestamp(row, "created_at")?,
            updated_at: get_timestamp(row, "updated_at")?,
        })
    }
}
