// ABOUTME: Motivation log database operations
// ABOUTME: Append-only history of motivational messages delivered to each user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use onper_core::models::MotivationLog;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{format_timestamp, get_enum, get_timestamp, get_uuid, migration_error, Database};
use onper_core::errors::DatabaseError;

impl Database {
    /// Create the motivation_logs table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_motivation_logs(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS motivation_logs (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                trigger_type TEXT NOT NULL CHECK (trigger_type IN ('COMPLETED', 'MISSED', 'MILESTONE', 'REMINDER')),
                message TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| migration_error("motivation_logs", &e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_motivation_logs_user_created ON motivation_logs(user_id, created_at)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| migration_error("motivation_logs", &e))?;

        Ok(())
    }

    /// Append a motivation log entry
    ///
    /// # Errors
    ///
    /// Returns an error if the owner does not exist or the insert fails
    pub async fn create_motivation_log(&self, log: &MotivationLog) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            INSERT INTO motivation_logs (id, user_id, trigger_type, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(log.id.to_string())
        .bind(log.user_id.to_string())
        .bind(log.trigger.as_str())
        .bind(&log.message)
        .bind(format_timestamp(&log.created_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Most recent entries first, at most `limit`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn list_motivation_logs(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<MotivationLog>, DatabaseError> {
        // rowid breaks ties between entries written in the same microsecond
        let rows = sqlx::query(
            r"
            SELECT * FROM motivation_logs
            WHERE user_id = $1
            ORDER BY created_at DESC, rowid DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_motivation_log).collect()
    }

    /// Newest entry, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn latest_motivation_log(
        &self,
        user_id: Uuid,
    ) -> Result<Option<MotivationLog>, DatabaseError> {
        Ok(self.list_motivation_logs(user_id, 1).await?.into_iter().next())
    }

    fn row_to_motivation_log(row: &SqliteRow) -> Result<MotivationLog, DatabaseError> {
        Ok(MotivationLog {
            id: get_uuid(row, "id")?,
            user_id: get_uuid(row, "user_id")?,
            trigger: get_enum(row, "trigger_type")?,
            message: row.try_get("message")?,
            created_at: get_timestamp(row, "created_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onper_core::models::{Goal, Level, TriggerType, User};

    #[tokio::test]
    async fn test_history_is_newest_first() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let user = User::new(
            "m@example.com".to_owned(),
            "Motivated".to_owned(),
            "hash".to_owned(),
            Goal::TenK,
            Level::Beginner,
        );
        db.create_user(&user).await.unwrap();

        assert!(db.latest_motivation_log(user.id).await.unwrap().is_none());

        for trigger in [TriggerType::Completed, TriggerType::Reminder, TriggerType::Milestone] {
            let log = MotivationLog::new(user.id, trigger, format!("{trigger} message"));
            db.create_motivation_log(&log).await.unwrap();
        }

        let history = db.list_motivation_logs(user.id, 2).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].trigger, TriggerType::Milestone);
        assert_eq!(history[1].trigger, TriggerType::Reminder);

        let latest = db.latest_motivation_log(user.id).await.unwrap().unwrap();
        assert_eq!(latest.id, history[0].id);
    }
}
