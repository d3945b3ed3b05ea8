// ABOUTME: Training session database operations scoped to the owning user
// ABOUTME: CRUD plus the completed-session and date-window queries used by motivation checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use chrono::{DateTime, Utc};
use onper_core::models::{Mood, Training};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{format_timestamp, get_enum, get_timestamp, get_uuid, migration_error, Database};
use onper_core::errors::DatabaseError;

/// Partial session update, absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct TrainingUpdate {
    /// Session date
    pub date: Option<DateTime<Utc>>,
    /// Distance in kilometres
    pub distance: Option<f64>,
    /// Duration in minutes
    pub duration: Option<u32>,
    /// How the runner felt
    pub mood: Option<Mood>,
    /// Completion flag
    pub completed: Option<bool>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Result of applying a [`TrainingUpdate`]
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingUpdateOutcome {
    /// Session as stored after the update
    pub training: Training,
    /// Whether this update moved the session from open to completed
    pub became_completed: bool,
}

impl Database {
    /// Create the trainings table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_trainings(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS trainings (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                distance REAL NOT NULL CHECK (distance >= 0),
                duration INTEGER NOT NULL CHECK (duration >= 0),
                mood TEXT NOT NULL DEFAULT 'NORMAL' CHECK (mood IN ('TIRED', 'NORMAL', 'ENERGIZED')),
                completed INTEGER NOT NULL DEFAULT 0,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| migration_error("trainings", &e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_trainings_user_date ON trainings(user_id, date)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| migration_error("trainings", &e))?;

        Ok(())
    }

    /// Insert a training session
    ///
    /// # Errors
    ///
    /// Returns an error if the owner does not exist or the insert fails
    pub async fn create_training(&self, training: &Training) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            INSERT INTO trainings
                (id, user_id, date, distance, duration, mood, completed, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(training.id.to_string())
        .bind(training.user_id.to_string())
        .bind(format_timestamp(&training.date))
        .bind(training.distance)
        .bind(i64::from(training.duration))
        .bind(training.mood.as_str())
        .bind(training.completed)
        .bind(&training.notes)
        .bind(format_timestamp(&training.created_at))
        .bind(format_timestamp(&training.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List a user's sessions, newest date first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn list_trainings(
        &self,
        user_id: Uuid,
        limit: Option<u32>,
    ) -> Result<Vec<Training>, DatabaseError> {
        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map_or(-1, i64::from);
        let rows = sqlx::query(
            r"
            SELECT * FROM trainings
            WHERE user_id = $1
            ORDER BY date DESC, created_at DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_training).collect()
    }

    /// Get one session if it belongs to `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_training(
        &self,
        training_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Training>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM trainings WHERE id = $1 AND user_id = $2")
            .bind(training_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_training).transpose()
    }

    /// Apply a partial update to an owned session in one transaction
    ///
    /// Only present fields are written, so concurrent updates touching
    /// different columns do not overwrite each other. The open-to-completed
    /// transition is claimed with a conditional write, so exactly one caller
    /// observes `became_completed` for a given session.
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails or the row cannot be decoded
    pub async fn apply_training_update(
        &self,
        training_id: Uuid,
        user_id: Uuid,
        update: &TrainingUpdate,
    ) -> Result<Option<TrainingUpdateOutcome>, DatabaseError> {
        let id = training_id.to_string();
        let owner = user_id.to_string();
        let updated_at = format_timestamp(&Utc::now());
        let mut tx = self.pool.begin().await?;

        let became_completed = if update.completed == Some(true) {
            sqlx::query(
                r"
                UPDATE trainings SET completed = 1, updated_at = $3
                WHERE id = $1 AND user_id = $2 AND completed = 0
                ",
            )
            .bind(&id)
            .bind(&owner)
            .bind(&updated_at)
            .execute(&mut *tx)
            .await?
            .rows_affected()
                == 1
        } else {
            false
        };

        let result = sqlx::query(
            r"
            UPDATE trainings SET
                date = COALESCE($3, date),
                distance = COALESCE($4, distance),
                duration = COALESCE($5, duration),
                mood = COALESCE($6, mood),
                completed = COALESCE($7, completed),
                notes = COALESCE($8, notes),
                updated_at = $9
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(&id)
        .bind(&owner)
        .bind(update.date.as_ref().map(format_timestamp))
        .bind(update.distance)
        .bind(update.duration.map(i64::from))
        .bind(update.mood.map(|mood| mood.as_str()))
        .bind(update.completed)
        .bind(update.notes.as_deref())
        .bind(&updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let row = sqlx::query("SELECT * FROM trainings WHERE id = $1 AND user_id = $2")
            .bind(&id)
            .bind(&owner)
            .fetch_one(&mut *tx)
            .await?;
        let training = Self::row_to_training(&row)?;
        tx.commit().await?;

        Ok(Some(TrainingUpdateOutcome {
            training,
            became_completed,
        }))
    }

    /// Delete a session owned by `user_id`, returning whether a row was removed
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    pub async fn delete_training(
        &self,
        training_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM trainings WHERE id = $1 AND user_id = $2")
            .bind(training_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All completed sessions of a user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn list_completed_trainings(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Training>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT * FROM trainings WHERE user_id = $1 AND completed = 1 ORDER BY date ASC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_training).collect()
    }

    /// First completed session dated at or after `since`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn find_completed_training_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Option<Training>, DatabaseError> {
        let row = sqlx::query(
            r"
            SELECT * FROM trainings
            WHERE user_id = $1 AND completed = 1 AND date >= $2
            ORDER BY date ASC
            LIMIT 1
            ",
        )
        .bind(user_id.to_string())
        .bind(format_timestamp(&since))
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_training).transpose()
    }

    /// Earliest session dated in `[start, end)`, completed or not
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn find_first_training_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<Training>, DatabaseError> {
        let row = sqlx::query(
            r"
            SELECT * FROM trainings
            WHERE user_id = $1 AND date >= $2 AND date < $3
            ORDER BY date ASC, created_at ASC
            LIMIT 1
            ",
        )
        .bind(user_id.to_string())
        .bind(format_timestamp(&start))
        .bind(format_timestamp(&end))
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_training).transpose()
    }

    fn row_to_training(row: &SqliteRow) -> Result<Training, DatabaseError> {
        let duration: i64 = row.try_get("duration")?;
        let duration = u32::try_from(duration).map_err(|_| DatabaseError::InvalidData {
            field: "duration",
            value: duration.to_string(),
        })?;

        Ok(Training {
            id: get_uuid(row, "id")?,
            user_id: get_uuid(row, "user_id")?,
            date: get_timestamp(row, "date")?,
            distance: row.try_get("distance")?,
            duration,
            mood: get_enum(row, "mood")?,
            completed: row.try_get("completed")?,
            notes: row.try_get("notes")?,
            created_at: get_timestamp(row, "created_at")?,
            updated_at: get_timestamp(row, "updated_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use onper_core::models::{Goal, Level, User};

    async fn setup() -> (Database, Uuid) {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let user = User::new(
            "t@example.com".to_owned(),
            "Trainer".to_owned(),
            "hash".to_owned(),
            Goal::Full,
            Level::Beginner,
        );
        db.create_user(&user).await.unwrap();
        (db, user.id)
    }

    fn session(user_id: Uuid, date: DateTime<Utc>, completed: bool) -> Training {
        let now = Utc::now();
        Training {
            id: Uuid::new_v4(),
            user_id,
            date,
            distance: 5.0,
            duration: 30,
            mood: Mood::Normal,
            completed,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_date_desc_with_limit() {
        let (db, user_id) = setup().await;
        let now = Utc::now();
        for days in [3, 1, 2] {
            db.create_training(&session(user_id, now - Duration::days(days), true))
                .await
                .unwrap();
        }

        let all = db.list_trainings(user_id, None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|pair| pair[0].date >= pair[1].date));

        let limited = db.list_trainings(user_id, Some(2)).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].id, all[0].id);
    }

    #[tokio::test]
    async fn test_sessions_are_scoped_to_owner() {
        let (db, user_id) = setup().await;
        let training = session(user_id, Utc::now(), false);
        db.create_training(&training).await.unwrap();

        let stranger = Uuid::new_v4();
        assert!(db.get_training(training.id, stranger).await.unwrap().is_none());
        assert!(!db.delete_training(training.id, stranger).await.unwrap());
        assert!(db.delete_training(training.id, user_id).await.unwrap());
        assert!(db.get_training(training.id, user_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_writes_only_present_fields() {
        let (db, user_id) = setup().await;
        let mut training = session(user_id, Utc::now(), false);
        training.notes = Some("easy pace".to_owned());
        db.create_training(&training).await.unwrap();

        let outcome = db
            .apply_training_update(
                training.id,
                user_id,
                &TrainingUpdate {
                    completed: Some(true),
                    mood: Some(Mood::Energized),
                    ..TrainingUpdate::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(outcome.became_completed);
        assert_eq!(outcome.training.mood, Mood::Energized);

        let stored = db.get_training(training.id, user_id).await.unwrap().unwrap();
        assert!(stored.completed);
        assert_eq!(stored.notes.as_deref(), Some("easy pace"));
        assert_eq!(stored.duration, 30);
        assert!((stored.distance - 5.0).abs() < f64::EPSILON);
        assert!(stored.updated_at >= training.updated_at);
    }

    #[tokio::test]
    async fn test_completion_transition_is_reported_once() {
        let (db, user_id) = setup().await;
        let training = session(user_id, Utc::now(), false);
        db.create_training(&training).await.unwrap();
        let complete = TrainingUpdate {
            completed: Some(true),
            ..TrainingUpdate::default()
        };

        let first = db.apply_training_update(training.id, user_id, &complete).await.unwrap().unwrap();
        let second = db.apply_training_update(training.id, user_id, &complete).await.unwrap().unwrap();

        assert!(first.became_completed);
        assert!(!second.became_completed);
        assert!(second.training.completed);
    }

    #[tokio::test]
    async fn test_update_of_foreign_session_is_none() {
        let (db, user_id) = setup().await;
        let training = session(user_id, Utc::now(), false);
        db.create_training(&training).await.unwrap();

        let outcome = db
            .apply_training_update(
                training.id,
                Uuid::new_v4(),
                &TrainingUpdate {
                    completed: Some(true),
                    ..TrainingUpdate::default()
                },
            )
            .await
            .unwrap();

        assert!(outcome.is_none());
        let stored = db.get_training(training.id, user_id).await.unwrap().unwrap();
        assert!(!stored.completed);
    }

    #[tokio::test]
    async fn test_date_window_queries() {
        let (db, user_id) = setup().await;
        let now = Utc::now();
        let yesterday = session(user_id, now - Duration::days(1), false);
        db.create_training(&yesterday).await.unwrap();

        let found = db
            .find_first_training_between(user_id, now - Duration::days(2), now)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, yesterday.id);

        assert!(db
            .find_completed_training_since(user_id, now - Duration::days(2))
            .await
            .unwrap()
            .is_none());
        assert!(db.list_completed_trainings(user_id).await.unwrap().is_empty());
    }
}
