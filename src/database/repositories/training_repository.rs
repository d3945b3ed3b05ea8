// ABOUTME: Training session repository implementation
// ABOUTME: Owner-scoped CRUD and date-window lookups over the SQLite database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use onper_core::errors::DatabaseError;
use onper_core::models::Training;
use uuid::Uuid;

use super::TrainingRepository;
use crate::database::{Database, TrainingUpdate, TrainingUpdateOutcome};

/// `SQLite` implementation of `TrainingRepository`
#[derive(Clone)]
pub struct TrainingRepositoryImpl {
    db: Database,
}

impl TrainingRepositoryImpl {
    /// Create a new `TrainingRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TrainingRepository for TrainingRepositoryImpl {
    async fn create(&self, training: &Training) -> Result<(), DatabaseError> {
        self.db.create_training(training).await
    }

    async fn list(&self, user_id: Uuid, limit: Option<u32>) -> Result<Vec<Training>, DatabaseError> {
        self.db.list_trainings(user_id, limit).await
    }

    async fn get(&self, id: Uuid, user_id: Uuid) -> Result<Option<Training>, DatabaseError> {
        self.db.get_training(id, user_id).await
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: &TrainingUpdate,
    ) -> Result<Option<TrainingUpdateOutcome>, DatabaseError> {
        self.db.apply_training_update(id, user_id, update).await
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, DatabaseError> {
        self.db.delete_training(id, user_id).await
    }

    async fn list_completed(&self, user_id: Uuid) -> Result<Vec<Training>, DatabaseError> {
        self.db.list_completed_trainings(user_id).await
    }

    async fn find_completed_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Option<Training>, DatabaseError> {
        self.db.find_completed_training_since(user_id, since).await
    }

    async fn find_first_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<Training>, DatabaseError> {
        self.db.find_first_training_between(user_id, start, end).await
    }
}
