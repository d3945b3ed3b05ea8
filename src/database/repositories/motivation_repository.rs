// ABOUTME: Motivation log repository implementation
// ABOUTME: Appends and reads delivered motivational messages through the SQLite database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use async_trait::async_trait;
use onper_core::errors::DatabaseError;
use onper_core::models::MotivationLog;
use uuid::Uuid;

use super::MotivationLogRepository;
use crate::database::Database;

/// `SQLite` implementation of `MotivationLogRepository`
#[derive(Clone)]
pub struct MotivationLogRepositoryImpl {
    db: Database,
}

impl MotivationLogRepositoryImpl {
    /// Create a new `MotivationLogRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MotivationLogRepository for MotivationLogRepositoryImpl {
    async fn create(&self, log: &MotivationLog) -> Result<(), DatabaseError> {
        self.db.create_motivation_log(log).await
    }

    async fn list(&self, user_id: Uuid, limit: u32) -> Result<Vec<MotivationLog>, DatabaseError> {
        self.db.list_motivation_logs(user_id, limit).await
    }

    async fn latest(&self, user_id: Uuid) -> Result<Option<MotivationLog>, DatabaseError> {
        self.db.latest_motivation_log(user_id).await
    }
}
