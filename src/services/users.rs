// ABOUTME: User profile business logic
// ABOUTME: Profile reads with completed-session statistics and partial profile updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use std::sync::Arc;

use chrono::{DateTime, Utc};
use onper_core::constants::messages::USER_NOT_FOUND;
use onper_core::errors::{AppError, AppResult, DatabaseError};
use onper_core::models::{Goal, Level, User};
use onper_intelligence::TrainingStats;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auth::validate_name;
use crate::database::repositories::{TrainingRepository, UserRepository};
use crate::database::ProfileUpdate;
use crate::resources::ServerResources;

/// Profile with lifetime statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User id
    pub id: Uuid,
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Training goal
    pub goal: Goal,
    /// Experience level
    pub level: Level,
    /// Account creation time
    pub created_at: DateTime<Utc>,
    /// Aggregates over completed sessions
    pub stats: TrainingStats,
}

/// Profile service
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    trainings: Arc<dyn TrainingRepository>,
}

impl UserService {
    /// Create a service over explicit dependencies
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, trainings: Arc<dyn TrainingRepository>) -> Self {
        Self { users, trainings }
    }

    /// Create a service from shared server resources
    #[must_use]
    pub fn from_resources(resources: &ServerResources) -> Self {
        Self::new(resources.users.clone(), resources.trainings.clone())
    }

    /// Load the profile and compute statistics
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the user no longer exists
    pub async fn profile(&self, user_id: Uuid) -> AppResult<UserProfile> {
        let user = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND).with_user_id(user_id))?;

        let completed = self.trainings.list_completed(user_id).await?;
        let stats = TrainingStats::from_sessions(&completed);

        Ok(UserProfile {
            id: user.id,
            email: user.email,
            name: user.name,
            goal: user.goal,
            level: user.level,
            created_at: user.created_at,
            stats,
        })
    }

    /// Apply a partial update
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a too-short name and `RESOURCE_NOT_FOUND`
    /// if the user no longer exists
    pub async fn update_profile(&self, user_id: Uuid, mut update: ProfileUpdate) -> AppResult<User> {
        if let Some(name) = update.name.take() {
            update.name = Some(validate_name(&name)?);
        }

        self.users
            .update_profile(user_id, &update)
            .await
            .map_err(|e| match e {
                DatabaseError::NotFound { .. } => {
                    AppError::not_found(USER_NOT_FOUND).with_user_id(user_id)
                }
                other => AppError::from(other),
            })
    }
}
