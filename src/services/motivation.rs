// ABOUTME: Motivation business logic for triggering, reading, and checking milestones
// ABOUTME: Selects messages from the bank, persists them, and reports them with a lowercase type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use std::sync::Arc;

use chrono::Utc;
use onper_core::constants::validation::MAX_PAGE_LIMIT;
use onper_core::errors::AppResult;
use onper_core::models::{MotivationLog, TriggerType};
use onper_intelligence::{detect_milestone, MessageSelector, Milestone, TrainingStats};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::start_of_day;
use crate::database::repositories::{MotivationLogRepository, TrainingRepository};
use crate::logging::AppLogger;
use crate::resources::ServerResources;

/// A freshly delivered message
#[derive(Debug, Clone, Serialize)]
pub struct MotivationMessage {
    /// Stored log entry
    #[serde(flatten)]
    pub log: MotivationLog,
    /// Lowercase trigger name
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl From<MotivationLog> for MotivationMessage {
    fn from(log: MotivationLog) -> Self {
        Self {
            kind: log.trigger.kind(),
            log,
        }
    }
}

/// Milestone message plus the threshold that fired it
#[derive(Debug, Clone, Serialize)]
pub struct MilestoneAchievement {
    /// Delivered message
    #[serde(flatten)]
    pub motivation: MotivationMessage,
    /// Threshold reached
    pub milestone: Milestone,
}

/// Motivation service
#[derive(Clone)]
pub struct MotivationService {
    trainings: Arc<dyn TrainingRepository>,
    logs: Arc<dyn MotivationLogRepository>,
    selector: Arc<dyn MessageSelector>,
    default_history_limit: u32,
}

impl MotivationService {
    /// Create a service over explicit dependencies
    #[must_use]
    pub fn new(
        trainings: Arc<dyn TrainingRepository>,
        logs: Arc<dyn MotivationLogRepository>,
        selector: Arc<dyn MessageSelector>,
        default_history_limit: u32,
    ) -> Self {
        Self {
            trainings,
            logs,
            selector,
            default_history_limit,
        }
    }

    /// Create a service from shared server resources
    #[must_use]
    pub fn from_resources(resources: &ServerResources) -> Self {
        Self::new(
            resources.trainings.clone(),
            resources.motivation_logs.clone(),
            resources.message_selector.clone(),
            resources.config.motivation_history_limit,
        )
    }

    /// Pick a message for `trigger`, record it, and return it
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be stored
    pub async fn trigger(&self, user_id: Uuid, trigger: TriggerType) -> AppResult<MotivationMessage> {
        let message = self.selector.select(trigger);
        let log = MotivationLog::new(user_id, trigger, message.to_owned());
        self.logs.create(&log).await?;

        AppLogger::log_motivation(&user_id.to_string(), trigger.as_str(), message);
        Ok(MotivationMessage::from(log))
    }

    /// Newest-first history
    ///
    /// A missing or zero limit uses the configured default; larger values
    /// are capped.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn history(&self, user_id: Uuid, limit: Option<u32>) -> AppResult<Vec<MotivationLog>> {
        let limit = match limit {
            None | Some(0) => self.default_history_limit,
            Some(requested) => requested.min(MAX_PAGE_LIMIT),
        };
        Ok(self.logs.list(user_id, limit).await?)
    }

    /// Newest entry, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn latest(&self, user_id: Uuid) -> AppResult<Option<MotivationLog>> {
        Ok(self.logs.latest(user_id).await?)
    }

    /// Deliver a MILESTONE message if the completed totals sit exactly on a threshold
    ///
    /// # Errors
    ///
    /// Returns an error if a query or the log insert fails
    pub async fn check_milestones(&self, user_id: Uuid) -> AppResult<Option<MilestoneAchievement>> {
        let completed = self.trainings.list_completed(user_id).await?;
        let total_distance = TrainingStats::raw_total_distance(&completed);

        let Some(milestone) = detect_milestone(completed.len(), total_distance) else {
            debug!(user.id = %user_id, runs = completed.len(), total_distance, "no milestone reached");
            return Ok(None);
        };

        let motivation = self.trigger(user_id, TriggerType::Milestone).await?;
        Ok(Some(MilestoneAchievement {
            motivation,
            milestone: *milestone,
        }))
    }

    /// Whether a completed session is dated today (UTC) or later
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn has_trained_today(&self, user_id: Uuid) -> AppResult<bool> {
        let today = start_of_day(Utc::now());
        Ok(self
            .trainings
            .find_completed_since(user_id, today)
            .await?
            .is_some())
    }

    /// Deliver a REMINDER message unless the user already trained today
    ///
    /// # Errors
    ///
    /// Returns an error if a query or the log insert fails
    pub async fn daily_reminder(&self, user_id: Uuid) -> AppResult<Option<MotivationMessage>> {
        if self.has_trained_today(user_id).await? {
            return Ok(None);
        }
        self.trigger(user_id, TriggerType::Reminder).await.map(Some)
    }
}
