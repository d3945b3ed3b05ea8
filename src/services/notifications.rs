// ABOUTME: Simulated push notification delivery and scheduling
// ABOUTME: Logs sends instead of contacting a push provider and answers with canned receipts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use onper_core::constants::messages::{
    ALREADY_TRAINED_TODAY, NOTIFICATION_SCHEDULE_NOTE, NOTIFICATION_SEND_NOTE, PREFERENCES_NOTE,
};
use onper_core::errors::{AppError, AppResult};
use onper_core::models::{NotificationType, TriggerType};
use serde::Serialize;
use uuid::Uuid;

use super::{start_of_day, MotivationService};
use crate::database::repositories::TrainingRepository;
use crate::logging::AppLogger;
use crate::resources::ServerResources;

/// Receipt for a simulated send
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationReceipt {
    /// Recipient
    pub user_id: Uuid,
    /// Category
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Body text
    pub message: String,
    /// When the send was logged
    pub sent_at: DateTime<Utc>,
    /// Always `sent`
    pub status: &'static str,
    /// Delivery caveat
    pub note: &'static str,
}

/// Acknowledgement for a scheduling request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledNotification {
    /// Recipient
    pub user_id: Uuid,
    /// Category
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Requested delivery time
    pub scheduled_for: DateTime<Utc>,
    /// Body text
    pub message: String,
    /// Always `scheduled`
    pub status: &'static str,
    /// Delivery caveat
    pub note: &'static str,
}

/// Result of the daily reminder
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DailyReminderOutcome {
    /// Reminder delivered
    Sent(NotificationReceipt),
    /// User already trained today
    Skipped {
        /// Reason
        message: &'static str,
        /// Always `skipped`
        status: &'static str,
    },
}

/// Quiet period during which nothing is sent
#[derive(Debug, Clone, Serialize)]
pub struct QuietHours {
    /// Local start time
    pub start: &'static str,
    /// Local end time
    pub end: &'static str,
}

/// Notification preferences
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    /// Owner
    pub user_id: Uuid,
    /// Master switch
    pub enabled: bool,
    /// Categories the user receives
    pub types: Vec<NotificationType>,
    /// Do-not-disturb window
    pub quiet_hours: QuietHours,
    /// Delivery cadence
    pub frequency: &'static str,
    /// Feature status
    pub note: &'static str,
}

/// Notification service
#[derive(Clone)]
pub struct NotificationService {
    trainings: Arc<dyn TrainingRepository>,
    motivation: MotivationService,
}

impl NotificationService {
    /// Create a service over explicit dependencies
    #[must_use]
    pub fn new(trainings: Arc<dyn TrainingRepository>, motivation: MotivationService) -> Self {
        Self {
            trainings,
            motivation,
        }
    }

    /// Create a service from shared server resources
    #[must_use]
    pub fn from_resources(resources: &ServerResources) -> Self {
        Self::new(
            resources.trainings.clone(),
            MotivationService::from_resources(resources),
        )
    }

    /// Log a notification as sent
    #[must_use]
    pub fn send(
        user_id: Uuid,
        notification_type: NotificationType,
        message: String,
    ) -> NotificationReceipt {
        AppLogger::log_notification(&user_id.to_string(), notification_type.as_str(), &message);
        NotificationReceipt {
            user_id,
            notification_type,
            message,
            sent_at: Utc::now(),
            status: "sent",
            note: NOTIFICATION_SEND_NOTE,
        }
    }

    /// Acknowledge a notification for later delivery
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` if the message is blank
    pub fn schedule(
        user_id: Uuid,
        notification_type: NotificationType,
        scheduled_for: DateTime<Utc>,
        message: String,
    ) -> AppResult<ScheduledNotification> {
        if message.trim().is_empty() {
            return Err(AppError::invalid_input("Notification message cannot be empty"));
        }

        Ok(ScheduledNotification {
            user_id,
            notification_type,
            scheduled_for,
            message,
            status: "scheduled",
            note: NOTIFICATION_SCHEDULE_NOTE,
        })
    }

    /// Remind the user about yesterday's session if it was left uncompleted
    ///
    /// Only the earliest session dated yesterday (UTC) is considered.
    ///
    /// # Errors
    ///
    /// Returns an error if a query or the motivation log insert fails
    pub async fn check_missed_workouts(
        &self,
        user_id: Uuid,
    ) -> AppResult<Option<NotificationReceipt>> {
        let today = start_of_day(Utc::now());
        let yesterday = today - Duration::days(1);

        let missed = self
            .trainings
            .find_first_between(user_id, yesterday, today)
            .await?
            .filter(|training| !training.completed);
        if missed.is_none() {
            return Ok(None);
        }

        let motivation = self.motivation.trigger(user_id, TriggerType::Missed).await?;
        Ok(Some(Self::send(
            user_id,
            NotificationType::Reminder,
            motivation.log.message,
        )))
    }

    /// Send the daily reminder unless the user already trained today
    ///
    /// # Errors
    ///
    /// Returns an error if a query or the motivation log insert fails
    pub async fn send_daily_reminder(&self, user_id: Uuid) -> AppResult<DailyReminderOutcome> {
        match self.motivation.daily_reminder(user_id).await? {
            Some(motivation) => Ok(DailyReminderOutcome::Sent(Self::send(
                user_id,
                NotificationType::Reminder,
                motivation.log.message,
            ))),
            None => Ok(DailyReminderOutcome::Skipped {
                message: ALREADY_TRAINED_TODAY,
                status: "skipped",
            }),
        }
    }

    /// Default preferences
    #[must_use]
    pub fn preferences(user_id: Uuid) -> NotificationPreferences {
        NotificationPreferences {
            user_id,
            enabled: true,
            types: vec![
                NotificationType::Reminder,
                NotificationType::Motivation,
                NotificationType::Milestone,
            ],
            quiet_hours: QuietHours {
                start: "22:00",
                end: "07:00",
            },
            frequency: "daily",
            note: PREFERENCES_NOTE,
        }
    }
}
