// ABOUTME: Motivation log record and the triggers that produce motivational messages
// ABOUTME: Also defines notification categories used by the notification stub
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Event that caused a motivational message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerType {
    /// A session was completed
    Completed,
    /// A planned session was skipped
    Missed,
    /// A run-count or distance milestone was reached
    Milestone,
    /// No training logged yet today
    Reminder,
}

impl TriggerType {
    /// Every trigger
    pub const ALL: [Self; 4] = [Self::Completed, Self::Missed, Self::Milestone, Self::Reminder];

    /// Wire and storage name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "COMPLETED",
            Self::Missed => "MISSED",
            Self::Milestone => "MILESTONE",
            Self::Reminder => "REMINDER",
        }
    }

    /// Lowercase form used in the `type` field of motivation responses
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Missed => "missed",
            Self::Milestone => "milestone",
            Self::Reminder => "reminder",
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|trigger| trigger.as_str() == s)
            .ok_or_else(|| AppError::invalid_input(format!("Invalid trigger type '{s}'")))
    }
}

/// Category of a push notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// Nudge to train
    Reminder,
    /// Motivational message
    Motivation,
    /// Milestone celebration
    Milestone,
}

impl NotificationType {
    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reminder => "REMINDER",
            Self::Motivation => "MOTIVATION",
            Self::Milestone => "MILESTONE",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A motivational message delivered to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationLog {
    /// Unique identifier
    pub id: Uuid,
    /// Recipient
    pub user_id: Uuid,
    /// Event that produced the message
    pub trigger: TriggerType,
    /// Message text
    pub message: String,
    /// Delivery timestamp
    pub created_at: DateTime<Utc>,
}

impl MotivationLog {
    /// Build a new log entry stamped now
    #[must_use]
    pub fn new(user_id: Uuid, trigger: TriggerType, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            trigger,
            message,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_round_trips_through_storage_name() {
        for trigger in TriggerType::ALL {
            assert_eq!(trigger.as_str().parse::<TriggerType>().unwrap(), trigger);
            assert_eq!(trigger.kind(), trigger.as_str().to_lowercase());
        }
    }

    #[test]
    fn test_notification_type_serialization() {
        let json = serde_json::to_string(&NotificationType::Motivation).unwrap();
        assert_eq!(json, "\"MOTIVATION\"");
    }
}
