// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Accounts, training sessions, motivation triggers, and the notification stub
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

//! Domain service layer
//!
//! Route handlers stay thin: they authenticate, decode the request, and call
//! one of these services. Services only see repository traits, so the same
//! rules apply to every caller including the seed binary and tests.

/// Registration and login
pub mod auth;

/// Motivational message triggers and history
pub mod motivation;

/// Simulated push notifications
pub mod notifications;

/// Training session CRUD and plan generation
pub mod training;

/// Profile and statistics
pub mod users;

pub use auth::{AuthResponse, AuthService, RegisterInput, UserSummary};
pub use motivation::{MilestoneAchievement, MotivationMessage, MotivationService};
pub use notifications::{
    DailyReminderOutcome, NotificationPreferences, NotificationReceipt, NotificationService,
    ScheduledNotification,
};
pub use training::{NewTraining, TrainingService};
pub use users::{UserProfile, UserService};

use chrono::{DateTime, NaiveTime, Utc};

/// Midnight UTC of the day containing `instant`
#[must_use]
pub fn start_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_of_day_truncates_to_midnight() {
        let instant = DateTime::parse_from_rfc3339("2025-03-14T15:09:26.535Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(start_of_day(instant).to_rfc3339(), "2025-03-14T00:00:00+00:00");
    }
}
