// ABOUTME: Aggregate statistics over a runner's completed training sessions
// ABOUTME: Feeds the profile endpoint and milestone detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use onper_core::models::Training;
use serde::{Deserialize, Serialize};

use crate::training_plan::round_to_tenth;

/// Totals over completed sessions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStats {
    /// Number of completed sessions
    pub total_runs: usize,
    /// Sum of distances in km, one decimal
    pub total_distance: f64,
    /// Sum of durations in minutes
    pub total_duration: u64,
    /// Mean distance per completed session in km, one decimal
    pub average_distance: f64,
}

impl TrainingStats {
    /// Aggregate sessions, ignoring those not completed
    pub fn from_sessions<'a, I>(sessions: I) -> Self
    where
        I: IntoIterator<Item = &'a Training>,
    {
        let (runs, distance, duration) = sessions
            .into_iter()
            .filter(|training| training.completed)
            .fold((0_usize, 0.0_f64, 0_u64), |(runs, distance, duration), training| {
                (
                    runs + 1,
                    distance + training.distance,
                    duration + u64::from(training.duration),
                )
            });

        Self {
            total_runs: runs,
            total_distance: round_to_tenth(distance),
            total_duration: duration,
            average_distance: if runs == 0 {
                0.0
            } else {
                round_to_tenth(distance / runs as f64)
            },
        }
    }

    /// Unrounded distance total, as used for milestone detection
    pub fn raw_total_distance<'a, I>(sessions: I) -> f64
    where
        I: IntoIterator<Item = &'a Training>,
    {
        sessions
            .into_iter()
            .filter(|training| training.completed)
            .map(|training| training.distance)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use onper_core::models::Mood;
    use uuid::Uuid;

    fn session(distance: f64, duration: u32, completed: bool) -> Training {
        let now = Utc::now();
        Training {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date: now,
            distance,
            duration,
            mood: Mood::Normal,
            completed,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_history() {
        let sessions: Vec<Training> = Vec::new();
        let stats = TrainingStats::from_sessions(&sessions);
        assert_eq!(stats, TrainingStats::default());
    }

    #[test]
    fn test_only_completed_sessions_count() {
        let sessions = vec![
            session(5.0, 30, true),
            session(7.5, 45, true),
            session(10.0, 60, true),
            session(21.1, 130, false),
        ];
        let stats = TrainingStats::from_sessions(&sessions);

        assert_eq!(stats.total_runs, 3);
        assert!((stats.total_distance - 22.5).abs() < f64::EPSILON);
        assert_eq!(stats.total_duration, 135);
        assert!((stats.average_distance - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rounding_to_one_decimal() {
        let sessions = vec![session(3.33, 20, true), session(3.33, 20, true), session(3.33, 20, true)];
        let stats = TrainingStats::from_sessions(&sessions);

        assert!((stats.total_distance - 10.0).abs() < f64::EPSILON);
        assert!((stats.average_distance - 3.3).abs() < f64::EPSILON);
        assert!((TrainingStats::raw_total_distance(&sessions) - 9.99).abs() < 1e-9);
    }
}
