// ABOUTME: Run-count and cumulative-distance milestones for completed training
// ABOUTME: Detection matches exact counts and floored kilometre totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use serde::Serialize;

/// What a milestone measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum MilestoneKind {
    /// Number of completed sessions
    Runs(u32),
    /// Whole kilometres of completed sessions
    DistanceKm(u32),
}

/// A milestone threshold and its celebration text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    /// Threshold
    #[serde(flatten)]
    pub kind: MilestoneKind,
    /// Human-readable description
    pub description: &'static str,
}

/// Thresholds in evaluation order; the first match wins
pub const MILESTONES: [Milestone; 8] = [
    Milestone {
        kind: MilestoneKind::Runs(5),
        description: "You've completed 5 runs! You're building momentum.",
    },
    Milestone {
        kind: MilestoneKind::Runs(10),
        description: "10 runs completed! You're in the top 10% of people who start.",
    },
    Milestone {
        kind: MilestoneKind::Runs(25),
        description: "25 runs! Your consistency is remarkable.",
    },
    Milestone {
        kind: MilestoneKind::Runs(50),
        description: "50 runs! You've proven this isn't just a phase.",
    },
    Milestone {
        kind: MilestoneKind::Runs(100),
        description: "100 runs! You're officially elite.",
    },
    Milestone {
        kind: MilestoneKind::DistanceKm(100),
        description: "You've run 100km! That's like running from city to city!",
    },
    Milestone {
        kind: MilestoneKind::DistanceKm(250),
        description: "250km total! You could have run across multiple states!",
    },
    Milestone {
        kind: MilestoneKind::DistanceKm(500),
        description: "500km! You're in ultra-marathon territory now!",
    },
];

impl Milestone {
    /// Whether the totals sit exactly on this threshold
    #[must_use]
    pub fn is_reached_by(&self, total_runs: usize, total_distance_km: f64) -> bool {
        match self.kind {
            MilestoneKind::Runs(runs) => total_runs == runs as usize,
            MilestoneKind::DistanceKm(km) => {
                total_distance_km >= 0.0 && total_distance_km.floor() == f64::from(km)
            }
        }
    }
}

/// First milestone the totals land on, if any
///
/// Matching is exact: 6 runs is not the 5-run milestone, and 100.9 km is the
/// 100 km milestone while 101 km is not.
#[must_use]
pub fn detect_milestone(total_runs: usize, total_distance_km: f64) -> Option<&'static Milestone> {
    MILESTONE_LIST
        .iter()
        .find(|milestone| milestone.is_reached_by(total_runs, total_distance_km))
}

static MILESTONE_LIST: [Milestone; 8] = MILESTONES;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_count_milestones_are_exact() {
        assert_eq!(detect_milestone(5, 0.0).map(|m| m.kind), Some(MilestoneKind::Runs(5)));
        assert_eq!(detect_milestone(6, 0.0), None);
        assert_eq!(detect_milestone(100, 3.0).map(|m| m.kind), Some(MilestoneKind::Runs(100)));
    }

    #[test]
    fn test_distance_milestones_use_floor() {
        assert_eq!(
            detect_milestone(7, 100.9).map(|m| m.kind),
            Some(MilestoneKind::DistanceKm(100))
        );
        assert_eq!(detect_milestone(7, 99.99), None);
        assert_eq!(detect_milestone(7, 101.0), None);
        assert_eq!(
            detect_milestone(33, 250.0).map(|m| m.kind),
            Some(MilestoneKind::DistanceKm(250))
        );
    }

    #[test]
    fn test_run_milestones_take_precedence() {
        let milestone = detect_milestone(10, 500.2).unwrap();
        assert_eq!(milestone.kind, MilestoneKind::Runs(10));
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(MILESTONES[5]).unwrap();
        assert_eq!(json["kind"], "distanceKm");
        assert_eq!(json["value"], 100);
        assert!(json["description"].as_str().unwrap().contains("100km"));
    }
}
