// ABOUTME: Rule-based training plan generator keyed by race goal and runner level
// ABOUTME: Linear weekly progression with easy, tempo and long runs per week
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

//! # Training Plan Generator
//!
//! Maps a `(Goal, Level)` pair to a multi-week schedule. Each pair has a fixed
//! parameter row (weeks, runs per week, start and end distance). The weekly
//! baseline grows linearly from the start distance by
//! `(end - start) / weeks` per week, so the final week sits one increment
//! below `end`. Within a week the last slot is a long run (`1.2 x baseline`),
//! the first slot an easy run (`0.6 x`), and every other slot a tempo run
//! (`0.8 x`). Distances are rounded to one decimal with `f64::round`, which
//! rounds halves away from zero.
//!
//! The generator is pure and deterministic; it never fails. Unknown goal or
//! level names resolve to the FULL/BEGINNER row through
//! [`PlanGenerator::generate_plan_for_names`], while
//! [`PlanGenerator::try_generate_plan_for_names`] reports them as errors.

use onper_core::models::{Goal, Level};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Multiplier applied to the weekly baseline for the first run
pub const EASY_RUN_FACTOR: f64 = 0.6;
/// Multiplier applied to the weekly baseline for middle runs
pub const TEMPO_RUN_FACTOR: f64 = 0.8;
/// Multiplier applied to the weekly baseline for the last run
pub const LONG_RUN_FACTOR: f64 = 1.2;

/// Goal used when a lookup misses
pub const FALLBACK_GOAL: Goal = Goal::Full;
/// Level used when a lookup misses
pub const FALLBACK_LEVEL: Level = Level::Beginner;

/// Static progression parameters for one goal/level pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanParameters {
    /// Plan length
    pub weeks: u32,
    /// Runs scheduled each week
    pub runs_per_week: u32,
    /// Week-one baseline in km
    pub start_distance_km: f64,
    /// Target distance in km
    pub end_distance_km: f64,
}

impl PlanParameters {
    const fn new(weeks: u32, runs_per_week: u32, start_distance_km: f64, end_distance_km: f64) -> Self {
        Self {
            weeks,
            runs_per_week,
            start_distance_km,
            end_distance_km,
        }
    }

    /// Baseline growth per week
    #[must_use]
    pub fn weekly_increment(&self) -> f64 {
        (self.end_distance_km - self.start_distance_km) / f64::from(self.weeks)
    }

    /// Unrounded baseline distance for a 1-based week number
    #[must_use]
    #[allow(clippy::suboptimal_flops)] // fused multiply-add would change rounding
    pub fn weekly_baseline(&self, week_number: u32) -> f64 {
        self.start_distance_km + self.weekly_increment() * f64::from(week_number.saturating_sub(1))
    }

    /// Parameters for a pair, `None` if the table has no row for it
    #[must_use]
    pub fn lookup(goal: Goal, level: Level) -> Option<&'static Self> {
        PLAN_ROWS
            .iter()
            .find(|(g, l, _)| *g == goal && *l == level)
            .map(|(_, _, params)| params)
    }

    /// Parameters for a pair, falling back to FULL/BEGINNER on a miss
    #[must_use]
    pub fn resolve(goal: Goal, level: Level) -> (Goal, Level, &'static Self) {
        Self::lookup(goal, level).map_or(
            (FALLBACK_GOAL, FALLBACK_LEVEL, &FALLBACK_ROW),
            |params| (goal, level, params),
        )
    }
}

/// One row per goal/level pair
const PLAN_TABLE: [(Goal, Level, PlanParameters); 12] = [
    (Goal::FiveK, Level::Beginner, PlanParameters::new(8, 3, 2.0, 5.0)),
    (Goal::FiveK, Level::Intermediate, PlanParameters::new(6, 4, 3.0, 8.0)),
    (Goal::FiveK, Level::Advanced, PlanParameters::new(4, 5, 5.0, 10.0)),
    (Goal::TenK, Level::Beginner, PlanParameters::new(12, 3, 3.0, 8.0)),
    (Goal::TenK, Level::Intermediate, PlanParameters::new(10, 4, 5.0, 12.0)),
    (Goal::TenK, Level::Advanced, PlanParameters::new(8, 5, 7.0, 15.0)),
    (Goal::Half, Level::Beginner, PlanParameters::new(16, 4, 5.0, 15.0)),
    (Goal::Half, Level::Intermediate, PlanParameters::new(14, 4, 8.0, 18.0)),
    (Goal::Half, Level::Advanced, PlanParameters::new(12, 5, 10.0, 21.0)),
    (Goal::Full, Level::Beginner, PlanParameters::new(20, 4, 8.0, 35.0)),
    (Goal::Full, Level::Intermediate, PlanParameters::new(18, 5, 12.0, 38.0)),
    (Goal::Full, Level::Advanced, PlanParameters::new(16, 5, 15.0, 42.0)),
];

/// Row 9 of the table (FULL/BEGINNER)
const FALLBACK_PARAMETERS: PlanParameters = PLAN_TABLE[9].2;

static PLAN_ROWS: [(Goal, Level, PlanParameters); 12] = PLAN_TABLE;
static FALLBACK_ROW: PlanParameters = FALLBACK_PARAMETERS;

// Table rows must describe a non-empty, non-shrinking progression
const _: () = {
    let mut i = 0;
    while i < PLAN_TABLE.len() {
        let params = PLAN_TABLE[i].2;
        assert!(params.weeks > 0);
        assert!(params.runs_per_week > 0);
        assert!(params.start_distance_km >= 0.0);
        assert!(params.end_distance_km >= params.start_distance_km);
        i += 1;
    }
    assert!(FALLBACK_PARAMETERS.weeks == 20 && FALLBACK_PARAMETERS.runs_per_week == 4);
};

/// Kind of run within a week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunType {
    /// First run of the week
    #[serde(rename = "Easy Run")]
    EasyRun,
    /// Any run between the first and the last
    #[serde(rename = "Tempo Run")]
    TempoRun,
    /// Last run of the week
    #[serde(rename = "Long Run")]
    LongRun,
}

impl RunType {
    /// Baseline multiplier for this run type
    #[must_use]
    pub const fn factor(&self) -> f64 {
        match self {
            Self::EasyRun => EASY_RUN_FACTOR,
            Self::TempoRun => TEMPO_RUN_FACTOR,
            Self::LongRun => LONG_RUN_FACTOR,
        }
    }

    /// Classify a 1-based slot. The last slot wins over the first, so a
    /// single-run week is a long run.
    #[must_use]
    pub const fn for_slot(slot: u32, runs_per_week: u32) -> Self {
        if slot == runs_per_week {
            Self::LongRun
        } else if slot == 1 {
            Self::EasyRun
        } else {
            Self::TempoRun
        }
    }
}

/// A single scheduled run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    /// 1-based slot in the week
    #[serde(rename = "day")]
    pub day_index: u32,
    /// Distance in km, one decimal
    #[serde(rename = "distance")]
    pub distance_km: f64,
    /// Run classification
    #[serde(rename = "type")]
    pub run_type: RunType,
}

/// One week of the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSchedule {
    /// 1-based week number
    #[serde(rename = "week")]
    pub week_number: u32,
    /// Runs in slot order
    pub runs: Vec<RunSpec>,
}

/// Complete generated plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    /// Goal the schedule was built for
    pub goal: Goal,
    /// Level the schedule was built for
    pub level: Level,
    /// Number of weeks
    #[serde(rename = "duration")]
    pub total_weeks: u32,
    /// Weekly schedules in order
    #[serde(rename = "plan")]
    pub weeks: Vec<WeekSchedule>,
}

/// Goal or level name outside the closed sets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanLookupError {
    /// Goal name not recognized
    #[error("Unknown training goal '{0}'")]
    UnknownGoal(String),
    /// Level name not recognized
    #[error("Unknown experience level '{0}'")]
    UnknownLevel(String),
}

/// Round to one decimal place, halves away from zero
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Stateless plan generator
pub struct PlanGenerator;

impl PlanGenerator {
    /// Generate the plan for a goal/level pair
    #[must_use]
    pub fn generate_plan(goal: Goal, level: Level) -> TrainingPlan {
        let (goal, level, params) = PlanParameters::resolve(goal, level);
        debug!(%goal, %level, weeks = params.weeks, "generating training plan");

        TrainingPlan {
            goal,
            level,
            total_weeks: params.weeks,
            weeks: (1..=params.weeks)
                .map(|week_number| Self::build_week(params, week_number))
                .collect(),
        }
    }

    /// Generate from raw names, substituting FULL/BEGINNER when either is unknown
    #[must_use]
    pub fn generate_plan_for_names(goal: &str, level: &str) -> TrainingPlan {
        match (Goal::parse(goal), Level::parse(level)) {
            (Some(goal), Some(level)) => Self::generate_plan(goal, level),
            _ => {
                debug!(goal, level, "unknown plan key, using FULL/BEGINNER");
                Self::generate_plan(FALLBACK_GOAL, FALLBACK_LEVEL)
            }
        }
    }

    /// Generate from raw names, rejecting unknown values
    ///
    /// # Errors
    ///
    /// Returns [`PlanLookupError`] naming the first unrecognized value.
    pub fn try_generate_plan_for_names(goal: &str, level: &str) -> Result<TrainingPlan, PlanLookupError> {
        let parsed_goal = Goal::parse(goal).ok_or_else(|| PlanLookupError::UnknownGoal(goal.to_owned()))?;
        let parsed_level =
            Level::parse(level).ok_or_else(|| PlanLookupError::UnknownLevel(level.to_owned()))?;
        Ok(Self::generate_plan(parsed_goal, parsed_level))
    }

    fn build_week(params: &PlanParameters, week_number: u32) -> WeekSchedule {
        let baseline = params.weekly_baseline(week_number);
        let runs = (1..=params.runs_per_week)
            .map(|slot| {
                let run_type = RunType::for_slot(slot, params.runs_per_week);
                RunSpec {
                    day_index: slot,
                    distance_km: round_to_tenth(baseline * run_type.factor()),
                    run_type,
                }
            })
            .collect();

        WeekSchedule { week_number, runs }
    }
}
