// ABOUTME: Training intelligence for ONPER: plan generation, motivation, milestones, stats
// ABOUTME: Pure, synchronous algorithms with no I/O, shared by the server and its tools
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

#![deny(unsafe_code)]

//! # ONPER Intelligence
//!
//! - **`training_plan`**: static rule-based plan generator keyed by goal and level
//! - **motivation**: message banks per trigger and the selection strategy
//! - **milestones**: run-count and distance thresholds
//! - **stats**: aggregates over completed sessions

/// Rule-based training plan generator
pub mod training_plan;

/// Motivational message banks and selection
pub mod motivation;

/// Milestone thresholds and detection
pub mod milestones;

/// Training statistics
pub mod stats;

pub use milestones::{detect_milestone, Milestone, MilestoneKind};
pub use motivation::{MessageSelector, RandomMessageSelector, SeededMessageSelector};
pub use stats::TrainingStats;
pub use training_plan::{
    round_to_tenth, PlanGenerator, PlanLookupError, PlanParameters, RunSpec, RunType,
    TrainingPlan, WeekSchedule,
};
