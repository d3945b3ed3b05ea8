// ABOUTME: Core data models and enumerations for the ONPER API
// ABOUTME: Re-exports User, Training, MotivationLog, Goal, Level and related types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

//! # Data Models
//!
//! Records persisted by the server and the closed enumerations they carry.
//! Every enumeration serializes as its `SCREAMING_SNAKE_CASE` wire name and
//! parses from the same string, so request validation and storage share one
//! spelling.
//!
//! - `User`: account with training goal and experience level
//! - `Training`: one logged run
//! - `MotivationLog`: a motivational message delivered to a user

mod goal;
mod motivation;
mod training;
mod user;

pub use goal::{Goal, Level};
pub use motivation::{MotivationLog, NotificationType, TriggerType};
pub use training::{Mood, Training};
pub use user::User;
