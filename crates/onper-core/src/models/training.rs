// ABOUTME: Training session record and the mood reported for it
// ABOUTME: Sessions carry distance in km and duration in minutes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// How the runner felt during a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mood {
    /// Low energy
    Tired,
    /// Nothing notable
    #[default]
    Normal,
    /// Felt strong
    Energized,
}

impl Mood {
    /// Wire and storage name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tired => "TIRED",
            Self::Normal => "NORMAL",
            Self::Energized => "ENERGIZED",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TIRED" => Ok(Self::Tired),
            "NORMAL" => Ok(Self::Normal),
            "ENERGIZED" => Ok(Self::Energized),
            other => Err(AppError::invalid_input(format!(
                "Invalid mood '{other}'. Expected one of: TIRED, NORMAL, ENERGIZED"
            ))),
        }
    }
}

/// A logged run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    /// Unique identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// When the run took place (or is planned)
    pub date: DateTime<Utc>,
    /// Distance in kilometres
    pub distance: f64,
    /// Duration in minutes
    pub duration: u32,
    /// Reported mood
    pub mood: Mood,
    /// Whether the run was done
    pub completed: bool,
    /// Free-form notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}
