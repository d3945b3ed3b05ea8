// ABOUTME: Training goal (race distance) and runner experience level enumerations
// ABOUTME: Closed sets used as keys into the training plan parameter table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Target race distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Goal {
    /// 5 km
    FiveK,
    /// 10 km
    TenK,
    /// Half marathon
    Half,
    /// Full marathon
    #[default]
    Full,
}

impl Goal {
    /// Every goal in table order
    pub const ALL: [Self; 4] = [Self::FiveK, Self::TenK, Self::Half, Self::Full];

    /// Wire and storage name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FiveK => "FIVE_K",
            Self::TenK => "TEN_K",
            Self::Half => "HALF",
            Self::Full => "FULL",
        }
    }

    /// Parse a wire name, `None` when outside the closed set
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|goal| goal.as_str() == value)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            AppError::invalid_input(format!(
                "Invalid goal '{s}'. Expected one of: FIVE_K, TEN_K, HALF, FULL"
            ))
        })
    }
}

/// Runner experience tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    /// New to structured training
    #[default]
    Beginner,
    /// Has completed the distance before
    Intermediate,
    /// Trains for performance
    Advanced,
}

impl Level {
    /// Every level in table order
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Wire and storage name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "BEGINNER",
            Self::Intermediate => "INTERMEDIATE",
            Self::Advanced => "ADVANCED",
        }
    }

    /// Parse a wire name, `None` when outside the closed set
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            AppError::invalid_input(format!(
                "Invalid level '{s}'. Expected one of: BEGINNER, INTERMEDIATE, ADVANCED"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_serde_names_match_as_str() {
        for goal in Goal::ALL {
            let json = serde_json::to_string(&goal).unwrap();
            assert_eq!(json, format!("\"{}\"", goal.as_str()));
        }
        for level in Level::ALL {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{}\"", level.as_str()));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(Goal::parse("TEN_K"), Some(Goal::TenK));
        assert_eq!(Goal::parse("ten_k"), None);
        assert_eq!(Level::parse("ADVANCED"), Some(Level::Advanced));
        assert_eq!(Level::parse("Expert"), None);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "MARATHON".parse::<Goal>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.message.contains("MARATHON"));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Goal::default(), Goal::Full);
        assert_eq!(Level::default(), Level::Beginner);
    }
}
