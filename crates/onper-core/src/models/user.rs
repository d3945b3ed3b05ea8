// ABOUTME: User account model with training goal and experience level
// ABOUTME: The password hash never leaves the server in serialized form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::goal::{Goal, Level};

/// Registered runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Login email, unique
    pub email: String,
    /// Display name
    pub name: String,
    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Target race distance
    pub goal: Goal,
    /// Experience tier
    pub level: Level,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
    /// Last profile change
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new account with fresh id and timestamps
    #[must_use]
    pub fn new(email: String, name: String, password_hash: String, goal: Goal, level: Level) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash,
            goal,
            level,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User::new(
            "runner@example.com".to_owned(),
            "Runner".to_owned(),
            "$2b$10$secret".to_owned(),
            Goal::Half,
            Level::Intermediate,
        );
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["goal"], "HALF");
        assert_eq!(json["level"], "INTERMEDIATE");
        assert!(json.get("createdAt").is_some());
    }
}
