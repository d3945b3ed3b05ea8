// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Defaults, validation limits, CORS origins, and user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single flat list.

/// Server and security defaults, overridable through the environment
pub mod defaults {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    /// Default `SQLite` database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/onper.db";
    /// Default JWT lifetime (seven days)
    pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 168;
    /// Default bcrypt work factor
    pub const DEFAULT_BCRYPT_COST: u32 = 10;
    /// Default page size for motivation history
    pub const DEFAULT_MOTIVATION_HISTORY_LIMIT: u32 = 20;
    /// Default service name used in structured logs
    pub const SERVICE_NAME: &str = "onper-server";
}

/// Request validation limits
pub mod validation {
    /// Minimum length of a display name
    pub const MIN_NAME_LENGTH: usize = 2;
    /// Minimum length of a password
    pub const MIN_PASSWORD_LENGTH: usize = 6;
    /// Upper bound accepted for `limit` query parameters
    pub const MAX_PAGE_LIMIT: u32 = 500;
}

/// Origins always allowed by CORS in addition to `FRONTEND_URL`
pub mod cors {
    /// Local frontend dev servers
    pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:8080", "http://localhost:5173"];
}

/// User-facing messages that clients match on
pub mod messages {
    /// Returned by login for any unknown email or wrong password
    pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
    /// Returned by register when the email is taken
    pub const EMAIL_ALREADY_EXISTS: &str = "User with this email already exists";
    /// Returned when an authenticated user no longer exists
    pub const USER_NOT_FOUND: &str = "User not found";
    /// Returned when a session is missing or owned by someone else
    pub const TRAINING_NOT_FOUND: &str = "Training session not found";
    /// Returned after a successful delete
    pub const TRAINING_DELETED: &str = "Training session deleted successfully";
    /// Returned when the daily reminder is skipped
    pub const ALREADY_TRAINED_TODAY: &str = "User has already trained today";
    /// Note attached to scheduled notifications
    pub const NOTIFICATION_SCHEDULE_NOTE: &str =
        "In MVP mode - notification would be sent via push service in production";
    /// Note attached to sent notifications
    pub const NOTIFICATION_SEND_NOTE: &str = "In MVP mode - would use FCM/APNs in production";
    /// Note attached to notification preferences
    pub const PREFERENCES_NOTE: &str = "Preferences feature ready for future implementation";
}
