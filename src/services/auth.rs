// ABOUTME: Account registration and login business logic
// ABOUTME: Validates credentials, hashes passwords, and issues access tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use std::sync::Arc;

use onper_core::constants::messages::{EMAIL_ALREADY_EXISTS, INVALID_CREDENTIALS};
use onper_core::constants::validation::{MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH};
use onper_core::errors::{AppError, AppResult, DatabaseError};
use onper_core::models::{Goal, Level, User};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::{hash_password, verify_password, AuthManager};
use crate::database::repositories::UserRepository;
use crate::logging::AppLogger;
use crate::resources::ServerResources;

/// Validated registration data
#[derive(Debug, Clone)]
pub struct RegisterInput {
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Plain-text password
    pub password: String,
    /// Training goal, FULL when absent
    pub goal: Option<Goal>,
    /// Experience level, BEGINNER when absent
    pub level: Option<Level>,
}

/// Public view of a user returned with tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User id
    pub id: Uuid,
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Training goal
    pub goal: Goal,
    /// Experience level
    pub level: Level,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            goal: user.goal,
            level: user.level,
        }
    }
}

/// Token plus the user it was issued for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer token
    pub access_token: String,
    /// Token owner
    pub user: UserSummary,
}

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    auth_manager: AuthManager,
    bcrypt_cost: u32,
}

impl AuthService {
    /// Create a service over explicit dependencies
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, auth_manager: AuthManager, bcrypt_cost: u32) -> Self {
        Self {
            users,
            auth_manager,
            bcrypt_cost,
        }
    }

    /// Create a service from shared server resources
    #[must_use]
    pub fn from_resources(resources: &ServerResources) -> Self {
        Self::new(
            resources.users.clone(),
            resources.auth_manager.clone(),
            resources.config.auth.bcrypt_cost,
        )
    }

    /// Register a new account and sign it in
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a bad email, short name or short password,
    /// and `RESOURCE_ALREADY_EXISTS` if the email is taken
    pub async fn register(&self, input: RegisterInput) -> AppResult<AuthResponse> {
        let email = normalize_email(&input.email);
        if !is_valid_email(&email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }
        let name = validate_name(&input.name)?;
        if input.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
            )));
        }

        if self.users.get_by_email(&email).await?.is_some() {
            AppLogger::log_auth_event(&email, "register", false, Some("email taken"));
            return Err(AppError::already_exists(EMAIL_ALREADY_EXISTS));
        }

        let password_hash = hash_password(input.password, self.bcrypt_cost).await?;
        let user = User::new(
            email,
            name,
            password_hash,
            input.goal.unwrap_or_default(),
            input.level.unwrap_or_default(),
        );

        // A concurrent registration can still win the unique index
        self.users.create(&user).await.map_err(|e| match e {
            DatabaseError::Duplicate { .. } => AppError::already_exists(EMAIL_ALREADY_EXISTS),
            other => AppError::from(other),
        })?;

        info!(user.id = %user.id, "User registered");
        AppLogger::log_auth_event(&user.id.to_string(), "register", true, None);
        self.issue(&user)
    }

    /// Verify credentials and issue a token
    ///
    /// # Errors
    ///
    /// Returns `AUTH_INVALID` with a uniform message for an unknown email or
    /// a wrong password
    pub async fn login(&self, email: &str, password: String) -> AppResult<AuthResponse> {
        let email = normalize_email(email);
        let Some(user) = self.users.get_by_email(&email).await? else {
            AppLogger::log_auth_event(&email, "login", false, Some("unknown email"));
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        };

        if !verify_password(password, user.password_hash.clone()).await? {
            AppLogger::log_auth_event(&user.id.to_string(), "login", false, Some("bad password"));
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        }

        AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);
        self.issue(&user)
    }

    fn issue(&self, user: &User) -> AppResult<AuthResponse> {
        Ok(AuthResponse {
            access_token: self.auth_manager.generate_token(user)?,
            user: UserSummary::from(user),
        })
    }
}

/// Trim and lowercase an email for storage and lookup
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate email format
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.len() <= 5 || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some(at_pos) = email.find('@') else {
        return false;
    };
    if at_pos == 0 || at_pos == email.len() - 1 {
        return false;
    }
    let domain_part = &email[at_pos + 1..];
    !domain_part.contains('@') && domain_part.contains('.')
}

/// Trim a display name and enforce the minimum length
///
/// # Errors
///
/// Returns `INVALID_INPUT` if the trimmed name is too short
pub fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(AppError::invalid_input(format!(
            "Name must be at least {MIN_NAME_LENGTH} characters long"
        )));
    }
    Ok(name.to_owned())
}
