// ABOUTME: Bearer token authentication for protected HTTP routes
// ABOUTME: Validates the JWT and confirms the user still exists before yielding the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use std::sync::Arc;

use http::header::AUTHORIZATION;
use http::HeaderMap;
use onper_core::errors::{AppError, AppResult};
use tracing::{debug, field, warn, Span};

use crate::auth::{AuthManager, AuthResult};
use crate::database::repositories::UserRepository;
use crate::logging::AppLogger;

const BEARER_PREFIX: &str = "Bearer ";

/// Middleware for `JWT` authentication of REST requests
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: AuthManager,
    users: Arc<dyn UserRepository>,
}

impl AuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub fn new(auth_manager: AuthManager, users: Arc<dyn UserRepository>) -> Self {
        Self {
            auth_manager,
            users,
        }
    }

    /// Authenticate from request headers
    ///
    /// # Errors
    ///
    /// See [`Self::authenticate_request`]
    pub async fn authenticate_headers(&self, headers: &HeaderMap) -> AppResult<AuthResult> {
        let auth_header = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        self.authenticate_request(auth_header).await
    }

    /// Authenticate an `Authorization` header value
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` when the header is absent, `AUTH_MALFORMED`
    /// when it is not a bearer token, the token's own error when validation
    /// fails, and `AUTH_INVALID` when the user no longer exists
    #[tracing::instrument(
        skip(self, auth_header),
        fields(user_id = field::Empty, success = field::Empty)
    )]
    pub async fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<AuthResult> {
        let Some(header) = auth_header else {
            debug!("Authentication failed: missing authorization header");
            return Err(AppError::auth_required());
        };

        // Security: never log the header content
        let Some(token) = header.strip_prefix(BEARER_PREFIX).map(str::trim) else {
            Span::current().record("success", false);
            return Err(AppError::auth_malformed(
                "Authorization header must use the Bearer scheme",
            ));
        };
        if token.is_empty() {
            Span::current().record("success", false);
            return Err(AppError::auth_malformed("Bearer token is empty"));
        }

        let auth = self.auth_manager.authenticate_token(token).map_err(|e| {
            Span::current().record("success", false);
            e
        })?;

        if self.users.get_by_id(auth.user_id).await?.is_none() {
            warn!(user.id = %auth.user_id, "Token subject no longer exists");
            AppLogger::log_security_event(
                "token_for_missing_user",
                "valid token presented for a deleted account",
                Some(&auth.user_id.to_string()),
            );
            Span::current().record("success", false);
            return Err(AppError::auth_invalid("User for this token no longer exists"));
        }

        Span::current()
            .record("user_id", auth.user_id.to_string())
            .record("success", true);
        debug!(user.id = %auth.user_id, "Request authenticated");
        Ok(auth)
    }
}
