// ABOUTME: User authentication route handlers for registration and login
// ABOUTME: Thin wrappers that decode credentials and delegate to the auth service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

//! Authentication routes
//!
//! The only unauthenticated API routes besides health checks.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use http::StatusCode;
use onper_core::errors::AppError;
use onper_core::models::{Goal, Level};
use serde::Deserialize;

use super::ValidatedJson;
use crate::resources::ServerResources;
use crate::services::{AuthService, RegisterInput};

/// User registration request
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    /// Login email
    pub email: String,
    /// Display name, at least two characters
    pub name: String,
    /// Password, at least six characters
    pub password: String,
    /// Training goal
    #[serde(default)]
    pub goal: Option<Goal>,
    /// Experience level
    #[serde(default)]
    pub level: Option<Level>,
}

/// User login request
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Password
    pub password: String,
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/register", post(Self::handle_register))
            .route("/auth/login", post(Self::handle_login))
            .with_state(resources)
    }

    /// Handle POST /auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        ValidatedJson(request): ValidatedJson<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let service = AuthService::from_resources(&resources);
        let response = service
            .register(RegisterInput {
                email: request.email,
                name: request.name,
                password: request.password,
                goal: request.goal,
                level: request.level,
            })
            .await?;

        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        ValidatedJson(request): ValidatedJson<LoginRequest>,
    ) -> Result<Response, AppError> {
        let service = AuthService::from_resources(&resources);
        let response = service.login(&request.email, request.password).await?;

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
