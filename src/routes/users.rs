// ABOUTME: Profile route handlers for reading and updating the current user
// ABOUTME: Profile reads include statistics over completed training sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::{HeaderMap, StatusCode};
use onper_core::errors::AppError;
use onper_core::models::{Goal, Level};
use serde::Deserialize;

use super::{authenticate, ValidatedJson};
use crate::database::ProfileUpdate;
use crate::resources::ServerResources;
use crate::services::UserService;

/// Partial profile update body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    /// New display name
    #[serde(default)]
    pub name: Option<String>,
    /// New training goal
    #[serde(default)]
    pub goal: Option<Goal>,
    /// New experience level
    #[serde(default)]
    pub level: Option<Level>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            name: request.name,
            goal: request.goal,
            level: request.level,
        }
    }
}

/// Profile routes implementation
pub struct UserRoutes;

impl UserRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/users/profile",
                get(Self::handle_get_profile).patch(Self::handle_update_profile),
            )
            .with_state(resources)
    }

    /// Handle GET /users/profile
    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let profile = UserService::from_resources(&resources)
            .profile(auth.user_id)
            .await?;

        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle PATCH /users/profile
    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let user = UserService::from_resources(&resources)
            .update_profile(auth.user_id, request.into())
            .await?;

        Ok((StatusCode::OK, Json(user)).into_response())
    }
}
