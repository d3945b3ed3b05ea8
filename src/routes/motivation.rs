// ABOUTME: Motivation route handlers for history, latest message, and manual triggers
// ABOUTME: Milestone and daily reminder checks answer null when nothing fires
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::{HeaderMap, StatusCode};
use onper_core::errors::AppError;
use serde::Deserialize;

use super::{authenticate, ValidatedQuery};
use crate::resources::ServerResources;
use crate::services::MotivationService;

/// `?limit=` for the history
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of entries
    pub limit: Option<u32>,
}

/// Motivation routes implementation
pub struct MotivationRoutes;

impl MotivationRoutes {
    /// Create all motivation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/motivation/history", get(Self::handle_history))
            .route("/motivation/latest", get(Self::handle_latest))
            .route(
                "/motivation/check-milestones",
                post(Self::handle_check_milestones),
            )
            .route("/motivation/daily-reminder", post(Self::handle_daily_reminder))
            .with_state(resources)
    }

    /// Handle GET /motivation/history
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ValidatedQuery(query): ValidatedQuery<HistoryQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let history = MotivationService::from_resources(&resources)
            .history(auth.user_id, query.limit)
            .await?;

        Ok((StatusCode::OK, Json(history)).into_response())
    }

    /// Handle GET /motivation/latest
    async fn handle_latest(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let latest = MotivationService::from_resources(&resources)
            .latest(auth.user_id)
            .await?;

        Ok((StatusCode::OK, Json(latest)).into_response())
    }

    /// Handle POST /motivation/check-milestones
    async fn handle_check_milestones(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let achievement = MotivationService::from_resources(&resources)
            .check_milestones(auth.user_id)
            .await?;

        Ok((StatusCode::OK, Json(achievement)).into_response())
    }

    /// Handle POST /motivation/daily-reminder
    async fn handle_daily_reminder(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let reminder = MotivationService::from_resources(&resources)
            .daily_reminder(auth.user_id)
            .await?;

        Ok((StatusCode::OK, Json(reminder)).into_response())
    }
}
