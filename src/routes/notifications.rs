// ABOUTME: Notification route handlers for preferences, scheduling, and reminder checks
// ABOUTME: Delivery is simulated; sends are written to the log
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
use onper_core::models::NotificationType;
use serde::Deserialize;

use super::training::parse_training_date;
use super::{authenticate, ValidatedJson};
use crate::resources::ServerResources;
use crate::services::NotificationService;

/// Scheduling request body
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ScheduleNotificationRequest {
    /// Category
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    pub scheduled_for: String,
    /// Body text
    pub message: String,
}

/// Notification routes implementation
pub struct NotificationRoutes;

impl NotificationRoutes {
    /// Create all notification routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/notifications/preferences", get(Self::handle_preferences))
            .route("/notifications/schedule", post(Self::handle_schedule))
            .route("/notifications/check-missed", post(Self::handle_check_missed))
            .route(
                "/notifications/daily-reminder",
                post(Self::handle_daily_reminder),
            )
            .with_state(resources)
    }

    /// Handle GET /notifications/preferences
    async fn handle_preferences(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let preferences = NotificationService::preferences(auth.user_id);

        Ok((StatusCode::OK, Json(preferences)).into_response())
    }

    /// Handle POST /notifications/schedule
    async fn handle_schedule(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ValidatedJson(request): ValidatedJson<ScheduleNotificationRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let scheduled = NotificationService::schedule(
            auth.user_id,
            request.notification_type,
            parse_training_date(&request.scheduled_for)?,
            request.message,
        )?;

        Ok((StatusCode::OK, Json(scheduled)).into_response())
    }

    /// Handle POST /notifications/check-missed
    async fn handle_check_missed(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let receipt = NotificationService::from_resources(&resources)
            .check_missed_workouts(auth.user_id)
            .await?;

        Ok((StatusCode::OK, Json(receipt)).into_response())
    }

    /// Handle POST /notifications/daily-reminder
    async fn handle_daily_reminder(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let outcome = NotificationService::from_resources(&resources)
            .send_daily_reminder(auth.user_id)
            .await?;

        Ok((StatusCode::OK, Json(outcome)).into_response())
    }
}
