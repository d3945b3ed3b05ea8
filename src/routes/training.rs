// ABOUTME: Training session route handlers and the plan endpoint
// ABOUTME: Parses dates and identifiers, then delegates to the training service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

//! Training routes
//!
//! Every route is scoped to the authenticated caller; another user's
//! session answers exactly like a missing one.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use http::{HeaderMap, StatusCode};
use onper_core::constants::messages::{TRAINING_DELETED, TRAINING_NOT_FOUND};
use onper_core::constants::validation::MAX_PAGE_LIMIT;
use onper_core::errors::{AppError, AppResult};
use onper_core::models::Mood;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::{authenticate, ValidatedJson, ValidatedQuery};
use crate::database::TrainingUpdate;
use crate::resources::ServerResources;
use crate::services::{NewTraining, TrainingService};

/// New session body
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTrainingRequest {
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    pub date: String,
    /// Distance in kilometres
    pub distance: f64,
    /// Duration in minutes
    pub duration: u32,
    /// How the runner felt
    #[serde(default)]
    pub mood: Option<Mood>,
    /// Completion flag
    #[serde(default)]
    pub completed: Option<bool>,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial session update body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTrainingRequest {
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
    /// Distance in kilometres
    #[serde(default)]
    pub distance: Option<f64>,
    /// Duration in minutes
    #[serde(default)]
    pub duration: Option<u32>,
    /// How the runner felt
    #[serde(default)]
    pub mood: Option<Mood>,
    /// Completion flag
    #[serde(default)]
    pub completed: Option<bool>,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// `?limit=` for the session list
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListTrainingQuery {
    /// Maximum number of sessions
    pub limit: Option<u32>,
}

/// `?goal=&level=` for the plan endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanQuery {
    /// Goal name such as `FIVE_K`
    pub goal: Option<String>,
    /// Level name such as `BEGINNER`
    pub level: Option<String>,
}

/// Training routes implementation
pub struct TrainingRoutes;

impl TrainingRoutes {
    /// Create all training routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/training", get(Self::handle_list).post(Self::handle_create))
            .route("/training/plan", get(Self::handle_plan))
            .route(
                "/training/:id",
                get(Self::handle_get)
                    .patch(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle POST /training
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ValidatedJson(request): ValidatedJson<CreateTrainingRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let input = NewTraining {
            date: parse_training_date(&request.date)?,
            distance: request.distance,
            duration: request.duration,
            mood: request.mood,
            completed: request.completed,
            notes: request.notes,
        };

        let training = TrainingService::from_resources(&resources)
            .create(auth.user_id, input)
            .await?;

        Ok((StatusCode::CREATED, Json(training)).into_response())
    }

    /// Handle GET /training
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ValidatedQuery(query): ValidatedQuery<ListTrainingQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let limit = query.limit.map(|limit| limit.min(MAX_PAGE_LIMIT));

        let trainings = TrainingService::from_resources(&resources)
            .list(auth.user_id, limit)
            .await?;

        Ok((StatusCode::OK, Json(trainings)).into_response())
    }

    /// Handle GET /training/plan
    async fn handle_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ValidatedQuery(query): ValidatedQuery<PlanQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let plan = TrainingService::from_resources(&resources)
            .generate_plan(auth.user_id, query.goal.as_deref(), query.level.as_deref())
            .await?;

        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    /// Handle GET /training/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let training = TrainingService::from_resources(&resources)
            .get(auth.user_id, parse_training_id(&id)?)
            .await?;

        Ok((StatusCode::OK, Json(training)).into_response())
    }

    /// Handle PATCH /training/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        ValidatedJson(request): ValidatedJson<UpdateTrainingRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let training_id = parse_training_id(&id)?;
        let update = TrainingUpdate {
            date: request.date.as_deref().map(parse_training_date).transpose()?,
            distance: request.distance,
            duration: request.duration,
            mood: request.mood,
            completed: request.completed,
            notes: request.notes,
        };

        let training = TrainingService::from_resources(&resources)
            .update(auth.user_id, training_id, update)
            .await?;

        Ok((StatusCode::OK, Json(training)).into_response())
    }

    /// Handle DELETE /training/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        TrainingService::from_resources(&resources)
            .delete(auth.user_id, parse_training_id(&id)?)
            .await?;

        Ok((StatusCode::OK, Json(json!({ "message": TRAINING_DELETED }))).into_response())
    }
}

/// A malformed id cannot name an existing session
fn parse_training_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::not_found(TRAINING_NOT_FOUND).with_resource_id(id))
}

/// Parse an RFC 3339 timestamp, a zone-less `YYYY-MM-DDTHH:MM:SS`, or a
/// bare `YYYY-MM-DD`; zone-less values are taken as UTC
///
/// # Errors
///
/// Returns `INVALID_INPUT` when none of the formats match
pub fn parse_training_date(value: &str) -> AppResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| {
            AppError::invalid_input(format!(
                "Invalid date '{value}'. Expected an ISO 8601 date such as 2024-01-15"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_training_date_formats() {
        assert_eq!(
            parse_training_date("2024-01-15").unwrap().to_rfc3339(),
            "2024-01-15T00:00:00+00:00"
        );
        assert_eq!(
            parse_training_date("2024-01-15T07:30:00+02:00")
                .unwrap()
                .to_rfc3339(),
            "2024-01-15T05:30:00+00:00"
        );
        assert_eq!(
            parse_training_date("2024-01-15T07:30:00").unwrap().to_rfc3339(),
            "2024-01-15T07:30:00+00:00"
        );
        assert!(parse_training_date("15/01/2024").is_err());
        assert!(parse_training_date("2024-02-30").is_err());
    }

    #[test]
    fn test_malformed_id_is_not_found() {
        let err = parse_training_id("not-a-uuid").unwrap_err();
        assert_eq!(err.message, TRAINING_NOT_FOUND);
        assert_eq!(err.http_status(), 404);
    }
}
