// ABOUTME: Route module organization for ONPER HTTP endpoints
// ABOUTME: Shared extractors and authentication helpers used by every domain router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

//! Route module for the ONPER API
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Registration and login routes
pub mod auth;
/// Health check and readiness routes
pub mod health;
/// Motivation history and trigger routes
pub mod motivation;
/// Simulated notification routes
pub mod notifications;
/// Training session and plan routes
pub mod training;
/// Profile routes
pub mod users;

pub use auth::AuthRoutes;
pub use health::HealthRoutes;
pub use motivation::MotivationRoutes;
pub use notifications::NotificationRoutes;
pub use training::TrainingRoutes;
pub use users::UserRoutes;

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::Json;
use http::request::Parts;
use http::HeaderMap;
use onper_core::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;

use crate::auth::AuthResult;
use crate::resources::ServerResources;

/// Authenticate the caller from the `Authorization` header
///
/// # Errors
///
/// Returns an authentication error when the bearer token is missing or rejected
pub async fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> AppResult<AuthResult> {
    resources.auth_middleware.authenticate_headers(headers).await
}

/// JSON body extractor that answers malformed bodies with `INVALID_INPUT`
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
    }
}

/// Query string extractor that answers bad parameters with `INVALID_INPUT`
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
    }
}
