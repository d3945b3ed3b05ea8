// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds in-memory resources, the full router, and registered test users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `onper_server`

use std::env;
use std::sync::{Arc, Once};

use axum::Router;
use chrono::{DateTime, Utc};
use onper_core::models::{Goal, Level, Mood, Training};
use onper_intelligence::SeededMessageSelector;
use onper_server::config::{DatabaseUrl, Environment, PlanLookupPolicy, ServerConfig};
use onper_server::database::Database;
use onper_server::resources::ServerResources;
use onper_server::server::OnperServer;
use onper_server::services::{AuthService, RegisterInput};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Password used by every registered test user
pub const TEST_PASSWORD: &str = "secret123";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration for an in-memory database with the cheapest bcrypt cost
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.environment = Environment::Testing;
    config.database = DatabaseUrl::Memory;
    config.auth.jwt_secret = "test-secret-do-not-use-in-production".to_owned();
    config.auth.bcrypt_cost = 4;
    config
}

/// Resources over a fresh in-memory database
pub async fn create_test_resources() -> Arc<ServerResources> {
    create_test_resources_with(test_config()).await
}

/// Resources over a fresh in-memory database with the given plan policy
pub async fn create_test_resources_with_policy(policy: PlanLookupPolicy) -> Arc<ServerResources> {
    let mut config = test_config();
    config.plan_policy = policy;
    create_test_resources_with(config).await
}

/// Resources over a fresh in-memory database with a custom configuration
pub async fn create_test_resources_with(config: ServerConfig) -> Arc<ServerResources> {
    init_test_logging();
    let database = Database::new(&config.database.to_connection_string())
        .await
        .expect("Failed to create in-memory database");

    Arc::new(ServerResources::with_message_selector(
        database,
        Arc::new(config),
        Arc::new(SeededMessageSelector::new(42)),
    ))
}

/// Complete application router with middleware
pub fn app(resources: &Arc<ServerResources>) -> Router {
    OnperServer::new(resources.clone()).router()
}

/// Register a user through the auth service and return `(user_id, token)`
pub async fn register_user(
    resources: &Arc<ServerResources>,
    email: &str,
    goal: Goal,
    level: Level,
) -> (Uuid, String) {
    let response = AuthService::from_resources(resources)
        .register(RegisterInput {
            email: email.to_owned(),
            name: "Test Runner".to_owned(),
            password: TEST_PASSWORD.to_owned(),
            goal: Some(goal),
            level: Some(level),
        })
        .await
        .expect("Failed to register test user");

    (response.user.id, response.access_token)
}

/// Register a FULL/BEGINNER user
pub async fn register_default_user(
    resources: &Arc<ServerResources>,
    email: &str,
) -> (Uuid, String) {
    register_user(resources, email, Goal::Full, Level::Beginner).await
}

/// Store a session directly, bypassing motivation triggers
pub async fn insert_training(
    resources: &Arc<ServerResources>,
    user_id: Uuid,
    date: DateTime<Utc>,
    distance: f64,
    completed: bool,
) -> Training {
    let now = Utc::now();
    let training = Training {
        id: Uuid::new_v4(),
        user_id,
        date,
        distance,
        duration: 30,
        mood: Mood::Normal,
        completed,
        notes: None,
        created_at: now,
        updated_at: now,
    };
    resources
        .trainings
        .create(&training)
        .await
        .expect("Failed to insert training");
    training
}
