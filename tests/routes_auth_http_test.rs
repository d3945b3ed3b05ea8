// ABOUTME: HTTP integration tests for registration, login, and bearer token checks
// ABOUTME: Exercises the full router against an in-memory database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

// ============================================================================
// POST /auth/register
// ============================================================================

#[tokio::test]
async fn test_register_returns_token_and_user() {
    let resources = common::create_test_resources().await;

    let response = AxumTestRequest::post("/auth/register")
        .json(&json!({
            "email": "Runner@Example.com ",
            "name": "Ana Runner",
            "password": "secret123",
            "goal": "HALF",
            "level": "INTERMEDIATE"
        }))
        .send(common::app(&resources))
        .await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json();
    assert!(body["accessToken"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "runner@example.com");
    assert_eq!(body["user"]["name"], "Ana Runner");
    assert_eq!(body["user"]["goal"], "HALF");
    assert_eq!(body["user"]["level"], "INTERMEDIATE");
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_defaults_goal_and_level() {
    let resources = common::create_test_resources().await;

    let response = AxumTestRequest::post("/auth/register")
        .json(&json!({
            "email": "defaults@example.com",
            "name": "Default Runner",
            "password": "secret123"
        }))
        .send(common::app(&resources))
        .await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json();
    assert_eq!(body["user"]["goal"], "FULL");
    assert_eq!(body["user"]["level"], "BEGINNER");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let resources = common::create_test_resources().await;
    common::register_default_user(&resources, "taken@example.com").await;

    let response = AxumTestRequest::post("/auth/register")
        .json(&json!({
            "email": "TAKEN@example.com",
            "name": "Second Runner",
            "password": "secret123"
        }))
        .send(common::app(&resources))
        .await;

    assert_eq!(response.status(), 409);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");
    assert_eq!(body["error"]["message"], "User with this email already exists");
}

#[tokio::test]
async fn test_register_validation_failures() {
    let resources = common::create_test_resources().await;

    let cases = [
        json!({"email": "not-an-email", "name": "Valid Name", "password": "secret123"}),
        json!({"email": "ok@example.com", "name": "A", "password": "secret123"}),
        json!({"email": "ok@example.com", "name": "Valid Name", "password": "12345"}),
        json!({"email": "ok@example.com", "name": "Valid Name", "password": "secret123", "goal": "ULTRA"}),
        json!({"email": "ok@example.com", "name": "Valid Name", "password": "secret123", "role": "admin"}),
    ];

    for case in cases {
        let response = AxumTestRequest::post("/auth/register")
            .json(&case)
            .send(common::app(&resources))
            .await;
        assert_eq!(response.status(), 400, "expected 400 for {case}");
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "INVALID_INPUT", "case {case}");
    }
}

#[tokio::test]
async fn test_register_rejects_malformed_json() {
    let resources = common::create_test_resources().await;

    let response = AxumTestRequest::post("/auth/register")
        .raw_json("{\"email\": ")
        .send(common::app(&resources))
        .await;

    assert_eq!(response.status(), 400);
}

// ============================================================================
// POST /auth/login
// ============================================================================

#[tokio::test]
async fn test_login_with_valid_credentials() {
    let resources = common::create_test_resources().await;
    let (user_id, _) = common::register_default_user(&resources, "login@example.com").await;

    let response = AxumTestRequest::post("/auth/login")
        .json(&json!({"email": "LOGIN@example.com", "password": common::TEST_PASSWORD}))
        .send(common::app(&resources))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["user"]["id"], user_id.to_string());
    let token = body["accessToken"].as_str().unwrap();

    let profile = AxumTestRequest::get("/users/profile")
        .bearer(token)
        .send(common::app(&resources))
        .await;
    assert_eq!(profile.status(), 200);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let resources = common::create_test_resources().await;
    common::register_default_user(&resources, "exists@example.com").await;

    let wrong_password = AxumTestRequest::post("/auth/login")
        .json(&json!({"email": "exists@example.com", "password": "wrong-password"}))
        .send(common::app(&resources))
        .await;
    let unknown_email = AxumTestRequest::post("/auth/login")
        .json(&json!({"email": "nobody@example.com", "password": "whatever1"}))
        .send(common::app(&resources))
        .await;

    assert_eq!(wrong_password.status(), 401);
    assert_eq!(unknown_email.status(), 401);
    let first: Value = wrong_password.json();
    let second: Value = unknown_email.json();
    assert_eq!(first["error"]["message"], "Invalid credentials");
    assert_eq!(first["error"]["message"], second["error"]["message"]);
}

// ============================================================================
// Bearer token enforcement
// ============================================================================

#[tokio::test]
async fn test_protected_routes_require_bearer_token() {
    let resources = common::create_test_resources().await;

    let missing = AxumTestRequest::get("/training")
        .send(common::app(&resources))
        .await;
    assert_eq!(missing.status(), 401);
    let body: Value = missing.json();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");

    let wrong_scheme = AxumTestRequest::get("/training")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .send(common::app(&resources))
        .await;
    assert_eq!(wrong_scheme.status(), 401);

    let garbage = AxumTestRequest::get("/training")
        .bearer("not.a.jwt")
        .send(common::app(&resources))
        .await;
    assert_eq!(garbage.status(), 401);
}

#[tokio::test]
async fn test_token_from_other_secret_is_rejected() {
    let resources = common::create_test_resources().await;
    let (_, token) = common::register_default_user(&resources, "secret@example.com").await;

    let mut other_config = common::test_config();
    other_config.auth.jwt_secret = "a-completely-different-secret".to_owned();
    let other = common::create_test_resources_with(other_config).await;

    let response = AxumTestRequest::get("/users/profile")
        .bearer(&token)
        .send(common::app(&other))
        .await;

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_token_for_deleted_user_is_rejected() {
    let resources = common::create_test_resources().await;
    let (user_id, token) = common::register_default_user(&resources, "gone@example.com").await;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id.to_string())
        .execute(resources.database.pool())
        .await
        .unwrap();

    let response = AxumTestRequest::get("/users/profile")
        .bearer(&token)
        .send(common::app(&resources))
        .await;

    assert_eq!(response.status(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_INVALID");
}
