// ABOUTME: Integration tests for the simulated notification endpoints
// ABOUTME: Covers missed-workout detection, daily reminders, scheduling, and preferences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use chrono::{Duration, Utc};
use helpers::axum_test::AxumTestRequest;
use onper_intelligence::motivation::MISSED_MESSAGES;
use onper_server::services::{start_of_day, MotivationService};
use serde_json::{json, Value};

// ============================================================================
// POST /notifications/check-missed
// ============================================================================

#[tokio::test]
async fn test_uncompleted_session_yesterday_sends_reminder() {
    let resources = common::create_test_resources().await;
    let (user_id, token) = common::register_default_user(&resources, "missed@example.com").await;
    let yesterday_morning = start_of_day(Utc::now()) - Duration::hours(18);
    common::insert_training(&resources, user_id, yesterday_morning, 5.0, false).await;

    let response = AxumTestRequest::post("/notifications/check-missed")
        .bearer(&token)
        .send(common::app(&resources))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["userId"], user_id.to_string());
    assert_eq!(body["type"], "REMINDER");
    assert_eq!(body["status"], "sent");
    assert!(MISSED_MESSAGES.contains(&body["message"].as_str().unwrap()));

    let latest = MotivationService::from_resources(&resources)
        .latest(user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.message, body["message"].as_str().unwrap());
}

#[tokio::test]
async fn test_completed_session_yesterday_sends_nothing() {
    let resources = common::create_test_resources().await;
    let (user_id, token) = common::register_default_user(&resources, "kept@example.com").await;
    let yesterday_morning = start_of_day(Utc::now()) - Duration::hours(18);
    common::insert_training(&resources, user_id, yesterday_morning, 5.0, true).await;

    let response = AxumTestRequest::post("/notifications/check-missed")
        .bearer(&token)
        .send(common::app(&resources))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.text(), "null");
}

#[tokio::test]
async fn test_only_yesterdays_earliest_session_is_considered() {
    let resources = common::create_test_resources().await;
    let (user_id, token) = common::register_default_user(&resources, "earliest@example.com").await;
    let today = start_of_day(Utc::now());
    // Earliest of yesterday was completed, a later one was not
    common::insert_training(&resources, user_id, today - Duration::hours(20), 5.0, true).await;
    common::insert_training(&resources, user_id, today - Duration::hours(4), 5.0, false).await;
    // Outside the window on both sides
    common::insert_training(&resources, user_id, today - Duration::hours(30), 5.0, false).await;
    common::insert_training(&resources, user_id, today + Duration::hours(1), 5.0, false).await;

    let response = AxumTestRequest::post("/notifications/check-missed")
        .bearer(&token)
        .send(common::app(&resources))
        .await;

    assert_eq!(response.text(), "null");
}

#[tokio::test]
async fn test_no_session_yesterday_sends_nothing() {
    let resources = common::create_test_resources().await;
    let (_, token) = common::register_default_user(&resources, "idle@example.com").await;

    let response = AxumTestRequest::post("/notifications/check-missed")
        .bearer(&token)
        .send(common::app(&resources))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.text(), "null");
}

// ============================================================================
// POST /notifications/daily-reminder
// ============================================================================

#[tokio::test]
async fn test_daily_reminder_notification_sent() {
    let resources = common::create_test_resources().await;
    let (_, token) = common::register_default_user(&resources, "daily@example.com").await;

    let body: Value = AxumTestRequest::post("/notifications/daily-reminder")
        .bearer(&token)
        .send(common::app(&resources))
        .await
        .json();

    assert_eq!(body["status"], "sent");
    assert_eq!(body["type"], "REMINDER");
    assert!(body["sentAt"].is_string());
}

#[tokio::test]
async fn test_daily_reminder_notification_skipped() {
    let resources = common::create_test_resources().await;
    let (user_id, token) = common::register_default_user(&resources, "skipped@example.com").await;
    common::insert_training(&resources, user_id, Utc::now(), 5.0, true).await;

    let body: Value = AxumTestRequest::post("/notifications/daily-reminder")
        .bearer(&token)
        .send(common::app(&resources))
        .await
        .json();

    assert_eq!(body["status"], "skipped");
    assert_eq!(body["message"], "User has already trained today");
}

// ============================================================================
// Scheduling and preferences
// ============================================================================

#[tokio::test]
async fn test_schedule_acknowledges_request() {
    let resources = common::create_test_resources().await;
    let (user_id, token) = common::register_default_user(&resources, "schedule@example.com").await;

    let response = AxumTestRequest::post("/notifications/schedule")
        .bearer(&token)
        .json(&json!({
            "type": "MOTIVATION",
            "scheduledFor": "2030-01-01T08:00:00Z",
            "message": "Time to run"
        }))
        .send(common::app(&resources))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["userId"], user_id.to_string());
    assert_eq!(body["type"], "MOTIVATION");
    assert_eq!(body["status"], "scheduled");
    assert!(body["scheduledFor"].as_str().unwrap().starts_with("2030-01-01T08:00:00"));

    let invalid = AxumTestRequest::post("/notifications/schedule")
        .bearer(&token)
        .json(&json!({"type": "SPAM", "scheduledFor": "2030-01-01", "message": "x"}))
        .send(common::app(&resources))
        .await;
    assert_eq!(invalid.status(), 400);

    let blank = AxumTestRequest::post("/notifications/schedule")
        .bearer(&token)
        .json(&json!({"type": "REMINDER", "scheduledFor": "2030-01-01", "message": "  "}))
        .send(common::app(&resources))
        .await;
    assert_eq!(blank.status(), 400);
}

#[tokio::test]
async fn test_preferences_defaults() {
    let resources = common::create_test_resources().await;
    let (user_id, token) = common::register_default_user(&resources, "prefs@example.com").await;

    let body: Value = AxumTestRequest::get("/notifications/preferences")
        .bearer(&token)
        .send(common::app(&resources))
        .await
        .json();

    assert_eq!(body["userId"], user_id.to_string());
    assert_eq!(body["enabled"], true);
    assert_eq!(body["types"], json!(["REMINDER", "MOTIVATION", "MILESTONE"]));
    assert_eq!(body["quietHours"]["start"], "22:00");
    assert_eq!(body["quietHours"]["end"], "07:00");
    assert_eq!(body["frequency"], "daily");
}
