// ABOUTME: Tests for loading server configuration from environment variables
// ABOUTME: Serialized because every test mutates the process environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use onper_server::config::{DatabaseUrl, Environment, PlanLookupPolicy, ServerConfig};
use serial_test::serial;

const CONFIG_VARS: [&str; 11] = [
    "HTTP_PORT",
    "PORT",
    "HOST",
    "DATABASE_URL",
    "JWT_SECRET",
    "JWT_EXPIRY_HOURS",
    "BCRYPT_COST",
    "FRONTEND_URL",
    "ENVIRONMENT",
    "PLAN_UNKNOWN_POLICY",
    "MOTIVATION_HISTORY_LIMIT",
];

fn clear_config_env() {
    for var in CONFIG_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_when_environment_is_empty() {
    clear_config_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 3000);
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(
        config.database,
        DatabaseUrl::SQLite {
            path: PathBuf::from("./data/onper.db")
        }
    );
    assert_eq!(config.auth.jwt_expiry_hours, 168);
    assert_eq!(config.auth.bcrypt_cost, 10);
    assert!(!config.auth.jwt_secret.is_empty());
    assert_eq!(config.plan_policy, PlanLookupPolicy::Reject);
    assert_eq!(config.motivation_history_limit, 20);
    assert_eq!(
        config.cors_origins,
        vec!["http://localhost:8080".to_owned(), "http://localhost:5173".to_owned()]
    );
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_config_env();
    env::set_var("PORT", "8081");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("JWT_SECRET", "configured-secret");
    env::set_var("JWT_EXPIRY_HOURS", "24");
    env::set_var("BCRYPT_COST", "12");
    env::set_var("FRONTEND_URL", "https://app.onper.com");
    env::set_var("PLAN_UNKNOWN_POLICY", "fallback");
    env::set_var("MOTIVATION_HISTORY_LIMIT", "50");

    let config = ServerConfig::from_env().unwrap();
    clear_config_env();

    assert_eq!(config.http_port, 8081);
    assert_eq!(config.database, DatabaseUrl::Memory);
    assert_eq!(config.auth.jwt_secret, "configured-secret");
    assert_eq!(config.auth.jwt_expiry_hours, 24);
    assert_eq!(config.auth.bcrypt_cost, 12);
    assert!(config.cors_origins.contains(&"https://app.onper.com".to_owned()));
    assert_eq!(config.plan_policy, PlanLookupPolicy::Fallback);
    assert_eq!(config.motivation_history_limit, 50);
}

#[test]
#[serial]
fn test_http_port_wins_over_port() {
    clear_config_env();
    env::set_var("HTTP_PORT", "9000");
    env::set_var("PORT", "9001");

    let config = ServerConfig::from_env().unwrap();
    clear_config_env();

    assert_eq!(config.http_port, 9000);
}

#[test]
#[serial]
fn test_production_requires_jwt_secret() {
    clear_config_env();
    env::set_var("ENVIRONMENT", "production");

    let result = ServerConfig::from_env();
    clear_config_env();

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("JWT_SECRET"));
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    for (var, value) in [
        ("HTTP_PORT", "not-a-port"),
        ("BCRYPT_COST", "99"),
        ("JWT_EXPIRY_HOURS", "0"),
        ("PLAN_UNKNOWN_POLICY", "sometimes"),
        ("DATABASE_URL", "postgres://localhost/onper"),
    ] {
        clear_config_env();
        env::set_var(var, value);
        let result = ServerConfig::from_env();
        clear_config_env();
        assert!(result.is_err(), "{var}={value} should be rejected");
    }
}
