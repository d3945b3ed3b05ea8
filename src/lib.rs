// ABOUTME: Main library entry point for the ONPER marathon training API
// ABOUTME: Exposes configuration, persistence, services, and the axum HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

#![deny(unsafe_code)]

//! # ONPER Server
//!
//! REST backend for runners preparing for a 5K, 10K, half or full marathon.
//! Users register with a goal and experience level, receive a generated
//! week-by-week plan, log training sessions, and get short motivational
//! messages when they complete a run, miss one, or pass a distance milestone.
//!
//! ## Architecture
//!
//! - **Routes**: thin axum handlers that authenticate and delegate
//! - **Services**: business rules over repository traits
//! - **Database**: `SQLite` via `sqlx` with idempotent table creation
//! - **Intelligence** (`onper-intelligence`): plan tables, message pools, milestones
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use onper_server::config::ServerConfig;
//! use onper_server::database::Database;
//! use onper_server::resources::ServerResources;
//! use onper_server::server::OnperServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database.to_connection_string()).await?;
//!     let resources = Arc::new(ServerResources::new(database, Arc::new(config)));
//!     OnperServer::new(resources).run().await
//! }
//! ```

/// JWT issuing and password hashing
pub mod auth;

/// Environment-based configuration
pub mod config;

/// `SQLite` persistence and repository traits
pub mod database;

/// Structured logging setup
pub mod logging;

/// Authentication, CORS, and request tracing middleware
pub mod middleware;

/// Shared server state
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Business logic
pub mod services;
