// ABOUTME: Configuration module for centralized server settings
// ABOUTME: Re-exports the environment-driven ServerConfig and its typed parts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

//! Configuration module for the ONPER server

/// Environment and server configuration
pub mod environment;

pub use environment::{AuthConfig, DatabaseUrl, Environment, PlanLookupPolicy, ServerConfig};
