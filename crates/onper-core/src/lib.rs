// ABOUTME: Core types and constants for the ONPER marathon training platform
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

#![deny(unsafe_code)]

//! # ONPER Core
//!
//! Foundation crate providing shared types and constants for the ONPER
//! training platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Users, training sessions, motivation logs and their enumerations

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and configuration defaults organized by domain
pub mod constants;

/// Core data models (User, Training, `MotivationLog`, Goal, Level, etc.)
pub mod models;
