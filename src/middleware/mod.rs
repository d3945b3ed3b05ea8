// ABOUTME: HTTP middleware for request tracing, authentication, and CORS
// ABOUTME: Provides request ID generation, span creation, and bearer token checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

/// Bearer token authentication
pub mod auth;
/// Cross-origin policy
pub mod cors;
/// Request ids and spans
pub mod tracing;

// Authentication middleware
pub use auth::AuthMiddleware;

// CORS configuration
pub use cors::setup_cors;

// Request tracing and correlation
pub use tracing::{
    attach_request_id_to_errors, create_request_span, propagate_request_id_layer,
    set_request_id_layer, trace_layer, REQUEST_ID_HEADER,
};
