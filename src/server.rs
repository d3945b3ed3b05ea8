// ABOUTME: HTTP server assembly for the ONPER API
// ABOUTME: Merges domain routers, applies tracing and CORS layers, and serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use std::future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::middleware::from_fn;
use axum::Router;
use onper_core::errors::AppError;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tracing::{info, warn};

use crate::middleware::{
    attach_request_id_to_errors, propagate_request_id_layer, set_request_id_layer, setup_cors,
    trace_layer,
};
use crate::resources::ServerResources;
use crate::routes::{
    AuthRoutes, HealthRoutes, MotivationRoutes, NotificationRoutes, TrainingRoutes, UserRoutes,
};

/// ONPER HTTP server
pub struct OnperServer {
    resources: Arc<ServerResources>,
}

impl OnperServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the complete application router with middleware
    #[must_use]
    pub fn router(&self) -> Router {
        let resources = &self.resources;

        Router::new()
            .merge(HealthRoutes::routes(resources.clone()))
            .merge(AuthRoutes::routes(resources.clone()))
            .merge(UserRoutes::routes(resources.clone()))
            .merge(TrainingRoutes::routes(resources.clone()))
            .merge(MotivationRoutes::routes(resources.clone()))
            .merge(NotificationRoutes::routes(resources.clone()))
            .fallback(Self::handle_unknown_route)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(trace_layer())
                    .layer(propagate_request_id_layer())
                    .layer(setup_cors(&resources.config))
                    .layer(from_fn(attach_request_id_to_errors)),
            )
    }

    /// Bind the configured address and serve until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails
    pub async fn run(self) -> Result<()> {
        let config = &self.resources.config;
        let address = format!("{}:{}", config.host, config.http_port);
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {address}"))?;
        let local_addr: SocketAddr = listener.local_addr()?;
        info!("ONPER API listening on http://{local_addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        self.resources.database.close().await;
        info!("Server shut down cleanly");
        Ok(())
    }

    async fn handle_unknown_route() -> AppError {
        AppError::not_found("Route not found")
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
