// ABOUTME: ONPER API server binary
// ABOUTME: Loads environment configuration, opens the database, and serves HTTP until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

//! # ONPER Server Binary
//!
//! Starts the REST API for training plans, session tracking and motivation.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use onper_server::config::{DatabaseUrl, ServerConfig};
use onper_server::database::Database;
use onper_server::logging;
use onper_server::resources::ServerResources;
use onper_server::server::OnperServer;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "onper-server")]
#[command(about = "ONPER API - marathon training plans, session tracking and motivation")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (sqlite:<path> or sqlite::memory:)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url.as_deref() {
        config.database = DatabaseUrl::parse_url(database_url)?;
    }
    config.validate()?;

    info!("Starting ONPER API");
    info!("{}", config.summary());

    let database = Database::new(&config.database.to_connection_string()).await?;
    info!("Database initialized: {}", config.database.to_connection_string());

    let resources = Arc::new(ServerResources::new(database, Arc::new(config)));

    if let Err(e) = OnperServer::new(resources).run().await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
