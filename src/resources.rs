// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Builds the auth manager, repositories, and message selector once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use std::sync::Arc;

use onper_intelligence::{MessageSelector, RandomMessageSelector};

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::repositories::{
    MotivationLogRepository, MotivationLogRepositoryImpl, TrainingRepository,
    TrainingRepositoryImpl, UserRepository, UserRepositoryImpl,
};
use crate::database::Database;
use crate::middleware::AuthMiddleware;

/// Immutable resources shared by all requests
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Connection pool
    pub database: Database,
    /// Token issuer and validator
    pub auth_manager: AuthManager,
    /// Bearer token checks for protected routes
    pub auth_middleware: AuthMiddleware,
    /// User storage
    pub users: Arc<dyn UserRepository>,
    /// Training session storage
    pub trainings: Arc<dyn TrainingRepository>,
    /// Motivation history storage
    pub motivation_logs: Arc<dyn MotivationLogRepository>,
    /// Message choice for motivation triggers
    pub message_selector: Arc<dyn MessageSelector>,
}

impl ServerResources {
    /// Create resources with a random message selector
    #[must_use]
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        Self::with_message_selector(database, config, Arc::new(RandomMessageSelector))
    }

    /// Create resources with a caller-supplied message selector
    #[must_use]
    pub fn with_message_selector(
        database: Database,
        config: Arc<ServerConfig>,
        message_selector: Arc<dyn MessageSelector>,
    ) -> Self {
        let auth_manager = AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.jwt_expiry_hours,
        );

        let users: Arc<dyn UserRepository> = Arc::new(UserRepositoryImpl::new(database.clone()));
        let trainings: Arc<dyn TrainingRepository> =
            Arc::new(TrainingRepositoryImpl::new(database.clone()));
        let motivation_logs: Arc<dyn MotivationLogRepository> =
            Arc::new(MotivationLogRepositoryImpl::new(database.clone()));

        let auth_middleware = AuthMiddleware::new(auth_manager.clone(), users.clone());

        Self {
            config,
            database,
            auth_manager,
            auth_middleware,
            users,
            trainings,
            motivation_logs,
            message_selector,
        }
    }
}
