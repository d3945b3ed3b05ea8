// ABOUTME: Repository traits abstracting persistence for services
// ABOUTME: Each trait has a SQLite-backed implementation wrapping the shared Database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

//! Repository pattern over [`Database`](super::Database).
//!
//! Services depend on these traits rather than on the concrete database so
//! tests can assemble them over an in-memory pool.

mod motivation_repository;
mod training_repository;
mod user_repository;

pub use motivation_repository::MotivationLogRepositoryImpl;
pub use training_repository::TrainingRepositoryImpl;
pub use user_repository::UserRepositoryImpl;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use onper_core::errors::DatabaseError;
use onper_core::models::{MotivationLog, Training, User};
use uuid::Uuid;

use super::{ProfileUpdate, TrainingUpdate, TrainingUpdateOutcome};

/// User account storage
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, failing on a duplicate email
    async fn create(&self, user: &User) -> Result<Uuid, DatabaseError>;

    /// Look up by id
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    /// Look up by exact email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Apply a partial profile update
    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate)
        -> Result<User, DatabaseError>;
}

/// Training session storage, always scoped by owner
#[async_trait]
pub trait TrainingRepository: Send + Sync {
    /// Insert a session
    async fn create(&self, training: &Training) -> Result<(), DatabaseError>;

    /// Newest-first list, optionally limited
    async fn list(&self, user_id: Uuid, limit: Option<u32>) -> Result<Vec<Training>, DatabaseError>;

    /// Fetch one session of `user_id`
    async fn get(&self, id: Uuid, user_id: Uuid) -> Result<Option<Training>, DatabaseError>;

    /// Atomically apply the present fields of `update` to an owned session
    ///
    /// Returns `None` when the session does not exist for this owner.
    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: &TrainingUpdate,
    ) -> Result<Option<TrainingUpdateOutcome>, DatabaseError>;

    /// Delete an owned session, returning whether it existed
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, DatabaseError>;

    /// Every completed session
    async fn list_completed(&self, user_id: Uuid) -> Result<Vec<Training>, DatabaseError>;

    /// First completed session dated at or after `since`
    async fn find_completed_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Option<Training>, DatabaseError>;

    /// Earliest session dated in `[start, end)`
    async fn find_first_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<Training>, DatabaseError>;
}

/// Motivation history storage
#[async_trait]
pub trait MotivationLogRepository: Send + Sync {
    /// Append an entry
    async fn create(&self, log: &MotivationLog) -> Result<(), DatabaseError>;

    /// Newest-first history, at most `limit` entries
    async fn list(&self, user_id: Uuid, limit: u32) -> Result<Vec<MotivationLog>, DatabaseError>;

    /// Newest entry
    async fn latest(&self, user_id: Uuid) -> Result<Option<MotivationLog>, DatabaseError>;
}
