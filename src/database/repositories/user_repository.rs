// ABOUTME: User account repository implementation
// ABOUTME: Delegates registration, lookups, and profile updates to the SQLite database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use async_trait::async_trait;
use onper_core::errors::DatabaseError;
use onper_core::models::User;
use uuid::Uuid;

use super::UserRepository;
use crate::database::{Database, ProfileUpdate};

/// `SQLite` implementation of `UserRepository`
#[derive(Clone)]
pub struct UserRepositoryImpl {
    db: Database,
}

impl UserRepositoryImpl {
    /// Create a new `UserRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, user: &User) -> Result<Uuid, DatabaseError> {
        self.db.create_user(user).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        self.db.get_user(id).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        self.db.get_user_by_email(email).await
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<User, DatabaseError> {
        self.db.update_user_profile(id, update).await
    }
}
