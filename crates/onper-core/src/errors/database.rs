// ABOUTME: Database error type shared by repositories and the storage layer
// ABOUTME: Converts sqlx failures into structured, matchable variants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

/// Errors raised by the persistence layer
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Pool could not hand out a connection
    #[error("Database connection failed: {context}")]
    ConnectionError {
        /// Underlying failure description
        context: String,
    },

    /// Statement failed to execute
    #[error("Database query failed: {context}")]
    QueryError {
        /// Underlying failure description
        context: String,
    },

    /// Schema setup failed
    #[error("Database migration failed: {context}")]
    MigrationError {
        /// Underlying failure description
        context: String,
    },

    /// Row expected but absent
    #[error("{entity_type} not found: {entity_id}")]
    NotFound {
        /// Kind of entity looked up
        entity_type: &'static str,
        /// Identifier used for the lookup
        entity_id: String,
    },

    /// Unique constraint violated
    #[error("{entity_type} already exists: {detail}")]
    Duplicate {
        /// Kind of entity inserted
        entity_type: &'static str,
        /// Conflicting value or constraint
        detail: String,
    },

    /// Stored value could not be decoded into a domain type
    #[error("Invalid stored value for {field}: {value}")]
    InvalidData {
        /// Column name
        field: &'static str,
        /// Offending raw value
        value: String,
    },
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::NotFound {
                entity_type: "row",
                entity_id: "unknown".to_owned(),
            },
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => Self::Duplicate {
                entity_type: "record",
                detail: db_error.message().to_owned(),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::ConnectionError {
                    context: error.to_string(),
                }
            }
            other => Self::QueryError {
                context: other.to_string(),
            },
        }
    }
}
