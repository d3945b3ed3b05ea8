// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database URL, JWT and bcrypt settings, CORS origins, and plan policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

//! Environment-based configuration
//!
//! All settings come from process environment variables; there is no config
//! file. Unset variables take the defaults in
//! [`onper_core::constants::defaults`].

use std::env;
use std::fmt;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use onper_core::constants::{cors, defaults};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Length of the generated development JWT secret
const GENERATED_SECRET_LENGTH: usize = 64;
/// Work factor range accepted by bcrypt
const BCRYPT_COST_RANGE: (u32, u32) = (4, 31);

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// How `GET /training/plan` treats a goal or level outside the closed sets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanLookupPolicy {
    /// Answer 400 with the offending value
    #[default]
    Reject,
    /// Serve the FULL/BEGINNER plan
    Fallback,
}

impl PlanLookupPolicy {
    /// Parse a `PLAN_UNKNOWN_POLICY` value
    ///
    /// # Errors
    ///
    /// Returns an error for anything other than `reject` or `fallback`
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "reject" | "strict" => Ok(Self::Reject),
            "fallback" => Ok(Self::Fallback),
            other => Err(anyhow!(
                "Invalid PLAN_UNKNOWN_POLICY '{other}', expected 'reject' or 'fallback'"
            )),
        }
    }
}

impl fmt::Display for PlanLookupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// File location
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not a `sqlite:` URL
    pub fn parse_url(s: &str) -> Result<Self> {
        let path = s
            .strip_prefix("sqlite://")
            .or_else(|| s.strip_prefix("sqlite:"))
            .ok_or_else(|| anyhow!("Unsupported database URL '{s}', expected sqlite:<path>"))?;

        if path == ":memory:" || path.is_empty() {
            Ok(Self::Memory)
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(path),
            })
        }
    }

    /// Connection string for `sqlx`
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Whether data vanishes with the process
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/onper.db"),
        }
    }
}

/// Token and password hashing settings
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database location
    pub database: DatabaseUrl,
    /// JWT and bcrypt settings
    pub auth: AuthConfig,
    /// Origins allowed by CORS (credentials enabled)
    pub cors_origins: Vec<String>,
    /// Handling of unknown plan goal/level values
    pub plan_policy: PlanLookupPolicy,
    /// Default page size for motivation history
    pub motivation_history_limit: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.into(),
            http_port: defaults::DEFAULT_HTTP_PORT,
            environment: Environment::Development,
            database: DatabaseUrl::default(),
            auth: AuthConfig {
                jwt_secret: generate_secret(),
                jwt_expiry_hours: defaults::DEFAULT_JWT_EXPIRY_HOURS,
                bcrypt_cost: defaults::DEFAULT_BCRYPT_COST,
            },
            cors_origins: build_cors_origins(None),
            plan_policy: PlanLookupPolicy::Reject,
            motivation_history_limit: defaults::DEFAULT_MOTIVATION_HISTORY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but unparseable, or if
    /// production runs without `JWT_SECRET`
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment = Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        let http_port = env::var("HTTP_PORT")
            .or_else(|_| env::var("PORT"))
            .map_or(Ok(defaults::DEFAULT_HTTP_PORT), |value| {
                value.parse().context("Invalid HTTP_PORT value")
            })?;

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment.is_production() => {
                return Err(anyhow!("JWT_SECRET must be set in production"));
            }
            _ => {
                warn!("JWT_SECRET not set, generating an ephemeral secret; tokens will not survive restarts");
                generate_secret()
            }
        };

        let config = Self {
            host: env_var_or("HOST", defaults::DEFAULT_HOST),
            http_port,
            environment,
            database: DatabaseUrl::parse_url(&env_var_or(
                "DATABASE_URL",
                defaults::DEFAULT_DATABASE_URL,
            ))?,
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours: env_var_or(
                    "JWT_EXPIRY_HOURS",
                    &defaults::DEFAULT_JWT_EXPIRY_HOURS.to_string(),
                )
                .parse()
                .context("Invalid JWT_EXPIRY_HOURS value")?,
                bcrypt_cost: env_var_or("BCRYPT_COST", &defaults::DEFAULT_BCRYPT_COST.to_string())
                    .parse()
                    .context("Invalid BCRYPT_COST value")?,
            },
            cors_origins: build_cors_origins(env::var("FRONTEND_URL").ok().as_deref()),
            plan_policy: PlanLookupPolicy::parse(&env_var_or("PLAN_UNKNOWN_POLICY", "reject"))?,
            motivation_history_limit: env_var_or(
                "MOTIVATION_HISTORY_LIMIT",
                &defaults::DEFAULT_MOTIVATION_HISTORY_LIMIT.to_string(),
            )
            .parse()
            .context("Invalid MOTIVATION_HISTORY_LIMIT value")?,
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is outside its usable range
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_expiry_hours <= 0 {
            return Err(anyhow!("JWT_EXPIRY_HOURS must be positive"));
        }
        let (min_cost, max_cost) = BCRYPT_COST_RANGE;
        if !(min_cost..=max_cost).contains(&self.auth.bcrypt_cost) {
            return Err(anyhow!("BCRYPT_COST must be between {min_cost} and {max_cost}"));
        }
        if self.motivation_history_limit == 0 {
            return Err(anyhow!("MOTIVATION_HISTORY_LIMIT must be at least 1"));
        }
        if self.environment.is_production() && self.database.is_memory() {
            warn!("Production is running on an in-memory database; data will be lost on restart");
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "ONPER Server Configuration:\n\
             - Address: {}:{}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - JWT Expiry: {}h\n\
             - bcrypt Cost: {}\n\
             - CORS Origins: {}\n\
             - Plan Lookup Policy: {}",
            self.host,
            self.http_port,
            self.environment,
            self.database.to_connection_string(),
            self.auth.jwt_expiry_hours,
            self.auth.bcrypt_cost,
            self.cors_origins.join(", "),
            self.plan_policy,
        )
    }
}

/// Default dev origins plus `FRONTEND_URL` when set
fn build_cors_origins(frontend_url: Option<&str>) -> Vec<String> {
    let mut origins: Vec<String> = cors::DEFAULT_ALLOWED_ORIGINS
        .iter()
        .map(|origin| (*origin).to_owned())
        .collect();

    if let Some(url) = frontend_url.map(str::trim).filter(|url| !url.is_empty()) {
        let url = url.trim_end_matches('/');
        if !origins.iter().any(|origin| origin == url) {
            origins.push(url.to_owned());
        }
    }
    origins
}

fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LENGTH)
        .map(char::from)
        .collect()
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
