// ABOUTME: Demo data seeder for local development of the ONPER API
// ABOUTME: Upserts a demo runner with sample training sessions and motivation history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

//! Demo data seeder for the ONPER API.
//!
//! Usage:
//! ```bash
//! # Seed the database named by DATABASE_URL (or the default)
//! cargo run --bin seed-demo-data
//!
//! # Seed a specific database
//! cargo run --bin seed-demo-data -- --database-url sqlite:./data/dev.db
//! ```
//!
//! Re-running is safe: an existing demo user is reused and sample data is
//! only added when the user has no sessions yet.

use std::env;

use anyhow::Result;
use chrono::{Duration, Utc};
use clap::Parser;
use onper_core::constants::defaults;
use onper_core::models::{Goal, Level, Mood, MotivationLog, Training, TriggerType, User};
use onper_server::auth::hash_password;
use onper_server::database::repositories::{
    MotivationLogRepository, MotivationLogRepositoryImpl, TrainingRepository,
    TrainingRepositoryImpl, UserRepository, UserRepositoryImpl,
};
use onper_server::database::Database;
use tracing::info;
use uuid::Uuid;

const DEMO_EMAIL: &str = "demo@onper.com";
/// Password: `demo123`
const DEMO_PASSWORD: &str = "demo123";
const DEMO_NAME: &str = "Demo Runner";

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "ONPER demo data seeder",
    long_about = "Create a demo runner with sample sessions and motivation history"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,
}

/// Sample session: days ago, distance, minutes, mood, notes
struct SampleSession {
    days_ago: i64,
    distance: f64,
    duration: u32,
    mood: Mood,
    notes: &'static str,
}

const SAMPLE_SESSIONS: [SampleSession; 3] = [
    SampleSession {
        days_ago: 7,
        distance: 5.0,
        duration: 30,
        mood: Mood::Normal,
        notes: "First run of the week!",
    },
    SampleSession {
        days_ago: 5,
        distance: 7.5,
        duration: 45,
        mood: Mood::Energized,
        notes: "Felt great today",
    },
    SampleSession {
        days_ago: 3,
        distance: 10.0,
        duration: 60,
        mood: Mood::Tired,
        notes: "Long run, but completed!",
    },
];

const SAMPLE_MOTIVATION: [(TriggerType, &str); 2] = [
    (
        TriggerType::Completed,
        "Yesterday you were ahead of 99% of people. Today just beat yourself.",
    ),
    (
        TriggerType::Milestone,
        "You've completed 3 runs this week! You're becoming unstoppable.",
    ),
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();
    tracing_subscriber::fmt().with_target(false).init();

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| defaults::DEFAULT_DATABASE_URL.to_owned());
    info!("Seeding {database_url}");

    let database = Database::new(&database_url).await?;
    let users = UserRepositoryImpl::new(database.clone());
    let trainings = TrainingRepositoryImpl::new(database.clone());
    let motivation_logs = MotivationLogRepositoryImpl::new(database.clone());

    let user_id = upsert_demo_user(&users).await?;

    if trainings.list(user_id, Some(1)).await?.is_empty() {
        seed_sessions(&trainings, user_id).await?;
        seed_motivation(&motivation_logs, user_id).await?;
    } else {
        info!("Demo user already has sessions, skipping sample data");
    }

    database.close().await;
    info!("Seeding complete. Log in as {DEMO_EMAIL} / {DEMO_PASSWORD}");
    Ok(())
}

async fn upsert_demo_user(users: &UserRepositoryImpl) -> Result<Uuid> {
    if let Some(existing) = users.get_by_email(DEMO_EMAIL).await? {
        info!("Demo user already exists: {}", existing.id);
        return Ok(existing.id);
    }

    let password_hash = hash_password(DEMO_PASSWORD.to_owned(), defaults::DEFAULT_BCRYPT_COST).await?;
    let user = User::new(
        DEMO_EMAIL.to_owned(),
        DEMO_NAME.to_owned(),
        password_hash,
        Goal::Full,
        Level::Beginner,
    );
    let id = users.create(&user).await?;
    info!("Demo user created: {DEMO_EMAIL}");
    Ok(id)
}

async fn seed_sessions(trainings: &TrainingRepositoryImpl, user_id: Uuid) -> Result<()> {
    let now = Utc::now();
    for sample in &SAMPLE_SESSIONS {
        let training = Training {
            id: Uuid::new_v4(),
            user_id,
            date: now - Duration::days(sample.days_ago),
            distance: sample.distance,
            duration: sample.duration,
            mood: sample.mood,
            completed: true,
            notes: Some(sample.notes.to_owned()),
            created_at: now,
            updated_at: now,
        };
        trainings.create(&training).await?;
    }
    info!("Created {} sample training sessions", SAMPLE_SESSIONS.len());
    Ok(())
}

async fn seed_motivation(logs: &MotivationLogRepositoryImpl, user_id: Uuid) -> Result<()> {
    for (trigger, message) in SAMPLE_MOTIVATION {
        logs.create(&MotivationLog::new(user_id, trigger, message.to_owned()))
            .await?;
    }
    info!("Created {} sample motivation logs", SAMPLE_MOTIVATION.len());
    Ok(())
}
