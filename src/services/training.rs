// ABOUTME: Training session business logic and plan generation
// ABOUTME: Owner-scoped CRUD that fires COMPLETED motivation on the transition to completed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

use std::sync::Arc;

use chrono::{DateTime, Utc};
use onper_core::constants::messages::{TRAINING_NOT_FOUND, USER_NOT_FOUND};
use onper_core::errors::{AppError, AppResult};
use onper_core::models::{Goal, Level, Mood, Training, TriggerType};
use onper_intelligence::{PlanGenerator, PlanLookupError, TrainingPlan};
use uuid::Uuid;

use super::MotivationService;
use crate::config::PlanLookupPolicy;
use crate::database::repositories::{TrainingRepository, UserRepository};
use crate::database::TrainingUpdate;
use crate::logging::AppLogger;
use crate::resources::ServerResources;

/// Data for a new session
#[derive(Debug, Clone)]
pub struct NewTraining {
    /// Session date
    pub date: DateTime<Utc>,
    /// Distance in kilometres
    pub distance: f64,
    /// Duration in minutes
    pub duration: u32,
    /// How the runner felt, NORMAL when absent
    pub mood: Option<Mood>,
    /// Completion flag, false when absent
    pub completed: Option<bool>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Training service
#[derive(Clone)]
pub struct TrainingService {
    users: Arc<dyn UserRepository>,
    trainings: Arc<dyn TrainingRepository>,
    motivation: MotivationService,
    plan_policy: PlanLookupPolicy,
}

impl TrainingService {
    /// Create a service over explicit dependencies
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        trainings: Arc<dyn TrainingRepository>,
        motivation: MotivationService,
        plan_policy: PlanLookupPolicy,
    ) -> Self {
        Self {
            users,
            trainings,
            motivation,
            plan_policy,
        }
    }

    /// Create a service from shared server resources
    #[must_use]
    pub fn from_resources(resources: &ServerResources) -> Self {
        Self::new(
            resources.users.clone(),
            resources.trainings.clone(),
            MotivationService::from_resources(resources),
            resources.config.plan_policy,
        )
    }

    /// Record a session
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a negative or non-finite distance, or a
    /// storage error
    pub async fn create(&self, user_id: Uuid, input: NewTraining) -> AppResult<Training> {
        validate_distance(input.distance)?;

        let now = Utc::now();
        let training = Training {
            id: Uuid::new_v4(),
            user_id,
            date: input.date,
            distance: input.distance,
            duration: input.duration,
            mood: input.mood.unwrap_or_default(),
            completed: input.completed.unwrap_or(false),
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };
        self.trainings.create(&training).await?;
        AppLogger::log_training_event(&user_id.to_string(), &training.id.to_string(), "created");

        if training.completed {
            self.motivation.trigger(user_id, TriggerType::Completed).await?;
        }
        Ok(training)
    }

    /// Sessions newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(&self, user_id: Uuid, limit: Option<u32>) -> AppResult<Vec<Training>> {
        Ok(self.trainings.list(user_id, limit).await?)
    }

    /// One owned session
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` unless the session exists and belongs to `user_id`
    pub async fn get(&self, user_id: Uuid, training_id: Uuid) -> AppResult<Training> {
        self.trainings
            .get(training_id, user_id)
            .await?
            .ok_or_else(|| not_found(training_id))
    }

    /// Partially update an owned session
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` unless the session belongs to `user_id`,
    /// or `INVALID_INPUT` for a bad distance
    pub async fn update(
        &self,
        user_id: Uuid,
        training_id: Uuid,
        update: TrainingUpdate,
    ) -> AppResult<Training> {
        if let Some(distance) = update.distance {
            validate_distance(distance)?;
        }

        let outcome = self
            .trainings
            .update(training_id, user_id, &update)
            .await?
            .ok_or_else(|| not_found(training_id))?;
        AppLogger::log_training_event(&user_id.to_string(), &training_id.to_string(), "updated");

        if outcome.became_completed {
            self.motivation.trigger(user_id, TriggerType::Completed).await?;
        }
        Ok(outcome.training)
    }

    /// Delete an owned session
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` unless the session belongs to `user_id`
    pub async fn delete(&self, user_id: Uuid, training_id: Uuid) -> AppResult<()> {
        if !self.trainings.delete(training_id, user_id).await? {
            return Err(not_found(training_id));
        }
        AppLogger::log_training_event(&user_id.to_string(), &training_id.to_string(), "deleted");
        Ok(())
    }

    /// Build a plan for raw goal and level names under the configured policy
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the user no longer exists. Under the
    /// reject policy, a missing name is `MISSING_REQUIRED_FIELD` and an
    /// unknown one is `INVALID_INPUT`.
    pub async fn generate_plan(
        &self,
        user_id: Uuid,
        goal: Option<&str>,
        level: Option<&str>,
    ) -> AppResult<TrainingPlan> {
        if self.users.get_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found(USER_NOT_FOUND).with_user_id(user_id));
        }

        match self.plan_policy {
            PlanLookupPolicy::Fallback => Ok(PlanGenerator::generate_plan_for_names(
                goal.unwrap_or_default(),
                level.unwrap_or_default(),
            )),
            PlanLookupPolicy::Reject => {
                let goal = goal.ok_or_else(|| AppError::missing_field("goal"))?;
                let level = level.ok_or_else(|| AppError::missing_field("level"))?;
                PlanGenerator::try_generate_plan_for_names(goal, level).map_err(plan_lookup_error)
            }
        }
    }
}

fn not_found(training_id: Uuid) -> AppError {
    AppError::not_found(TRAINING_NOT_FOUND).with_resource_id(training_id.to_string())
}

fn validate_distance(distance: f64) -> AppResult<()> {
    if distance.is_finite() && distance >= 0.0 {
        Ok(())
    } else {
        Err(AppError::invalid_input(
            "Distance must be a non-negative number of kilometres",
        ))
    }
}

fn plan_lookup_error(error: PlanLookupError) -> AppError {
    let expected = match error {
        PlanLookupError::UnknownGoal(_) => Goal::ALL.map(|goal| goal.as_str()).join(", "),
        PlanLookupError::UnknownLevel(_) => Level::ALL.map(|level| level.as_str()).join(", "),
    };
    AppError::invalid_input(format!("{error}. Expected one of: {expected}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_validation() {
        assert!(validate_distance(0.0).is_ok());
        assert!(validate_distance(42.195).is_ok());
        assert!(validate_distance(-0.1).is_err());
        assert!(validate_distance(f64::NAN).is_err());
        assert!(validate_distance(f64::INFINITY).is_err());
    }

    #[test]
    fn test_plan_lookup_error_lists_choices() {
        let err = plan_lookup_error(PlanLookupError::UnknownLevel("PRO".to_owned()));
        assert_eq!(
            err.message,
            "Unknown experience level 'PRO'. Expected one of: BEGINNER, INTERMEDIATE, ADVANCED"
        );
    }
}
