// ABOUTME: Scheduler-invoked job routes for coach and food-tracking reminder emails
// ABOUTME: Per-recipient failures are logged and skipped; a run always reports its tallies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::context::ServerResources;
use crate::email::{coach_reminder_email, tracking_reminder_email};
use crate::errors::AppError;
use crate::models::{HealthProfile, Profile};
use crate::nutrition::weight_based_calorie_estimate;
use crate::reminders::reminder_due;

/// Calorie target assumed when a profile has no weight to estimate from
const FALLBACK_CALORIE_TARGET: i64 = 2000;

/// Skip the tracking nudge once the user has logged this share of their goal
const COMPLETION_SKIP_PERCENT: f64 = 80.0;

/// Reminder job routes
pub struct JobRoutes;

impl JobRoutes {
    /// Assemble the jobs router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/jobs/coach-reminder", post(coach_reminder_handler))
            .route("/api/jobs/tracking-reminder", post(tracking_reminder_handler))
            .with_state(resources)
    }
}

/// Outcome tallies for one job run
#[derive(Debug, Serialize)]
struct JobRunSummary {
    emails_sent: usize,
    skipped: usize,
    recipients: Vec<String>,
}

fn recipient(profile: &Profile) -> Option<&str> {
    match profile.email.as_deref() {
        Some(email) if !email.is_empty() => Some(email),
        _ => {
            warn!("No email on file for user {}, skipping", profile.user_id);
            None
        }
    }
}

/// Send coach-session reminders to every user whose cadence has elapsed
///
/// Candidates need email notifications and meal reminders enabled; whether a
/// reminder is actually due comes from the cadence decision alone.
async fn coach_reminder_handler(
    State(resources): State<Arc<ServerResources>>,
) -> Result<Json<JobRunSummary>, AppError> {
    let email = resources.email()?;
    let now = Utc::now();
    let candidates = resources.database.list_reminder_candidates().await?;
    info!("Coach reminder run over {} candidates", candidates.len());

    let mut recipients = Vec::new();
    let mut skipped = 0;

    for profile in candidates {
        if !reminder_due(profile.last_coach_session, profile.coach_reminder_frequency, now) {
            skipped += 1;
            continue;
        }
        let Some(to) = recipient(&profile) else {
            skipped += 1;
            continue;
        };

        let (subject, html) = coach_reminder_email(
            profile.first_name.as_deref(),
            profile.last_coach_session.is_some(),
            &resources.config.app_base_url,
        );
        match email.send(to, &subject, &html).await {
            Ok(()) => recipients.push(to.to_owned()),
            Err(e) => warn!("Coach reminder to user {} failed: {e}", profile.user_id),
        }
    }

    info!("Coach reminder run sent {} emails, skipped {}", recipients.len(), skipped);
    Ok(Json(JobRunSummary {
        emails_sent: recipients.len(),
        skipped,
        recipients,
    }))
}

#[derive(Debug, Deserialize)]
struct TrackingReminderRequest {
    /// breakfast, lunch, dinner, snack, or anything else for a general nudge
    #[serde(default = "default_meal_type")]
    meal_type: String,
}

fn default_meal_type() -> String {
    "general".to_owned()
}

/// Send food-logging nudges for one meal slot
///
/// A user is skipped when the slot is outside their planned meal count or
/// when they have already logged at least 80% of their calorie goal today.
async fn tracking_reminder_handler(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<TrackingReminderRequest>,
) -> Result<Json<JobRunSummary>, AppError> {
    let email = resources.email()?;
    let meal_type = request.meal_type.as_str();
    let today = Utc::now().date_naive();
    let candidates = resources.database.list_reminder_candidates().await?;
    info!(
        "Tracking reminder run ({meal_type}) over {} candidates",
        candidates.len()
    );

    let mut recipients = Vec::new();
    let mut skipped = 0;

    for profile in candidates {
        let health = resources
            .database
            .get_health_profile(profile.user_id)
            .await?;

        let meals_per_day = health.as_ref().and_then(|h| h.meals_per_day).unwrap_or(3);
        let snacks_per_day = health.as_ref().and_then(|h| h.snacks_per_day).unwrap_or(2);
        let in_plan = match meal_type {
            "breakfast" => meals_per_day >= 1,
            "lunch" => meals_per_day >= 2,
            "dinner" => meals_per_day >= 3,
            "snack" => snacks_per_day >= 1,
            _ => true,
        };
        if !in_plan {
            skipped += 1;
            continue;
        }

        let target = calorie_target(health.as_ref());
        let consumed = resources
            .database
            .get_tracking(profile.user_id, today)
            .await?
            .map_or(0.0, |t| t.total_calories());

        #[allow(clippy::cast_precision_loss)]
        let completion = consumed / target as f64 * 100.0;
        if completion >= COMPLETION_SKIP_PERCENT {
            skipped += 1;
            continue;
        }

        let Some(to) = recipient(&profile) else {
            skipped += 1;
            continue;
        };

        let (subject, html) = tracking_reminder_email(
            profile.first_name.as_deref(),
            meal_type,
            consumed,
            target,
            &resources.config.app_base_url,
        );
        match email.send(to, &subject, &html).await {
            Ok(()) => recipients.push(to.to_owned()),
            Err(e) => warn!("Tracking reminder to user {} failed: {e}", profile.user_id),
        }
    }

    info!(
        "Tracking reminder run ({meal_type}) sent {} emails, skipped {}",
        recipients.len(),
        skipped
    );
    Ok(Json(JobRunSummary {
        emails_sent: recipients.len(),
        skipped,
        recipients,
    }))
}

/// The calorie goal used for reminder progress
///
/// Manual override wins; otherwise a rough weight-based estimate when both
/// weight and activity level are on file, falling back to a generic target.
fn calorie_target(health: Option<&HealthProfile>) -> i64 {
    let Some(health) = health else {
        return FALLBACK_CALORIE_TARGET;
    };
    if let Some(custom) = health.custom_calories {
        return custom;
    }
    match (health.weight, health.activity_level.as_deref()) {
        (Some(weight), Some(activity)) => weight_based_calorie_estimate(weight, activity),
        _ => FALLBACK_CALORIE_TARGET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn calorie_target_prefers_custom_then_estimate_then_fallback() {
        let mut health = HealthProfile::new(Uuid::new_v4());
        assert_eq!(calorie_target(None), FALLBACK_CALORIE_TARGET);
        assert_eq!(calorie_target(Some(&health)), FALLBACK_CALORIE_TARGET);

        health.weight = Some(70.0);
        health.activity_level = Some("moderate".to_owned());
        assert_eq!(calorie_target(Some(&health)), 2387);

        health.custom_calories = Some(1800);
        assert_eq!(calorie_target(Some(&health)), 1800);
    }

    #[test]
    fn calorie_target_needs_activity_level_to_estimate() {
        let mut health = HealthProfile::new(Uuid::new_v4());
        health.weight = Some(70.0);
        assert_eq!(calorie_target(Some(&health)), FALLBACK_CALORIE_TARGET);
    }
}
