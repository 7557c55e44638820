// ABOUTME: Account profile routes: fetch, update, and coach-session recording
// ABOUTME: Updates merge over the stored row and persist with upsert-on-conflict
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::context::{ServerResources, SessionContext};
use crate::errors::AppError;
use crate::models::{Profile, ReminderFrequency};

/// Account profile routes
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Assemble the profile router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/profile", get(get_profile_handler).put(put_profile_handler))
            .route("/api/profile/coach-session", post(coach_session_handler))
            .with_state(resources)
    }
}

/// Partial profile update; absent fields keep their stored values
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UpdateProfileRequest {
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    avatar_url: Option<String>,
    email_notifications: Option<bool>,
    meal_reminders: Option<bool>,
    weekly_reports: Option<bool>,
    coach_reminder_frequency: Option<String>,
}

/// Fetch the caller's profile
///
/// A user who has never saved a profile gets the defaults; nothing is
/// persisted until the first update.
async fn get_profile_handler(
    State(resources): State<Arc<ServerResources>>,
    session: SessionContext,
) -> Result<Json<Profile>, AppError> {
    let profile = resources
        .database
        .get_profile(session.user_id)
        .await?
        .unwrap_or_else(|| Profile::new(session.user_id));

    Ok(Json(profile))
}

/// Update the caller's profile
async fn put_profile_handler(
    State(resources): State<Arc<ServerResources>>,
    session: SessionContext,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, AppError> {
    let mut profile = resources
        .database
        .get_profile(session.user_id)
        .await?
        .unwrap_or_else(|| Profile::new(session.user_id));

    if let Some(email) = request.email {
        profile.email = Some(email);
    }
    if let Some(first_name) = request.first_name {
        profile.first_name = Some(first_name);
    }
    if let Some(last_name) = request.last_name {
        profile.last_name = Some(last_name);
    }
    if let Some(avatar_url) = request.avatar_url {
        profile.avatar_url = Some(avatar_url);
    }
    if let Some(enabled) = request.email_notifications {
        profile.email_notifications = enabled;
    }
    if let Some(enabled) = request.meal_reminders {
        profile.meal_reminders = enabled;
    }
    if let Some(enabled) = request.weekly_reports {
        profile.weekly_reports = enabled;
    }
    if let Some(frequency) = request.coach_reminder_frequency.as_deref() {
        profile.coach_reminder_frequency = ReminderFrequency::from_str_or_default(frequency);
    }

    resources.database.upsert_profile(&profile).await?;
    info!("Updated profile for user {}", session.user_id);

    Ok(Json(profile))
}

/// Record that the caller just completed a coaching session
async fn coach_session_handler(
    State(resources): State<Arc<ServerResources>>,
    session: SessionContext,
) -> Result<Json<Value>, AppError> {
    let at: DateTime<Utc> = Utc::now();
    resources
        .database
        .touch_coach_session(session.user_id, at)
        .await?;

    Ok(Json(json!({ "last_coach_session": at })))
}
