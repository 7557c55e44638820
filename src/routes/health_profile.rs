// ABOUTME: Health questionnaire routes: wizard submission, step validation, target overrides
// ABOUTME: Submissions are validated against the full schema then upserted wholesale
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

use axum::extract::State;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::conditions::{condition_guidance, ConditionGuidance};
use crate::context::{ServerResources, SessionContext};
use crate::errors::AppError;
use crate::models::HealthProfile;
use crate::validation::{validate_full, validate_step, HealthProfileForm, ValidationErrors};

/// Health questionnaire routes
pub struct HealthProfileRoutes;

impl HealthProfileRoutes {
    /// Assemble the health-profile router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/health-profile",
                get(get_health_profile_handler).put(put_health_profile_handler),
            )
            .route("/api/health-profile/validate", post(validate_step_handler))
            .route("/api/health-profile/targets", put(put_targets_handler))
            .route("/api/health-profile/guidance", get(guidance_handler))
            .with_state(resources)
    }
}

fn parse_opt_i64(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        trimmed.parse().ok()
    }
}

fn parse_opt_f64(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        trimmed.parse().ok()
    }
}

fn opt_text(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Convert a validated wizard form into the persisted record
///
/// Fields the wizard does not carry (manual target overrides, meal counts)
/// are preserved from the existing row so re-running the questionnaire never
/// silently resets them.
fn form_to_profile(
    session: SessionContext,
    form: HealthProfileForm,
    existing: Option<&HealthProfile>,
) -> HealthProfile {
    HealthProfile {
        user_id: session.user_id,
        age: parse_opt_i64(&form.age),
        gender: opt_text(form.gender),
        height: parse_opt_f64(&form.height),
        weight: parse_opt_f64(&form.weight),
        activity_level: opt_text(form.activity_level),
        health_conditions: form.health_conditions,
        medications: opt_text(form.medications),
        dietary_preferences: form.dietary_preferences,
        allergies: form.allergies,
        disliked_foods: opt_text(form.disliked_foods),
        goals: form.goals,
        target_weight: parse_opt_f64(&form.target_weight),
        timeline: opt_text(form.timeline),
        additional_notes: opt_text(form.additional_notes),
        meals_per_day: existing.and_then(|e| e.meals_per_day),
        snacks_per_day: existing.and_then(|e| e.snacks_per_day),
        custom_calories: existing.and_then(|e| e.custom_calories),
        custom_protein: existing.and_then(|e| e.custom_protein),
        custom_carbs: existing.and_then(|e| e.custom_carbs),
        custom_fat: existing.and_then(|e| e.custom_fat),
    }
}

/// Fetch the caller's health profile
async fn get_health_profile_handler(
    State(resources): State<Arc<ServerResources>>,
    session: SessionContext,
) -> Result<Json<HealthProfile>, AppError> {
    let profile = resources
        .database
        .get_health_profile(session.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Health profile"))?;

    Ok(Json(profile))
}

/// Submit the completed questionnaire
///
/// The full schema is enforced here regardless of which steps the client
/// claims to have validated; failures return the field-keyed error map with
/// nothing persisted.
async fn put_health_profile_handler(
    State(resources): State<Arc<ServerResources>>,
    session: SessionContext,
    Json(form): Json<HealthProfileForm>,
) -> Result<Json<HealthProfile>, AppError> {
    let errors = validate_full(&form);
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let existing = resources.database.get_health_profile(session.user_id).await?;
    let profile = form_to_profile(session, form, existing.as_ref());
    resources.database.upsert_health_profile(&profile).await?;
    info!("Saved health profile for user {}", session.user_id);

    Ok(Json(profile))
}

#[derive(Debug, Deserialize)]
struct ValidateStepRequest {
    step: u8,
    #[serde(default)]
    form: HealthProfileForm,
}

#[derive(Debug, Serialize)]
struct ValidateStepResponse {
    valid: bool,
    errors: ValidationErrors,
}

/// Validate a single wizard step without persisting anything
///
/// Steps outside 1..=4 are rejected as invalid input.
async fn validate_step_handler(
    Json(request): Json<ValidateStepRequest>,
) -> Result<Json<ValidateStepResponse>, AppError> {
    let errors = validate_step(request.step, &request.form)
        .ok_or_else(|| AppError::invalid_input(format!("Unknown wizard step {}", request.step)))?;

    Ok(Json(ValidateStepResponse {
        valid: errors.is_empty(),
        errors,
    }))
}

/// Manual target overrides and meal-plan shape, set from account settings
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UpdateTargetsRequest {
    custom_calories: Option<i64>,
    custom_protein: Option<i64>,
    custom_carbs: Option<i64>,
    custom_fat: Option<i64>,
    meals_per_day: Option<i64>,
    snacks_per_day: Option<i64>,
}

/// Replace the caller's manual nutrition overrides
///
/// This is a wholesale replace of the override fields: omitting a field
/// clears it back to the computed target.
async fn put_targets_handler(
    State(resources): State<Arc<ServerResources>>,
    session: SessionContext,
    Json(request): Json<UpdateTargetsRequest>,
) -> Result<Json<HealthProfile>, AppError> {
    let mut profile = resources
        .database
        .get_health_profile(session.user_id)
        .await?
        .unwrap_or_else(|| HealthProfile::new(session.user_id));

    profile.custom_calories = request.custom_calories;
    profile.custom_protein = request.custom_protein;
    profile.custom_carbs = request.custom_carbs;
    profile.custom_fat = request.custom_fat;
    profile.meals_per_day = request.meals_per_day;
    profile.snacks_per_day = request.snacks_per_day;

    resources.database.upsert_health_profile(&profile).await?;

    Ok(Json(profile))
}

/// Dietary guidance for the caller's selected health conditions
///
/// Conditions without a guidance entry are silently omitted.
async fn guidance_handler(
    State(resources): State<Arc<ServerResources>>,
    session: SessionContext,
) -> Result<Json<Vec<&'static ConditionGuidance>>, AppError> {
    let profile = resources
        .database
        .get_health_profile(session.user_id)
        .await?
        .unwrap_or_else(|| HealthProfile::new(session.user_id));

    let guidance = profile
        .health_conditions
        .iter()
        .filter_map(|c| condition_guidance(c))
        .collect();

    Ok(Json(guidance))
}
