// ABOUTME: Dashboard aggregate route: profile, targets, and today's consumption in one response
// ABOUTME: Source reads fan out concurrently; missing pieces render as empty defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::context::{ServerResources, SessionContext};
use crate::errors::AppError;
use crate::models::{DailyTracking, HealthProfile, Profile};
use crate::nutrition::{targets_for, NutritionTargets};

/// Dashboard routes
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Assemble the dashboard router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/dashboard", get(dashboard_handler))
            .with_state(resources)
    }
}

/// Macro and calorie totals consumed so far today
#[derive(Debug, Serialize)]
struct ConsumedTotals {
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
}

#[derive(Debug, Serialize)]
struct DashboardResponse {
    profile: Profile,
    health_profile: Option<HealthProfile>,
    targets: NutritionTargets,
    today: DailyTracking,
    consumed: ConsumedTotals,
}

/// Everything the dashboard needs in one request
///
/// The three source reads are independent and run concurrently. A user with
/// no stored rows gets defaults throughout rather than an error, so the
/// dashboard renders on first visit.
async fn dashboard_handler(
    State(resources): State<Arc<ServerResources>>,
    session: SessionContext,
) -> Result<Json<DashboardResponse>, AppError> {
    let today = Utc::now().date_naive();
    let db = &resources.database;

    let (profile, health_profile, tracking) = tokio::try_join!(
        db.get_profile(session.user_id),
        db.get_health_profile(session.user_id),
        db.get_tracking(session.user_id, today),
    )?;

    let profile = profile.unwrap_or_else(|| Profile::new(session.user_id));
    let tracking = tracking.unwrap_or_else(|| DailyTracking::new(session.user_id, today));

    let targets = health_profile
        .as_ref()
        .map(targets_for)
        .unwrap_or_default();

    let calories = tracking.total_calories();
    let (protein, carbs, fat) = tracking.total_macros();

    Ok(Json(DashboardResponse {
        profile,
        health_profile,
        targets,
        today: tracking,
        consumed: ConsumedTotals {
            calories,
            protein,
            carbs,
            fat,
        },
    }))
}
