// ABOUTME: Daily food and water tracking routes keyed on (user, calendar date)
// ABOUTME: Writes replace the whole day's log; reads return an empty day when nothing is stored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::context::{ServerResources, SessionContext};
use crate::errors::AppError;
use crate::models::{DailyTracking, FoodEntry};

/// Daily tracking routes
pub struct TrackingRoutes;

impl TrackingRoutes {
    /// Assemble the tracking router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/tracking", get(range_handler))
            .route(
                "/api/tracking/:date",
                get(get_day_handler).put(put_day_handler),
            )
            .with_state(resources)
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    raw.parse()
        .map_err(|_| AppError::invalid_input(format!("Invalid date '{raw}', expected YYYY-MM-DD")))
}

/// Fetch one day's log; an untracked day is an empty log, not an error
async fn get_day_handler(
    State(resources): State<Arc<ServerResources>>,
    session: SessionContext,
    Path(date): Path<String>,
) -> Result<Json<DailyTracking>, AppError> {
    let date = parse_date(&date)?;
    let tracking = resources
        .database
        .get_tracking(session.user_id, date)
        .await?
        .unwrap_or_else(|| DailyTracking::new(session.user_id, date));

    Ok(Json(tracking))
}

/// Full replacement payload for one day's log
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UpdateTrackingRequest {
    food_entries: Vec<FoodEntry>,
    water_intake: i64,
}

/// Replace one day's log wholesale
///
/// Appending or removing a single entry is read-modify-write on the client;
/// concurrent writers resolve last-write-wins.
async fn put_day_handler(
    State(resources): State<Arc<ServerResources>>,
    session: SessionContext,
    Path(date): Path<String>,
    Json(request): Json<UpdateTrackingRequest>,
) -> Result<Json<DailyTracking>, AppError> {
    let date = parse_date(&date)?;
    if request.water_intake < 0 {
        return Err(AppError::invalid_input("Water intake cannot be negative"));
    }

    let tracking = DailyTracking {
        user_id: session.user_id,
        date,
        food_entries: request.food_entries,
        water_intake: request.water_intake,
    };
    resources.database.upsert_tracking(&tracking).await?;

    Ok(Json(tracking))
}

#[derive(Debug, Deserialize)]
struct RangeQuery {
    from: String,
    to: String,
}

/// Fetch the caller's logs for an inclusive date range, ordered by date
///
/// Untracked days inside the range are simply absent from the result.
async fn range_handler(
    State(resources): State<Arc<ServerResources>>,
    session: SessionContext,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<DailyTracking>>, AppError> {
    let from = parse_date(&query.from)?;
    let to = parse_date(&query.to)?;
    if from > to {
        return Err(AppError::invalid_input("Range start is after range end"));
    }

    let rows = resources
        .database
        .get_tracking_range(session.user_id, from, to)
        .await?;

    Ok(Json(rows))
}
