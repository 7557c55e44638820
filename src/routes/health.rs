// ABOUTME: Liveness and readiness endpoints for deployment probes
// ABOUTME: Readiness verifies a live database connection with a trivial query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::context::ServerResources;
use crate::errors::AppError;

/// Health and readiness probe routes
pub struct HealthRoutes;

impl HealthRoutes {
    /// Assemble the probe router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(resources)
    }
}

/// Liveness: the process is up and serving
async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness: dependencies are reachable
async fn ready_handler(
    State(resources): State<Arc<ServerResources>>,
) -> Result<Json<Value>, AppError> {
    sqlx::query("SELECT 1")
        .execute(resources.database.pool())
        .await?;

    Ok(Json(json!({ "status": "ready", "database": "ok" })))
}
