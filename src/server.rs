// ABOUTME: HTTP server assembly: merges domain routers, applies middleware, binds and serves
// ABOUTME: One axum Router over shared ServerResources, traced and CORS-wrapped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # Server Assembly
//!
//! Builds the complete axum application from the per-domain routers and runs
//! it. The router is also exposed on its own so integration tests can drive
//! it with `tower::ServiceExt::oneshot` without binding a port.

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::context::ServerResources;
use crate::middleware::cors::setup_cors;
use crate::routes::capabilities::CapabilityRoutes;
use crate::routes::coach::CoachRoutes;
use crate::routes::dashboard::DashboardRoutes;
use crate::routes::health::HealthRoutes;
use crate::routes::health_profile::HealthProfileRoutes;
use crate::routes::jobs::JobRoutes;
use crate::routes::profiles::ProfileRoutes;
use crate::routes::tracking::TrackingRoutes;

/// Build the complete application router
#[must_use]
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(ProfileRoutes::routes(resources.clone()))
        .merge(HealthProfileRoutes::routes(resources.clone()))
        .merge(TrackingRoutes::routes(resources.clone()))
        .merge(DashboardRoutes::routes(resources.clone()))
        .merge(CoachRoutes::routes(resources.clone()))
        .merge(JobRoutes::routes(resources.clone()))
        .merge(CapabilityRoutes::routes(resources.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(setup_cors(&resources.config))
}

/// Bind the configured port and serve until shutdown
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let port = resources.config.http_port;
    let app = build_router(&resources);

    let listener = TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;
    info!("HTTP server listening on port {port}");

    axum::serve(listener, app)
        .await
        .context("HTTP server terminated")?;

    Ok(())
}
