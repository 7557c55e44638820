// ABOUTME: Capability report route combining server config with client-declared channels
// ABOUTME: POST so the client can declare its browser feature support in the body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;

use crate::capabilities::{detect, CapabilityReport, ClientCapabilities};
use crate::context::ServerResources;

/// Capability detection routes
pub struct CapabilityRoutes;

impl CapabilityRoutes {
    /// Assemble the capabilities router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/capabilities", post(capabilities_handler))
            .with_state(resources)
    }
}

/// Report per-channel capability decisions for this client environment
///
/// An absent body means the client declared nothing; browser channels then
/// report unsupported with a reason rather than guessing.
async fn capabilities_handler(
    State(resources): State<Arc<ServerResources>>,
    body: Option<Json<ClientCapabilities>>,
) -> Json<CapabilityReport> {
    let client = body.map(|Json(c)| c).unwrap_or_default();
    Json(detect(&resources.config, &client))
}
