// ABOUTME: AI coaching routes: streaming chat, meal plans, and nutrition tips
// ABOUTME: Gateway deltas are re-framed as SSE chunk events for the browser
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{info, warn};

use crate::context::{ServerResources, SessionContext};
use crate::errors::AppError;
use crate::llm::prompts::{self, PromptKind};
use crate::llm::{ChatMessage, ChatRequest};
use crate::models::HealthProfile;

/// AI coaching routes
pub struct CoachRoutes;

impl CoachRoutes {
    /// Assemble the coaching router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/coach/chat", post(chat_handler))
            .route("/api/meal-plan", post(meal_plan_handler))
            .with_state(resources)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChatCoachRequest {
    /// User message; empty asks for general advice
    message: String,
    /// Deliver the response as SSE chunks (the default) or one JSON body
    stream: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct MealPlanRequest {
    /// Either "meal-plan" or "nutrition-tips"
    plan_type: String,
    #[serde(default)]
    stream: Option<bool>,
}

/// Free-form conversation with the AI coach
///
/// Completing a chat records a coaching session on the caller's profile,
/// which resets the coach-reminder clock.
async fn chat_handler(
    State(resources): State<Arc<ServerResources>>,
    session: SessionContext,
    Json(request): Json<ChatCoachRequest>,
) -> Result<Response, AppError> {
    respond(
        resources,
        session,
        PromptKind::Coach,
        request.message,
        request.stream.unwrap_or(true),
    )
    .await
}

/// Generate a one-day meal plan or a set of nutrition tips
async fn meal_plan_handler(
    State(resources): State<Arc<ServerResources>>,
    session: SessionContext,
    Json(request): Json<MealPlanRequest>,
) -> Result<Response, AppError> {
    let kind = match request.plan_type.as_str() {
        "meal-plan" => PromptKind::MealPlan,
        "nutrition-tips" => PromptKind::NutritionTips,
        other => {
            return Err(AppError::invalid_input(format!(
                "Unknown plan type '{other}', expected 'meal-plan' or 'nutrition-tips'"
            )))
        }
    };

    respond(
        resources,
        session,
        kind,
        String::new(),
        request.stream.unwrap_or(true),
    )
    .await
}

fn build_request(profile: &HealthProfile, kind: PromptKind, message: &str) -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system(prompts::system_prompt(profile)),
        ChatMessage::user(prompts::user_prompt(kind, profile, message)),
    ])
}

async fn respond(
    resources: Arc<ServerResources>,
    session: SessionContext,
    kind: PromptKind,
    message: String,
    stream: bool,
) -> Result<Response, AppError> {
    let profile = resources
        .database
        .get_health_profile(session.user_id)
        .await?
        .unwrap_or_else(|| HealthProfile::new(session.user_id));

    if stream {
        let sse = stream_completion(resources, session, &profile, kind, &message).await?;
        Ok(sse.into_response())
    } else {
        let request = build_request(&profile, kind, &message);
        let response = resources.gateway()?.complete(&request).await?;
        record_session(&resources, session, kind).await;

        Ok(Json(json!({
            "content": response.content,
            "model": response.model,
            "finish_reason": response.finish_reason,
        }))
        .into_response())
    }
}

/// Record a completed coaching session; failures are logged, never surfaced
async fn record_session(resources: &ServerResources, session: SessionContext, kind: PromptKind) {
    if kind != PromptKind::Coach {
        return;
    }
    if let Err(e) = resources
        .database
        .touch_coach_session(session.user_id, Utc::now())
        .await
    {
        warn!("Failed to record coach session for {}: {e}", session.user_id);
    }
}

/// Stream a completion back to the client as SSE chunk events
///
/// Each gateway delta becomes a `{"type": "chunk", ...}` data event; gateway
/// failures mid-stream become a terminal `{"type": "error", ...}` event since
/// the response status is already committed.
async fn stream_completion(
    resources: Arc<ServerResources>,
    session: SessionContext,
    profile: &HealthProfile,
    kind: PromptKind,
    message: &str,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let request = build_request(profile, kind, message).streaming();
    let mut upstream = resources.gateway()?.complete_stream(&request).await?;
    info!("Streaming {kind:?} response for user {}", session.user_id);

    let stream = async_stream::stream! {
        loop {
            match upstream.next().await {
                Some(Ok(chunk)) => {
                    let finished = chunk.is_final;
                    let event = json!({
                        "type": "chunk",
                        "delta": chunk.delta,
                        "is_final": finished,
                    });
                    yield Ok(Event::default().data(event.to_string()));
                    if finished {
                        break;
                    }
                }
                Some(Err(e)) => {
                    warn!("Gateway stream error: {e}");
                    let event = json!({ "type": "error", "message": e.to_string() });
                    yield Ok(Event::default().data(event.to_string()));
                    break;
                }
                None => break,
            }
        }

        record_session(&resources, session, kind).await;
        yield Ok(Event::default().data("[DONE]"));
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
