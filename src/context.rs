// ABOUTME: Shared server resources and the per-request session context
// ABOUTME: Replaces ambient module state with explicitly scoped, passed-in dependencies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # Server Resources and Session Context
//!
//! [`ServerResources`] holds the process-wide dependencies (database,
//! gateway and email clients, configuration) behind a single `Arc` handed to
//! every router. [`SessionContext`] is constructed per request from the
//! `x-user-id` header and passed explicitly to handlers; nothing about the
//! current user lives in ambient state. Authentication itself is an external
//! collaborator: by the time requests reach this service the header is
//! trusted.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::database::Database;
use crate::email::EmailClient;
use crate::errors::AppError;
use crate::llm::gateway::AiGatewayClient;

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Process-wide shared dependencies
pub struct ServerResources {
    /// Database connection pool and operations
    pub database: Database,
    /// AI gateway client; `None` when no API key is configured
    pub gateway: Option<AiGatewayClient>,
    /// Email client; `None` when no API key is configured
    pub email: Option<EmailClient>,
    /// Loaded server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Assemble resources from configuration and an open database
    ///
    /// Missing gateway or email keys leave those clients unset; the routes
    /// that need them report a configuration error per request instead of
    /// failing startup.
    #[must_use]
    pub fn new(config: ServerConfig, database: Database) -> Arc<Self> {
        let gateway = AiGatewayClient::from_config(&config.ai_gateway).ok();
        let email = EmailClient::from_config(&config.email).ok();

        Arc::new(Self {
            database,
            gateway,
            email,
            config,
        })
    }

    /// The gateway client, or a configuration error when unavailable
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no gateway API key was set.
    pub fn gateway(&self) -> Result<&AiGatewayClient, AppError> {
        self.gateway
            .as_ref()
            .ok_or_else(|| AppError::config("AI_GATEWAY_API_KEY is not configured"))
    }

    /// The email client, or a configuration error when unavailable
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no email API key was set.
    pub fn email(&self) -> Result<&EmailClient, AppError> {
        self.email
            .as_ref()
            .ok_or_else(|| AppError::config("RESEND_API_KEY is not configured"))
    }
}

/// Per-request session scope
#[derive(Debug, Clone, Copy)]
pub struct SessionContext {
    /// The authenticated user
    pub user_id: Uuid,
    /// When this request's session scope was created
    pub started_at: DateTime<Utc>,
}

impl SessionContext {
    /// Create a session scope for a user, stamped now
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            started_at: Utc::now(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::invalid_input("Missing x-user-id header"))?;

        let user_id = Uuid::parse_str(header)
            .map_err(|_| AppError::invalid_input("Invalid x-user-id header"))?;

        Ok(Self::new(user_id))
    }
}
