// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, defaults, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! Environment-based configuration management for production deployment

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Default HTTP port when `HTTP_PORT` is unset
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default SQLite database URL
const DEFAULT_DATABASE_URL: &str = "sqlite:./data/nutricoach.db";

/// Default OpenAI-compatible AI gateway base URL
const DEFAULT_GATEWAY_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";

/// Default chat model requested from the gateway
const DEFAULT_GATEWAY_MODEL: &str = "google/gemini-2.5-flash";

/// Default transactional email API base URL (Resend-compatible)
const DEFAULT_EMAIL_BASE_URL: &str = "https://api.resend.com";

/// Default sender address for reminder emails
const DEFAULT_EMAIL_FROM: &str = "NutriCoach <onboarding@resend.dev>";

/// Complete server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP port for the API server
    pub http_port: u16,
    /// Database settings
    pub database: DatabaseConfig,
    /// AI chat-completion gateway settings
    pub ai_gateway: AiGatewayConfig,
    /// Transactional email settings
    pub email: EmailConfig,
    /// Public base URL of the web app, used in reminder email links
    pub app_base_url: String,
    /// Comma-separated CORS origin allowlist; empty or "*" allows any
    pub cors_allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (sqlite file path or `sqlite::memory:`)
    pub url: String,
}

/// AI chat-completion gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiGatewayConfig {
    /// OpenAI-compatible base URL (no trailing slash)
    pub base_url: String,
    /// Bearer API key; absent means AI features are unavailable
    pub api_key: Option<String>,
    /// Model identifier sent with every request
    pub model: String,
}

/// Transactional email configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Email API base URL
    pub base_url: String,
    /// API key; absent means the email channel is unavailable
    pub api_key: Option<String>,
    /// Sender address
    pub from: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable fails to parse (e.g. a
    /// non-numeric `HTTP_PORT`). Unset variables fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(port) => port
                .parse()
                .with_context(|| format!("Invalid HTTP_PORT value: {port}"))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        Ok(Self {
            http_port,
            database: DatabaseConfig {
                url: env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            },
            ai_gateway: AiGatewayConfig {
                base_url: env_var_or("AI_GATEWAY_BASE_URL", DEFAULT_GATEWAY_BASE_URL),
                api_key: env::var("AI_GATEWAY_API_KEY").ok(),
                model: env_var_or("AI_GATEWAY_MODEL", DEFAULT_GATEWAY_MODEL),
            },
            email: EmailConfig {
                base_url: env_var_or("EMAIL_API_BASE_URL", DEFAULT_EMAIL_BASE_URL),
                api_key: env::var("RESEND_API_KEY").ok(),
                from: env_var_or("EMAIL_FROM", DEFAULT_EMAIL_FROM),
            },
            app_base_url: env_var_or("APP_BASE_URL", "https://app.nutricoach.dev"),
            cors_allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
        })
    }

    /// Get a summary of the configuration for startup logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} database={} gateway={} model={} ai_key={} email_key={}",
            self.http_port,
            self.database.url,
            self.ai_gateway.base_url,
            self.ai_gateway.model,
            if self.ai_gateway.api_key.is_some() {
                "set"
            } else {
                "missing"
            },
            if self.email.api_key.is_some() {
                "set"
            } else {
                "missing"
            },
        )
    }
}

/// Read an environment variable with a default fallback
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_apply_when_env_unset() {
        env::remove_var("HTTP_PORT");
        env::remove_var("DATABASE_URL");
        env::remove_var("AI_GATEWAY_API_KEY");
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert!(config.ai_gateway.api_key.is_none());
    }

    #[test]
    #[serial]
    fn invalid_port_is_rejected() {
        env::set_var("HTTP_PORT", "not-a-port");
        let result = ServerConfig::from_env();
        env::remove_var("HTTP_PORT");
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn summary_never_contains_api_key() {
        env::set_var("AI_GATEWAY_API_KEY", "sk-secret-value");
        let config = ServerConfig::from_env().unwrap();
        env::remove_var("AI_GATEWAY_API_KEY");
        assert!(!config.summary().contains("sk-secret-value"));
    }
}
