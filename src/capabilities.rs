// ABOUTME: Capability detection for notification and speech channels
// ABOUTME: Feature availability is probed once and returned as a value, not discovered mid-call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # Capability Detection
//!
//! Browser speech APIs and notification channels are best-effort features.
//! Rather than probing at each call site and throwing mid-operation, support
//! is determined up front and reported as a value: the client declares what
//! its environment offers, the server adds what its configuration enables,
//! and every channel comes back `supported` or `unsupported` with a reason.

use serde::{Deserialize, Serialize};

use crate::config::ServerConfig;

/// Whether a channel can be used, decided before any attempt is made
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CapabilityStatus {
    /// The channel is available
    Supported,
    /// The channel is unavailable, with a user-presentable reason
    Unsupported {
        /// Why the channel cannot be used
        reason: String,
    },
}

impl CapabilityStatus {
    fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported {
            reason: reason.into(),
        }
    }
}

/// Channel support flags declared by the client environment
///
/// Browser-side channels can only be detected in the browser; the client
/// reports them and the server echoes the decision so every surface reads
/// the same answer.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct ClientCapabilities {
    /// `window.speechSynthesis` is present
    pub speech_synthesis: Option<bool>,
    /// `SpeechRecognition`/`webkitSpeechRecognition` is present
    pub speech_recognition: Option<bool>,
    /// The Notification API is present and permitted
    pub push: Option<bool>,
}

/// Per-channel capability decisions
#[derive(Debug, Clone, Serialize)]
pub struct CapabilityReport {
    /// Reminder emails (server-side channel)
    pub email: CapabilityStatus,
    /// Voice playback of coach responses
    pub speech_synthesis: CapabilityStatus,
    /// Voice input for coach messages
    pub speech_recognition: CapabilityStatus,
    /// Browser push notifications
    pub push: CapabilityStatus,
}

fn client_channel(declared: Option<bool>, feature: &str) -> CapabilityStatus {
    match declared {
        Some(true) => CapabilityStatus::Supported,
        Some(false) => {
            CapabilityStatus::unsupported(format!("{feature} is not supported in your browser."))
        }
        None => CapabilityStatus::unsupported(format!("{feature} support was not reported.")),
    }
}

/// Build the capability report for one client environment
#[must_use]
pub fn detect(config: &ServerConfig, client: &ClientCapabilities) -> CapabilityReport {
    let email = if config.email.api_key.is_some() {
        CapabilityStatus::Supported
    } else {
        CapabilityStatus::unsupported("Email delivery is not configured.")
    };

    CapabilityReport {
        email,
        speech_synthesis: client_channel(client.speech_synthesis, "Text-to-speech"),
        speech_recognition: client_channel(client.speech_recognition, "Speech recognition"),
        push: client_channel(client.push, "Push notifications"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AiGatewayConfig, DatabaseConfig, EmailConfig};

    fn config(email_key: Option<&str>) -> ServerConfig {
        ServerConfig {
            http_port: 0,
            database: DatabaseConfig {
                url: "sqlite::memory:".into(),
            },
            ai_gateway: AiGatewayConfig {
                base_url: "https://example.invalid/v1".into(),
                api_key: None,
                model: "test".into(),
            },
            email: EmailConfig {
                base_url: "https://api.resend.com".into(),
                api_key: email_key.map(str::to_owned),
                from: "NutriCoach <noreply@example.com>".into(),
            },
            app_base_url: "https://app.example.com".into(),
            cors_allowed_origins: "*".into(),
        }
    }

    #[test]
    fn email_follows_server_configuration() {
        let report = detect(&config(Some("key")), &ClientCapabilities::default());
        assert_eq!(report.email, CapabilityStatus::Supported);

        let report = detect(&config(None), &ClientCapabilities::default());
        assert!(matches!(report.email, CapabilityStatus::Unsupported { .. }));
    }

    #[test]
    fn browser_channels_follow_client_declaration() {
        let client = ClientCapabilities {
            speech_synthesis: Some(true),
            speech_recognition: Some(false),
            push: None,
        };
        let report = detect(&config(None), &client);
        assert_eq!(report.speech_synthesis, CapabilityStatus::Supported);
        assert!(matches!(
            report.speech_recognition,
            CapabilityStatus::Unsupported { .. }
        ));
        assert!(matches!(report.push, CapabilityStatus::Unsupported { .. }));
    }
}
