// ABOUTME: OpenAI-compatible AI gateway client with non-streaming and streaming completions
// ABOUTME: Maps gateway status codes (429/402) to user-facing rate-limit and quota errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # AI Gateway Client
//!
//! HTTP client for the chat-completion gateway. The gateway speaks the
//! OpenAI wire format: `POST {base}/chat/completions` with
//! `{model, messages, stream}`; with `stream=true` the response body is the
//! SSE-framed delta stream decoded by [`super::sse_parser`].
//!
//! Rate-limit (429) and credit-exhaustion (402) responses map to distinct
//! user-facing errors; all other failures collapse to a generic gateway
//! error. Errors are local to the triggering request.

use async_stream::stream;
use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use super::sse_parser::{SseEvent, SseLineBuffer};
use super::{ChatRequest, ChatResponse, ChatStream, StreamChunk};
use crate::config::AiGatewayConfig;
use crate::errors::AppError;

/// Service name used in error messages and logs
const SERVICE: &str = "AI gateway";

// ============================================================================
// Wire Types (OpenAI-compatible)
// ============================================================================

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [super::ChatMessage],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireStreamPayload {
    #[serde(default)]
    choices: Vec<WireStreamChoice>,
}

#[derive(Debug, Deserialize)]
struct WireStreamChoice {
    delta: WireDelta,
}

#[derive(Debug, Deserialize)]
struct WireDelta {
    #[serde(default)]
    content: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Client for the OpenAI-compatible chat-completion gateway
#[derive(Clone)]
pub struct AiGatewayClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for AiGatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiGatewayClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl AiGatewayClient {
    /// Create a client from gateway configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is set; AI features
    /// are unavailable without one.
    pub fn from_config(config: &AiGatewayConfig) -> Result<Self, AppError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::config("AI_GATEWAY_API_KEY is not configured"))?;

        Ok(Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key,
            model: config.model.clone(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Map a non-success gateway status to a user-facing error
    fn map_status_error(status: reqwest::StatusCode, body: &str) -> AppError {
        match status.as_u16() {
            429 => AppError::rate_limited("Rate limit exceeded. Please try again later."),
            402 => AppError::quota_exhausted("AI credits exhausted. Please add credits."),
            _ => {
                warn!("AI gateway error {}: {}", status, body.chars().take(200).collect::<String>());
                AppError::external_service(SERVICE, format!("request failed with status {status}"))
            }
        }
    }

    async fn send(&self, request: &ChatRequest, stream: bool) -> Result<reqwest::Response, AppError> {
        let wire = WireRequest {
            model: request.model.as_deref().unwrap_or(&self.model),
            messages: &request.messages,
            stream,
        };

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&wire)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach AI gateway: {e}");
                AppError::external_service(SERVICE, format!("failed to connect: {e}"))
            })
    }

    /// Request a complete (non-streaming) chat response
    ///
    /// # Errors
    ///
    /// Returns rate-limit, quota, or generic gateway errors per the status
    /// mapping, or a serialization error for a malformed response body.
    #[instrument(skip(self, request), fields(messages = request.messages.len()))]
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        debug!("Sending chat completion request");

        let response = self.send(request, false).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::external_service(SERVICE, format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::map_status_error(status, &body));
        }

        let wire: WireResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::external_service(SERVICE, format!("malformed response: {e}")))?;

        let choice = wire
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service(SERVICE, "response contained no choices"))?;

        Ok(ChatResponse {
            content: choice.message.content.unwrap_or_default(),
            model: wire.model.unwrap_or_else(|| self.model.clone()),
            finish_reason: choice.finish_reason,
        })
    }

    /// Request a streaming chat response decoded into delta chunks
    ///
    /// The returned stream yields one [`StreamChunk`] per content delta and a
    /// terminal chunk on `[DONE]` or end of body. A delta whose JSON payload
    /// cannot be parsed is skipped with a warning rather than ending the
    /// stream; a transport failure mid-stream yields one error and stops.
    ///
    /// # Errors
    ///
    /// Returns an error before any bytes flow when the initial request fails
    /// or the gateway answers with a non-success status.
    #[instrument(skip(self, request), fields(messages = request.messages.len()))]
    pub async fn complete_stream(&self, request: &ChatRequest) -> Result<ChatStream, AppError> {
        debug!("Sending streaming chat completion request");

        let response = self.send(request, true).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status_error(status, &body));
        }

        let mut bytes = response.bytes_stream();
        let output = stream! {
            let mut parser = SseLineBuffer::new();
            let mut finished = false;

            while let Some(chunk) = bytes.next().await {
                match chunk {
                    Ok(chunk) => {
                        for event in parser.feed(&chunk) {
                            match event {
                                SseEvent::Data(payload) => {
                                    if let Some(delta) = parse_delta(&payload) {
                                        yield Ok(StreamChunk::delta(delta));
                                    }
                                }
                                SseEvent::Done => {
                                    finished = true;
                                    yield Ok(StreamChunk::finished());
                                }
                            }
                            if finished {
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        yield Err(AppError::external_service(
                            SERVICE,
                            format!("stream read error: {e}"),
                        ));
                        return;
                    }
                }
                if finished {
                    return;
                }
            }

            // Body ended without [DONE]; drain any unterminated final line
            match parser.flush() {
                Some(SseEvent::Data(payload)) => {
                    if let Some(delta) = parse_delta(&payload) {
                        yield Ok(StreamChunk::delta(delta));
                    }
                    yield Ok(StreamChunk::finished());
                }
                Some(SseEvent::Done) | None => {
                    yield Ok(StreamChunk::finished());
                }
            }
        };

        Ok(Box::pin(output))
    }
}

/// Extract the nested delta-content string from one SSE JSON payload
///
/// Empty deltas and metadata-only chunks yield `None`. A payload that fails
/// to parse also yields `None`: complete but unparseable events are logged
/// and skipped so one bad frame cannot kill the whole stream.
fn parse_delta(payload: &str) -> Option<String> {
    match serde_json::from_str::<WireStreamPayload>(payload) {
        Ok(parsed) => parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content)
            .filter(|content| !content.is_empty()),
        Err(e) => {
            warn!("Skipping unparseable SSE payload: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_delta_extracts_nested_content() {
        let payload = r#"{"choices":[{"delta":{"content":"Hi"}}]}"#;
        assert_eq!(parse_delta(payload), Some("Hi".to_owned()));
    }

    #[test]
    fn parse_delta_skips_empty_and_metadata_chunks() {
        assert_eq!(parse_delta(r#"{"choices":[{"delta":{}}]}"#), None);
        assert_eq!(parse_delta(r#"{"choices":[{"delta":{"content":""}}]}"#), None);
        assert_eq!(parse_delta(r#"{"choices":[]}"#), None);
    }

    #[test]
    fn parse_delta_tolerates_malformed_json() {
        assert_eq!(parse_delta("{not json"), None);
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let config = AiGatewayConfig {
            base_url: "https://example.invalid/v1".to_owned(),
            api_key: None,
            model: "test-model".to_owned(),
        };
        let err = AiGatewayClient::from_config(&config).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::ConfigError);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = AiGatewayConfig {
            base_url: "https://example.invalid/v1".to_owned(),
            api_key: Some("sk-secret-value".to_owned()),
            model: "test-model".to_owned(),
        };
        let client = AiGatewayClient::from_config(&config).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("sk-secret-value"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn status_mapping_distinguishes_rate_limit_and_quota() {
        let rate = AiGatewayClient::map_status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, "");
        assert_eq!(rate.code, crate::errors::ErrorCode::ExternalRateLimited);

        let quota = AiGatewayClient::map_status_error(reqwest::StatusCode::PAYMENT_REQUIRED, "");
        assert_eq!(quota.code, crate::errors::ErrorCode::ExternalQuotaExhausted);

        let other = AiGatewayClient::map_status_error(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(other.code, crate::errors::ErrorCode::ExternalServiceError);
    }
}
