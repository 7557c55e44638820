// ABOUTME: Unified error handling with error codes and HTTP response mapping
// ABOUTME: Defines AppError, ErrorCode taxonomy, and structured JSON error bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # Unified Error Handling System
//!
//! Central error type for the NutriCoach server. Every failure is local to the
//! triggering request: errors carry a stable code, an HTTP status, and a
//! user-facing message, and convert directly into a structured JSON response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    #[serde(rename = "VALIDATION_FAILED")]
    ValidationFailed = 3001,

    // Resources (4000-4999)
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External services (5000-5999)
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 5001,
    #[serde(rename = "EXTERNAL_QUOTA_EXHAUSTED")]
    ExternalQuotaExhausted = 5002,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9002,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ResourceNotFound => StatusCode::NOT_FOUND,
            Self::ExternalServiceError => StatusCode::BAD_GATEWAY,
            Self::ExternalRateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::ExternalQuotaExhausted => StatusCode::PAYMENT_REQUIRED,
            Self::ConfigError
            | Self::InternalError
            | Self::DatabaseError
            | Self::SerializationError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Application error carrying a code, message, and optional field errors
#[derive(Debug, Error)]
#[error("{code:?}: {message}")]
pub struct AppError {
    /// Error classification code
    pub code: ErrorCode,
    /// User-facing message
    pub message: String,
    /// Field-keyed validation errors, present only for `ValidationFailed`
    pub field_errors: Option<BTreeMap<String, String>>,
}

impl AppError {
    /// Create a new error with a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field_errors: None,
        }
    }

    /// Invalid request input (malformed payload, bad path parameter)
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Form validation failure with a field-keyed error map
    #[must_use]
    pub fn validation(field_errors: BTreeMap<String, String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: "Validation failed".to_owned(),
            field_errors: Some(field_errors),
        }
    }

    /// Requested resource does not exist
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Failure reported by an external collaborator (AI gateway, email API)
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service rate limit (maps to 429)
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalRateLimited, message)
    }

    /// External service quota/credit exhaustion (maps to 402)
    pub fn quota_exhausted(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalQuotaExhausted, message)
    }

    /// Missing or invalid configuration
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Database operation failure
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Unexpected internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::not_found("Row"),
            other => Self::database(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, err.to_string())
    }
}

/// Structured JSON error body returned by all handlers
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error code
    pub code: ErrorCode,
    /// User-facing message
    pub message: String,
    /// Field-keyed validation errors when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<BTreeMap<String, String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let body = ErrorResponse {
            code: self.code,
            message: self.message,
            field_errors: self.field_errors,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_map_to_expected_statuses() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::ExternalRateLimited.http_status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ErrorCode::ExternalQuotaExhausted.http_status(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_error_carries_field_map() {
        let mut fields = BTreeMap::new();
        fields.insert("age".to_owned(), "Age must be between 1 and 120".to_owned());
        let err = AppError::validation(fields);
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.field_errors.as_ref().map(BTreeMap::len), Some(1));
    }
}
