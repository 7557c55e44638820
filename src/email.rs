// ABOUTME: Transactional email client and reminder message builders
// ABOUTME: Single HTTP call per message to a Resend-compatible API, no retry or confirmation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # Transactional Email
//!
//! Thin client for the email-sending service: `{from, to, subject, html}`,
//! one HTTP call, done. Delivery failures surface as errors for the caller
//! to log and skip; the reminder jobs never abort a whole run over one
//! recipient.

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::EmailConfig;
use crate::errors::AppError;

/// Service name used in error messages
const SERVICE: &str = "email service";

#[derive(Debug, Serialize)]
struct WireEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Client for the transactional email API
#[derive(Clone)]
pub struct EmailClient {
    client: Client,
    base_url: String,
    api_key: String,
    from: String,
}

impl std::fmt::Debug for EmailClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

impl EmailClient {
    /// Create a client from email configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is set; the email
    /// channel is unavailable without one.
    pub fn from_config(config: &EmailConfig) -> Result<Self, AppError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::config("RESEND_API_KEY is not configured"))?;

        Ok(Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key,
            from: config.from.clone(),
        })
    }

    /// Send one email
    ///
    /// # Errors
    ///
    /// Returns an external-service error on connection failure or a
    /// non-success response.
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), AppError> {
        debug!("Sending email: {subject}");

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&WireEmail {
                from: &self.from,
                to: [to],
                subject,
                html,
            })
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE, format!("failed to connect: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Email send failed ({status}): {}", body.chars().take(200).collect::<String>());
            return Err(AppError::external_service(
                SERVICE,
                format!("send failed with status {status}"),
            ));
        }

        Ok(())
    }
}

/// Subject and body for a coach-session reminder
#[must_use]
pub fn coach_reminder_email(
    first_name: Option<&str>,
    had_session_before: bool,
    app_base_url: &str,
) -> (String, String) {
    let name = first_name.unwrap_or("there");
    let nudge = if had_session_before {
        "It's been a while since your last session. Let's check in on your progress!"
    } else {
        "You haven't had your first coaching session yet. Start today and get personalized nutrition advice!"
    };

    let subject = "Time for your AI Coach session!".to_owned();
    let html = format!(
        "<div>\
           <h1>Hey {name}!</h1>\
           <p>Your AI Nutrition Coach is ready to help you stay on track with your health goals.</p>\
           <p>{nudge}</p>\
           <p><a href=\"{app_base_url}/coach\">Start Coaching Session</a></p>\
           <p>You're receiving this email because you enabled meal reminders. \
              <a href=\"{app_base_url}/account\">Manage preferences</a></p>\
         </div>"
    );
    (subject, html)
}

/// Subject and body for a daily food-tracking nudge
///
/// The subject and tip vary by meal type; unknown types get the generic
/// "meals" wording. The body always carries the day's progress so far.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn tracking_reminder_email(
    first_name: Option<&str>,
    meal_type: &str,
    consumed_calories: f64,
    calorie_target: i64,
    app_base_url: &str,
) -> (String, String) {
    let name = first_name.unwrap_or("there");

    let (meal_name, tip, subject) = match meal_type {
        "breakfast" => (
            "breakfast",
            "A healthy breakfast kickstarts your metabolism and gives you energy for the day!",
            "Time to log your breakfast!",
        ),
        "lunch" => (
            "lunch",
            "A balanced lunch keeps your energy levels stable throughout the afternoon!",
            "Don't forget to log your lunch!",
        ),
        "dinner" => (
            "dinner",
            "Tracking your dinner helps you understand your daily eating patterns!",
            "Time to log your dinner!",
        ),
        "snack" => (
            "snacks",
            "Healthy snacks between meals can help you maintain steady energy levels!",
            "Remember to log your snacks!",
        ),
        _ => (
            "meals",
            "Logging your meals helps you stay on track with your nutrition goals!",
            "Don't forget to log your meals!",
        ),
    };

    let percent = if calorie_target > 0 {
        (consumed_calories / calorie_target as f64 * 100.0).round() as i64
    } else {
        0
    };

    let html = format!(
        "<div>\
           <h1>Hey {name}!</h1>\
           <p>It's time to log your <strong>{meal_name}</strong>! Tracking what you eat \
              helps you reach your nutrition goals faster.</p>\
           <p>Tip: {tip}</p>\
           <p>Today's progress: {consumed} / {calorie_target} kcal ({percent}%)</p>\
           <p><a href=\"{app_base_url}/tracking\">Log your food</a></p>\
           <p>You're receiving this email because you enabled meal reminders. \
              <a href=\"{app_base_url}/account\">Manage preferences</a></p>\
         </div>",
        consumed = consumed_calories.round() as i64,
    );
    (subject.to_owned(), html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_a_config_error() {
        let config = EmailConfig {
            base_url: "https://api.resend.com".to_owned(),
            api_key: None,
            from: "NutriCoach <noreply@example.com>".to_owned(),
        };
        let err = EmailClient::from_config(&config).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::ConfigError);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = EmailConfig {
            base_url: "https://api.resend.com".to_owned(),
            api_key: Some("re_secret_value".to_owned()),
            from: "NutriCoach <noreply@example.com>".to_owned(),
        };
        let client = EmailClient::from_config(&config).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("re_secret_value"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn coach_reminder_distinguishes_first_session() {
        let (_, first) = coach_reminder_email(Some("Ada"), false, "https://app.example.com");
        assert!(first.contains("first coaching session"));
        let (_, repeat) = coach_reminder_email(Some("Ada"), true, "https://app.example.com");
        assert!(repeat.contains("since your last session"));
        assert!(repeat.contains("Hey Ada!"));
    }

    #[test]
    fn tracking_reminder_carries_progress_and_meal() {
        let (subject, html) =
            tracking_reminder_email(None, "lunch", 600.0, 2400, "https://app.example.com");
        assert!(subject.contains("lunch"));
        assert!(html.contains("600 / 2400 kcal (25%)"));
        assert!(html.contains("Hey there!"));
    }

    #[test]
    fn tracking_reminder_unknown_meal_falls_back_to_generic() {
        let (subject, html) =
            tracking_reminder_email(Some("Ada"), "second-breakfast", 0.0, 2000, "https://x.test");
        assert!(subject.contains("meals"));
        assert!(html.contains("<strong>meals</strong>"));
    }
}
