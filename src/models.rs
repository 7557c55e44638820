// ABOUTME: Core domain models for user profiles, health profiles, and daily tracking
// ABOUTME: Plain persisted records exchanged between the database layer and HTTP handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # Domain Models
//!
//! Persisted records for the nutrition-coaching domain. Each user owns at most
//! one [`Profile`] and one [`HealthProfile`]; [`DailyTracking`] rows are unique
//! per (user, calendar date). All writes go through upsert-on-conflict, so the
//! records carry no lifecycle state of their own.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a user wants to be reminded to check in with the AI coach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFrequency {
    /// Never send coach reminders
    None,
    /// Remind after one day without a session
    Daily,
    /// Remind after seven days without a session
    #[default]
    Weekly,
}

impl ReminderFrequency {
    /// Parse from the stored string form, defaulting to weekly
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "none" => Self::None,
            "daily" => Self::Daily,
            _ => Self::Weekly,
        }
    }

    /// String form stored in the database
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

/// Account-level profile: identity, avatar, and notification preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user (unique)
    pub user_id: Uuid,
    /// Contact email for reminder delivery; identity itself lives upstream
    pub email: Option<String>,
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Avatar image URL
    pub avatar_url: Option<String>,
    /// Whether email notifications are enabled at all
    pub email_notifications: bool,
    /// Whether meal/coach reminder emails are enabled
    pub meal_reminders: bool,
    /// Whether weekly progress report emails are enabled
    pub weekly_reports: bool,
    /// Coach reminder cadence
    pub coach_reminder_frequency: ReminderFrequency,
    /// Timestamp of the most recent coaching session, if any
    pub last_coach_session: Option<DateTime<Utc>>,
}

impl Profile {
    /// Create a fresh profile with default notification preferences
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            email: None,
            first_name: None,
            last_name: None,
            avatar_url: None,
            email_notifications: true,
            meal_reminders: true,
            weekly_reports: false,
            coach_reminder_frequency: ReminderFrequency::Weekly,
            last_coach_session: None,
        }
    }
}

/// Health questionnaire answers, upserted wholesale from the wizard form
///
/// All non-key fields are optional: the wizard permits skipping questions and
/// downstream consumers render placeholders for missing values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthProfile {
    /// Owning user (unique)
    pub user_id: Uuid,
    /// Age in years
    pub age: Option<i64>,
    /// Self-reported gender; the BMR formula only distinguishes "male"
    pub gender: Option<String>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Activity level key (sedentary, light, moderate, very, extra)
    pub activity_level: Option<String>,
    /// Selected health conditions
    pub health_conditions: Vec<String>,
    /// Free-text current medications
    pub medications: Option<String>,
    /// Selected dietary preferences
    pub dietary_preferences: Vec<String>,
    /// Selected allergies
    pub allergies: Vec<String>,
    /// Free-text disliked foods
    pub disliked_foods: Option<String>,
    /// Selected goals
    pub goals: Vec<String>,
    /// Target weight in kilograms
    pub target_weight: Option<f64>,
    /// Goal timeline key
    pub timeline: Option<String>,
    /// Free-text additional notes
    pub additional_notes: Option<String>,
    /// Planned meals per day; reminder jobs assume 3 when unset
    pub meals_per_day: Option<i64>,
    /// Planned snacks per day; reminder jobs assume 2 when unset
    pub snacks_per_day: Option<i64>,
    /// Manual daily calorie override
    pub custom_calories: Option<i64>,
    /// Manual protein grams override
    pub custom_protein: Option<i64>,
    /// Manual carbohydrate grams override
    pub custom_carbs: Option<i64>,
    /// Manual fat grams override
    pub custom_fat: Option<i64>,
}

impl HealthProfile {
    /// Create an empty health profile for a user
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }
}

/// A single logged food item within a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Food name as entered
    pub name: String,
    /// Calories (kcal)
    pub calories: f64,
    /// Protein grams
    pub protein: f64,
    /// Carbohydrate grams
    pub carbs: f64,
    /// Fat grams
    pub fat: f64,
    /// Time of day label (e.g. "08:30", "breakfast")
    pub time: String,
}

/// One user's food and water log for one calendar date
///
/// `food_entries` is held as an opaque structured list; append/remove is
/// read-modify-write by the client with last-write-wins upsert semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTracking {
    /// Owning user
    pub user_id: Uuid,
    /// Calendar date (unique together with `user_id`)
    pub date: NaiveDate,
    /// Logged food items
    pub food_entries: Vec<FoodEntry>,
    /// Glasses of water logged
    pub water_intake: i64,
}

impl DailyTracking {
    /// Create an empty tracking row for a user and date
    #[must_use]
    pub const fn new(user_id: Uuid, date: NaiveDate) -> Self {
        Self {
            user_id,
            date,
            food_entries: Vec::new(),
            water_intake: 0,
        }
    }

    /// Total calories consumed across all logged entries
    #[must_use]
    pub fn total_calories(&self) -> f64 {
        self.food_entries.iter().map(|e| e.calories).sum()
    }

    /// Total (protein, carbs, fat) grams consumed
    #[must_use]
    pub fn total_macros(&self) -> (f64, f64, f64) {
        self.food_entries.iter().fold((0.0, 0.0, 0.0), |acc, e| {
            (acc.0 + e.protein, acc.1 + e.carbs, acc.2 + e.fat)
        })
    }
}
