// ABOUTME: Profile database operations: upsert, fetch, session touch, reminder candidates
// ABOUTME: One row per user keyed on user_id with notification preference columns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

use super::Database;
use crate::errors::AppError;
use crate::models::{Profile, ReminderFrequency};
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

fn row_to_profile(row: &sqlx::sqlite::SqliteRow) -> Result<Profile, AppError> {
    let user_id: String = row.try_get("user_id")?;
    let frequency: String = row.try_get("coach_reminder_frequency")?;
    Ok(Profile {
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| AppError::database(format!("invalid user_id in profiles: {e}")))?,
        email: row.try_get("email")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        avatar_url: row.try_get("avatar_url")?,
        email_notifications: row.try_get("email_notifications")?,
        meal_reminders: row.try_get("meal_reminders")?,
        weekly_reports: row.try_get("weekly_reports")?,
        coach_reminder_frequency: ReminderFrequency::from_str_or_default(&frequency),
        last_coach_session: row.try_get("last_coach_session")?,
    })
}

impl Database {
    /// Create the profiles table
    pub(super) async fn migrate_profiles(&self) -> Result<(), AppError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS profiles (
                user_id TEXT PRIMARY KEY,
                email TEXT,
                first_name TEXT,
                last_name TEXT,
                avatar_url TEXT,
                email_notifications BOOLEAN NOT NULL DEFAULT 1,
                meal_reminders BOOLEAN NOT NULL DEFAULT 1,
                weekly_reports BOOLEAN NOT NULL DEFAULT 0,
                coach_reminder_frequency TEXT NOT NULL DEFAULT 'weekly'
                    CHECK (coach_reminder_frequency IN ('none', 'daily', 'weekly')),
                last_coach_session DATETIME,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetch a user's profile
    ///
    /// # Errors
    ///
    /// Returns a database error on query failure; a missing row is `None`.
    pub async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let row = sqlx::query("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_profile).transpose()
    }

    /// Insert or update a profile keyed on `user_id`
    ///
    /// `last_coach_session` is not written here; it changes only through
    /// [`Database::touch_coach_session`].
    ///
    /// # Errors
    ///
    /// Returns a database error on write failure.
    pub async fn upsert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        sqlx::query(
            r"
            INSERT INTO profiles (
                user_id, email, first_name, last_name, avatar_url,
                email_notifications, meal_reminders, weekly_reports,
                coach_reminder_frequency
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id) DO UPDATE SET
                email = excluded.email,
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                avatar_url = excluded.avatar_url,
                email_notifications = excluded.email_notifications,
                meal_reminders = excluded.meal_reminders,
                weekly_reports = excluded.weekly_reports,
                coach_reminder_frequency = excluded.coach_reminder_frequency,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(profile.user_id.to_string())
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.avatar_url)
        .bind(profile.email_notifications)
        .bind(profile.meal_reminders)
        .bind(profile.weekly_reports)
        .bind(profile.coach_reminder_frequency.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record that the user just completed a coaching session
    ///
    /// # Errors
    ///
    /// Returns a database error on write failure.
    pub async fn touch_coach_session(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r"
            INSERT INTO profiles (user_id, last_coach_session)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET
                last_coach_session = excluded.last_coach_session,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(user_id.to_string())
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List profiles eligible for reminder emails
    ///
    /// Candidates have both email notifications and meal reminders enabled;
    /// the `none` frequency is excluded for coach reminders specifically by
    /// the caller's scheduling decision.
    ///
    /// # Errors
    ///
    /// Returns a database error on query failure.
    pub async fn list_reminder_candidates(&self) -> Result<Vec<Profile>, AppError> {
        let rows = sqlx::query(
            "SELECT * FROM profiles WHERE email_notifications = 1 AND meal_reminders = 1",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_profile).collect()
    }
}
