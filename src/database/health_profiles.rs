// ABOUTME: Health profile database operations: wholesale upsert and fetch keyed on user_id
// ABOUTME: List-valued questionnaire answers are stored as JSON text columns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

use super::Database;
use crate::errors::AppError;
use crate::models::HealthProfile;
use sqlx::Row;
use uuid::Uuid;

fn decode_list(raw: Option<String>) -> Result<Vec<String>, AppError> {
    match raw {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

fn row_to_health_profile(row: &sqlx::sqlite::SqliteRow) -> Result<HealthProfile, AppError> {
    let user_id: String = row.try_get("user_id")?;
    Ok(HealthProfile {
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| AppError::database(format!("invalid user_id in health_profiles: {e}")))?,
        age: row.try_get("age")?,
        gender: row.try_get("gender")?,
        height: row.try_get("height")?,
        weight: row.try_get("weight")?,
        activity_level: row.try_get("activity_level")?,
        health_conditions: decode_list(row.try_get("health_conditions")?)?,
        medications: row.try_get("medications")?,
        dietary_preferences: decode_list(row.try_get("dietary_preferences")?)?,
        allergies: decode_list(row.try_get("allergies")?)?,
        disliked_foods: row.try_get("disliked_foods")?,
        goals: decode_list(row.try_get("goals")?)?,
        target_weight: row.try_get("target_weight")?,
        timeline: row.try_get("timeline")?,
        additional_notes: row.try_get("additional_notes")?,
        meals_per_day: row.try_get("meals_per_day")?,
        snacks_per_day: row.try_get("snacks_per_day")?,
        custom_calories: row.try_get("custom_calories")?,
        custom_protein: row.try_get("custom_protein")?,
        custom_carbs: row.try_get("custom_carbs")?,
        custom_fat: row.try_get("custom_fat")?,
    })
}

impl Database {
    /// Create the health_profiles table
    pub(super) async fn migrate_health_profiles(&self) -> Result<(), AppError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS health_profiles (
                user_id TEXT PRIMARY KEY,
                age INTEGER,
                gender TEXT,
                height REAL,
                weight REAL,
                activity_level TEXT,
                health_conditions TEXT,
                medications TEXT,
                dietary_preferences TEXT,
                allergies TEXT,
                disliked_foods TEXT,
                goals TEXT,
                target_weight REAL,
                timeline TEXT,
                additional_notes TEXT,
                meals_per_day INTEGER,
                snacks_per_day INTEGER,
                custom_calories INTEGER,
                custom_protein INTEGER,
                custom_carbs INTEGER,
                custom_fat INTEGER,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetch a user's health profile
    ///
    /// # Errors
    ///
    /// Returns a database error on query failure; a missing row is `None`.
    pub async fn get_health_profile(&self, user_id: Uuid) -> Result<Option<HealthProfile>, AppError> {
        let row = sqlx::query("SELECT * FROM health_profiles WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_health_profile).transpose()
    }

    /// Insert or replace a health profile wholesale, keyed on `user_id`
    ///
    /// Repeating an identical payload is idempotent: one row remains, with
    /// the latest write's values.
    ///
    /// # Errors
    ///
    /// Returns a database or serialization error on write failure.
    pub async fn upsert_health_profile(&self, profile: &HealthProfile) -> Result<(), AppError> {
        sqlx::query(
            r"
            INSERT INTO health_profiles (
                user_id, age, gender, height, weight, activity_level,
                health_conditions, medications, dietary_preferences, allergies,
                disliked_foods, goals, target_weight, timeline, additional_notes,
                meals_per_day, snacks_per_day,
                custom_calories, custom_protein, custom_carbs, custom_fat
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
            ON CONFLICT (user_id) DO UPDATE SET
                age = excluded.age,
                gender = excluded.gender,
                height = excluded.height,
                weight = excluded.weight,
                activity_level = excluded.activity_level,
                health_conditions = excluded.health_conditions,
                medications = excluded.medications,
                dietary_preferences = excluded.dietary_preferences,
                allergies = excluded.allergies,
                disliked_foods = excluded.disliked_foods,
                goals = excluded.goals,
                target_weight = excluded.target_weight,
                timeline = excluded.timeline,
                additional_notes = excluded.additional_notes,
                meals_per_day = excluded.meals_per_day,
                snacks_per_day = excluded.snacks_per_day,
                custom_calories = excluded.custom_calories,
                custom_protein = excluded.custom_protein,
                custom_carbs = excluded.custom_carbs,
                custom_fat = excluded.custom_fat,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(profile.user_id.to_string())
        .bind(profile.age)
        .bind(&profile.gender)
        .bind(profile.height)
        .bind(profile.weight)
        .bind(&profile.activity_level)
        .bind(serde_json::to_string(&profile.health_conditions)?)
        .bind(&profile.medications)
        .bind(serde_json::to_string(&profile.dietary_preferences)?)
        .bind(serde_json::to_string(&profile.allergies)?)
        .bind(&profile.disliked_foods)
        .bind(serde_json::to_string(&profile.goals)?)
        .bind(profile.target_weight)
        .bind(&profile.timeline)
        .bind(&profile.additional_notes)
        .bind(profile.meals_per_day)
        .bind(profile.snacks_per_day)
        .bind(profile.custom_calories)
        .bind(profile.custom_protein)
        .bind(profile.custom_carbs)
        .bind(profile.custom_fat)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
