// ABOUTME: Daily tracking database operations keyed on (user_id, date)
// ABOUTME: Food entries stored as an opaque JSON blob with last-write-wins upsert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

use super::Database;
use crate::errors::AppError;
use crate::models::{DailyTracking, FoodEntry};
use chrono::NaiveDate;
use sqlx::Row;
use uuid::Uuid;

fn row_to_tracking(row: &sqlx::sqlite::SqliteRow) -> Result<DailyTracking, AppError> {
    let user_id: String = row.try_get("user_id")?;
    let date: NaiveDate = row.try_get("date")?;
    let entries: String = row.try_get("food_entries")?;
    let food_entries: Vec<FoodEntry> = serde_json::from_str(&entries)?;

    Ok(DailyTracking {
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| AppError::database(format!("invalid user_id in daily_tracking: {e}")))?,
        date,
        food_entries,
        water_intake: row.try_get("water_intake")?,
    })
}

impl Database {
    /// Create the daily_tracking table and its uniqueness index
    pub(super) async fn migrate_tracking(&self) -> Result<(), AppError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS daily_tracking (
                user_id TEXT NOT NULL,
                date DATE NOT NULL,
                food_entries TEXT NOT NULL DEFAULT '[]',
                water_intake INTEGER NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (user_id, date)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_daily_tracking_date ON daily_tracking(date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetch one user's tracking row for a calendar date
    ///
    /// # Errors
    ///
    /// Returns a database error on query failure; a missing row is `None`.
    pub async fn get_tracking(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DailyTracking>, AppError> {
        let row = sqlx::query("SELECT * FROM daily_tracking WHERE user_id = $1 AND date = $2")
            .bind(user_id.to_string())
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_tracking).transpose()
    }

    /// Fetch a user's tracking rows within an inclusive date range, oldest first
    ///
    /// # Errors
    ///
    /// Returns a database error on query failure.
    pub async fn get_tracking_range(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyTracking>, AppError> {
        let rows = sqlx::query(
            "SELECT * FROM daily_tracking WHERE user_id = $1 AND date >= $2 AND date <= $3 ORDER BY date",
        )
        .bind(user_id.to_string())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_tracking).collect()
    }

    /// Insert or replace the tracking row for `(user_id, date)`
    ///
    /// The whole food-entry list and water count are written as submitted;
    /// concurrent writers resolve last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns a database or serialization error on write failure.
    pub async fn upsert_tracking(&self, tracking: &DailyTracking) -> Result<(), AppError> {
        sqlx::query(
            r"
            INSERT INTO daily_tracking (user_id, date, food_entries, water_intake)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, date) DO UPDATE SET
                food_entries = excluded.food_entries,
                water_intake = excluded.water_intake,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(tracking.user_id.to_string())
        .bind(tracking.date)
        .bind(serde_json::to_string(&tracking.food_entries)?)
        .bind(tracking.water_intake)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
