// ABOUTME: Integration tests for the SQLite persistence layer
// ABOUTME: Verifies upsert idempotence, session touches, and reminder candidate filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{NaiveDate, Utc};
use nutricoach_server::database::Database;
use nutricoach_server::models::{
    DailyTracking, FoodEntry, HealthProfile, Profile, ReminderFrequency,
};
use uuid::Uuid;

async fn test_db() -> Database {
    Database::new("sqlite::memory:").await.unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[tokio::test]
async fn health_profile_upsert_is_idempotent_and_last_write_wins() {
    let db = test_db().await;
    let user = Uuid::new_v4();

    let mut profile = HealthProfile::new(user);
    profile.age = Some(30);
    profile.weight = Some(65.0);
    profile.health_conditions = vec!["Hypertension".to_owned()];
    db.upsert_health_profile(&profile).await.unwrap();

    // A second write with new values replaces the row
    profile.age = Some(31);
    profile.health_conditions = vec!["Hypertension".to_owned(), "PCOS".to_owned()];
    db.upsert_health_profile(&profile).await.unwrap();
    db.upsert_health_profile(&profile).await.unwrap();

    let stored = db.get_health_profile(user).await.unwrap().unwrap();
    assert_eq!(stored.age, Some(31));
    assert_eq!(stored.weight, Some(65.0));
    assert_eq!(stored.health_conditions.len(), 2);
}

#[tokio::test]
async fn missing_rows_read_as_none() {
    let db = test_db().await;
    let user = Uuid::new_v4();

    assert!(db.get_profile(user).await.unwrap().is_none());
    assert!(db.get_health_profile(user).await.unwrap().is_none());
    assert!(db
        .get_tracking(user, date("2026-08-30"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn profile_upsert_preserves_session_timestamp() {
    let db = test_db().await;
    let user = Uuid::new_v4();

    let at = Utc::now();
    db.touch_coach_session(user, at).await.unwrap();

    // A later profile update must not clear the recorded session
    let mut profile = db.get_profile(user).await.unwrap().unwrap();
    profile.first_name = Some("Ada".to_owned());
    profile.coach_reminder_frequency = ReminderFrequency::Daily;
    db.upsert_profile(&profile).await.unwrap();

    let stored = db.get_profile(user).await.unwrap().unwrap();
    assert_eq!(stored.first_name.as_deref(), Some("Ada"));
    assert_eq!(stored.coach_reminder_frequency, ReminderFrequency::Daily);
    let recorded = stored.last_coach_session.unwrap();
    assert_eq!(recorded.timestamp_millis(), at.timestamp_millis());
}

#[tokio::test]
async fn tracking_rows_are_unique_per_user_and_date() {
    let db = test_db().await;
    let user = Uuid::new_v4();
    let day = date("2026-08-30");

    let mut tracking = DailyTracking::new(user, day);
    tracking.water_intake = 2;
    tracking.food_entries.push(FoodEntry {
        name: "Oatmeal".to_owned(),
        calories: 300.0,
        protein: 10.0,
        carbs: 54.0,
        fat: 5.0,
        time: "08:00".to_owned(),
    });
    db.upsert_tracking(&tracking).await.unwrap();

    tracking.water_intake = 6;
    tracking.food_entries.clear();
    db.upsert_tracking(&tracking).await.unwrap();

    let stored = db.get_tracking(user, day).await.unwrap().unwrap();
    assert_eq!(stored.water_intake, 6);
    assert!(stored.food_entries.is_empty());

    // The other user's same date is untouched
    assert!(db
        .get_tracking(Uuid::new_v4(), day)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn tracking_range_is_scoped_and_ordered() {
    let db = test_db().await;
    let user = Uuid::new_v4();
    let other = Uuid::new_v4();

    for day in ["2026-08-28", "2026-08-25", "2026-08-30"] {
        db.upsert_tracking(&DailyTracking::new(user, date(day)))
            .await
            .unwrap();
    }
    db.upsert_tracking(&DailyTracking::new(other, date("2026-08-27")))
        .await
        .unwrap();

    let rows = db
        .get_tracking_range(user, date("2026-08-25"), date("2026-08-29"))
        .await
        .unwrap();
    let days: Vec<String> = rows.iter().map(|r| r.date.to_string()).collect();
    assert_eq!(days, ["2026-08-25", "2026-08-28"]);
}

#[tokio::test]
async fn file_backed_database_is_created_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nutricoach.db");
    let url = format!("sqlite:{}", path.display());

    let user = Uuid::new_v4();
    {
        let db = Database::new(&url).await.unwrap();
        let mut profile = Profile::new(user);
        profile.first_name = Some("Ada".to_owned());
        db.upsert_profile(&profile).await.unwrap();
    }

    // A fresh pool over the same file sees the row
    let db = Database::new(&url).await.unwrap();
    let stored = db.get_profile(user).await.unwrap().unwrap();
    assert_eq!(stored.first_name.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn reminder_candidates_require_both_notification_flags() {
    let db = test_db().await;

    let mut eligible = Profile::new(Uuid::new_v4());
    eligible.email = Some("eligible@example.com".to_owned());
    db.upsert_profile(&eligible).await.unwrap();

    let mut no_reminders = Profile::new(Uuid::new_v4());
    no_reminders.meal_reminders = false;
    db.upsert_profile(&no_reminders).await.unwrap();

    let mut no_notifications = Profile::new(Uuid::new_v4());
    no_notifications.email_notifications = false;
    db.upsert_profile(&no_notifications).await.unwrap();

    let candidates = db.list_reminder_candidates().await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].user_id, eligible.user_id);
    assert_eq!(candidates[0].email.as_deref(), Some("eligible@example.com"));
}
