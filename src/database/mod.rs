// ABOUTME: Database management: connection pool, migrations, and per-domain operations
// ABOUTME: SQLite via sqlx with upsert-on-conflict semantics for all user-owned records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # Database Management
//!
//! Storage for profiles, health profiles, and daily tracking. All writes are
//! upserts keyed on the record's uniqueness constraint (`user_id`, or
//! `(user_id, date)` for tracking), so repeated submissions are idempotent
//! and conflicts resolve last-write-wins with no application arbitration.

mod health_profiles;
mod profiles;
mod tracking;

use crate::errors::AppError;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager holding the connection pool
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open a connection pool and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails.
    pub async fn new(database_url: &str) -> Result<Self, AppError> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") && !database_url.contains("memory") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the connection pool
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run schema migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub async fn migrate(&self) -> Result<(), AppError> {
        self.migrate_profiles().await?;
        self.migrate_health_profiles().await?;
        self.migrate_tracking().await?;
        Ok(())
    }
}
