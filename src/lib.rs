// ABOUTME: Main library entry point for the NutriCoach nutrition-coaching API
// ABOUTME: Profiles, AI coaching, daily tracking, and reminder delivery over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

#![deny(unsafe_code)]

//! # NutriCoach Server
//!
//! Backend for a personal nutrition-coaching app. This server owns the user's
//! health questionnaire, computes calorie and macro targets from it, proxies
//! AI coaching conversations and meal plans through an OpenAI-compatible
//! gateway with token-by-token streaming, records daily food and water logs,
//! and sends reminder emails when a scheduler asks it to.
//!
//! ## Architecture
//!
//! - **Models**: persisted records (profile, health profile, daily tracking)
//! - **Nutrition**: pure target computation (Harris-Benedict BMR, macro split)
//! - **Validation**: declarative wizard-form schema with per-step subsets
//! - **LLM**: gateway client, SSE decoding, and prompt construction
//! - **Database**: SQLite via sqlx, upsert-on-conflict everywhere
//! - **Routes**: axum handlers grouped by domain over shared resources
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nutricoach_server::config::environment::ServerConfig;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! println!("NutriCoach server configured with port: HTTP={}", config.http_port);
//! # Ok(())
//! # }
//! ```

pub mod capabilities;
pub mod conditions;
pub mod config;
pub mod context;
pub mod database;
pub mod email;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod nutrition;
pub mod reminders;
pub mod routes;
pub mod server;
pub mod validation;
