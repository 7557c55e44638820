// ABOUTME: HTTP route modules grouped by domain area
// ABOUTME: Each module exposes a Routes struct assembling its axum Router over shared resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # HTTP Routes
//!
//! Route handlers grouped by domain. Every module follows the same shape: a
//! `XRoutes` struct with a `routes(resources)` constructor returning an axum
//! `Router` whose handlers take `State(Arc<ServerResources>)` plus an
//! extracted [`crate::context::SessionContext`] where the operation is
//! user-scoped.

pub mod capabilities;
pub mod coach;
pub mod dashboard;
pub mod health;
pub mod health_profile;
pub mod jobs;
pub mod profiles;
pub mod tracking;
