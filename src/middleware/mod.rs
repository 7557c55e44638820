// ABOUTME: HTTP middleware layers shared across all routers
// ABOUTME: Currently CORS; tracing layers are applied directly in server assembly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

pub mod cors;
