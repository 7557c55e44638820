// ABOUTME: Configuration module organization for environment-based settings
// ABOUTME: Re-exports the server configuration types used across the crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! Configuration management for the NutriCoach server

/// Environment-based server configuration
pub mod environment;

pub use environment::{AiGatewayConfig, DatabaseConfig, EmailConfig, ServerConfig};
