// ABOUTME: Production server binary: loads config, opens the database, serves HTTP
// ABOUTME: Reminder delivery and AI features degrade gracefully when their keys are absent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # NutriCoach Server Binary
//!
//! Starts the nutrition-coaching API: health questionnaire, AI coaching,
//! daily tracking, and reminder jobs.

use anyhow::Result;
use clap::Parser;
use nutricoach_server::{
    config::environment::ServerConfig, context::ServerResources, database::Database, logging,
    server,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "nutricoach-server")]
#[command(about = "NutriCoach - personal nutrition-coaching API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting NutriCoach server");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url).await?;
    info!("Database ready at {}", config.database.url);

    let resources = ServerResources::new(config, database);
    if resources.gateway.is_none() {
        warn!("AI_GATEWAY_API_KEY not set: coaching endpoints will report a configuration error");
    }
    if resources.email.is_none() {
        warn!("RESEND_API_KEY not set: reminder jobs will report a configuration error");
    }

    server::run(resources).await
}
