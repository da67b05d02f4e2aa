// SPDX-License-Identifier: MIT

//! BeepBeep dataservice API server.
//!
//! Stores users and their recorded runs, ingests activity batches from
//! Strava, and serves per-user statistics to the other BeepBeep services.

use beepbeep_dataservice::{
    config::Config,
    db::Database,
    services::{CleanupClient, StravaClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting BeepBeep dataservice");

    // Open the database and run migrations
    let db = Database::new(&config.database_url)
        .await
        .expect("Failed to open database");
    db.seed_default_user()
        .await
        .expect("Failed to seed default user");

    let cleanup = CleanupClient::new(&config.challenges_url, &config.objectives_url);
    let strava = StravaClient::new(&config.strava_api_url);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        cleanup,
        strava,
    });

    // Build router
    let app = beepbeep_dataservice::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("beepbeep_dataservice=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
