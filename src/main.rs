// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Saga API Server
//!
//! Serves the login endpoint for the Saga book-tracking frontend.

use saga_api::{config::Config, services::UserDirectory, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    if config.uses_insecure_secret() {
        tracing::warn!("Signing tokens with the development secret; set JWT_SECRET in production");
    }
    tracing::info!(
        port = config.port,
        token_lifetime_secs = config.jwt_expires_in.as_secs(),
        "Starting Saga API"
    );

    // Seed the directory before accepting traffic
    let directory = Arc::new(UserDirectory::new());
    directory.initialize().await?;

    let state = Arc::new(AppState::new(config.clone(), directory));

    // Build router
    let app = saga_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::from_default_env()
        .add_directive("saga_api=debug".parse()?)
        .add_directive("info".parse()?);

    tracing_subscriber::registry().with(filter).with(format).init();
    Ok(())
}
