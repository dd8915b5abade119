// SPDX-License-Identifier: MIT

//! Wellness Portal API Server
//!
//! Serves the patient-wellness portal: email/password authentication,
//! per-user dashboard data, and the admin user-management API.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wellness_portal::{
    config::Config, db::UserStore, services::AccountService, AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Wellness Portal API");

    // The store connects lazily: the first request to touch it establishes
    // the connection and every later request reuses the same handle.
    let store = UserStore::new(&config.gcp_project_id);

    let accounts = AccountService::new(store.clone(), config.jwt_signing_key.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        accounts,
    });

    let app = wellness_portal::routes::create_router(state);

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
                .add_directive("wellness_portal=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
