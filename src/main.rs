// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SkyNav API Server
//!
//! Serves the trip planning API for the SkyNav PWA.

use skynav::{
    config::{Config, StoreBackend},
    db::{FirestoreDb, MemoryDb, ProfileStore, TripStore},
    services::{JwtVerifier, ProfileService, TripService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, backend = ?config.store_backend, "Starting SkyNav API");

    let (trip_store, profile_store): (Arc<dyn TripStore>, Arc<dyn ProfileStore>) =
        match config.store_backend {
            StoreBackend::Firestore => {
                let db = FirestoreDb::new(&config.gcp_project_id).await?;
                (Arc::new(db.clone()), Arc::new(db))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; data is lost on restart");
                let db = MemoryDb::new();
                (Arc::new(db.clone()), Arc::new(db))
            }
        };

    let verifier = Arc::new(JwtVerifier::new(&config));

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        trips: TripService::new(trip_store),
        profiles: ProfileService::new(profile_store),
        verifier,
    });

    // Build router
    let app = skynav::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("skynav=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
