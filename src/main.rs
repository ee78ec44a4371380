// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Atlas-Tracker API Server
//!
//! Tracks visits to outdoor advertising locations by serving resolved
//! marker render plans to a map frontend, with campaign overlays fetched
//! from the Atlas Media API.

use atlas_tracker::{
    config::Config, db::JsonDb, services::AtlasClient, state::MapState, AppState,
};
use std::sync::{Arc, RwLock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Atlas-Tracker API");

    // Open the state snapshot store
    let db = JsonDb::open(&config.data_path).expect("Failed to open state store");

    // Restore persisted state, if any
    let mut map = match db.load() {
        Some(persisted) => {
            let map = MapState::from_persisted(persisted);
            tracing::info!(
                locations = map.locations.len(),
                campaigns = map.registry.campaigns().len(),
                "Restored persisted state"
            );
            map
        }
        None => MapState::default(),
    };

    let atlas = AtlasClient::new(&config.api_base_url);

    // First run: bootstrap the base marker set. A failed fetch is not
    // fatal; the tracker starts empty and the user can refresh later.
    if map.locations.is_empty() {
        tracing::info!(group = %config.marker_group_id, "No persisted locations, fetching");
        match atlas.list_locations(&config.marker_group_id).await {
            Ok(locations) => {
                map.replace_locations(locations);
                if let Err(e) = db.save(&map.to_persisted()) {
                    tracing::warn!(error = %e, "Failed to persist bootstrapped locations");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Base marker bootstrap failed, starting empty");
            }
        }
    }

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        atlas,
        map: RwLock::new(map),
    });

    // Build router
    let app = atlas_tracker::routes::create_router(state);

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
                .add_directive("atlas_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
