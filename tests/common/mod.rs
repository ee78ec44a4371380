// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use atlas_tracker::config::Config;
use atlas_tracker::db::JsonDb;
use atlas_tracker::models::{CampaignMarker, Location};
use atlas_tracker::routes::create_router;
use atlas_tracker::services::{AtlasClient, CampaignFetch};
use atlas_tracker::state::MapState;
use atlas_tracker::AppState;
use chrono::NaiveDate;
use std::sync::{Arc, RwLock};

/// Create a test app with offline mock persistence and empty state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_state(MapState::default())
}

/// Create a test app over a prepared map state.
#[allow(dead_code)]
pub fn create_test_app_with_state(map: MapState) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let atlas = AtlasClient::new(&config.api_base_url);
    let state = Arc::new(AppState {
        config,
        db: JsonDb::new_mock(),
        atlas,
        map: RwLock::new(map),
    });
    (create_router(state.clone()), state)
}

/// A base location in Jyväskylä with a deterministic position.
#[allow(dead_code)]
pub fn location(id: u64, name: &str) -> Location {
    Location {
        id,
        name: name.to_string(),
        lat: 62.24 + id as f64 * 0.001,
        lng: 25.74,
    }
}

/// Ten Jyväskylä base locations with ids 1..=10.
#[allow(dead_code)]
pub fn base_locations() -> Vec<Location> {
    (1..=10)
        .map(|id| location(id, &format!("Asema Jyväskylä Kauppakatu {}", id)))
        .collect()
}

/// One campaign marker with its own visited flag.
#[allow(dead_code)]
pub fn campaign_marker(campaign_id: &str, marker_id: u64, visited: bool) -> CampaignMarker {
    CampaignMarker {
        campaign_id: campaign_id.to_string(),
        marker_id,
        name: format!("Asema Jyväskylä Kauppakatu {}", marker_id),
        lat: 62.24,
        lng: 25.74,
        start_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
        visited,
        visited_at: visited.then(chrono::Utc::now),
    }
}

/// A campaign fetch result, as the Atlas client would return it.
#[allow(dead_code)]
pub fn campaign_fetch(campaign_id: &str, markers: Vec<CampaignMarker>) -> CampaignFetch {
    CampaignFetch {
        name: format!("Yritys {}", campaign_id),
        description: "Testikampanja".to_string(),
        markers,
    }
}
