// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes: the surface the map frontend's controls talk to.
//!
//! Every mutation re-persists the state snapshot best-effort afterwards;
//! a failed write is logged and the in-memory change stands, so the UI
//! keeps working through storage trouble.

use crate::error::{AppError, Result};
use crate::models::{Campaign, MapStats, MapView, Preferences, RenderableMarker};
use crate::services::ExportFile;
use crate::state::MapState;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLockReadGuard, RwLockWriteGuard};
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/markers", get(get_markers))
        .route("/api/cities", get(get_cities))
        .route("/api/filters/city", put(set_city_filter))
        .route("/api/prefs", get(get_prefs).put(update_prefs))
        .route("/api/locations/refresh", post(refresh_locations))
        .route("/api/locations/{id}/status", post(set_location_status))
        .route(
            "/api/campaigns",
            get(list_campaigns).delete(clear_campaigns),
        )
        .route("/api/campaigns/{id}/load", post(load_campaign))
        .route("/api/campaigns/{id}/visibility", put(set_campaign_visibility))
        .route(
            "/api/campaigns/{id}/markers/{marker_id}/status",
            post(set_campaign_marker_status),
        )
        .route("/api/campaigns/{id}", delete(remove_campaign))
        .route("/api/export", get(export_data))
        .route("/api/import", post(import_data))
}

// ─── Lock and persistence helpers ────────────────────────────

fn read_map(state: &AppState) -> Result<RwLockReadGuard<'_, MapState>> {
    state
        .map
        .read()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("state lock poisoned")))
}

fn write_map(state: &AppState) -> Result<RwLockWriteGuard<'_, MapState>> {
    state
        .map
        .write()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("state lock poisoned")))
}

/// Persist the current snapshot; log and carry on if the write fails.
fn persist_best_effort(state: &AppState, map: &MapState) {
    if let Err(e) = state.db.save(&map.to_persisted()) {
        tracing::warn!(error = %e, "State persist failed; in-memory update kept");
    }
}

// ─── Render plan ─────────────────────────────────────────────

/// A full reconciliation pass: markers plus statistics.
#[derive(Serialize)]
pub struct RenderPlanResponse {
    pub markers: Vec<RenderableMarker>,
    pub stats: MapStats,
}

/// Recompute and return the render plan from current state.
async fn get_markers(State(state): State<Arc<AppState>>) -> Result<Json<RenderPlanResponse>> {
    let map = read_map(&state)?;
    let plan = map.render_plan();
    Ok(Json(RenderPlanResponse {
        markers: plan.markers,
        stats: plan.stats,
    }))
}

// ─── City filter ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct CitiesResponse {
    pub cities: Vec<String>,
    pub selected: Option<String>,
}

async fn get_cities(State(state): State<Arc<AppState>>) -> Result<Json<CitiesResponse>> {
    let map = read_map(&state)?;
    Ok(Json(CitiesResponse {
        cities: map.cities(),
        selected: map.city_filter.selected().map(str::to_string),
    }))
}

#[derive(Deserialize)]
struct CityFilterRequest {
    /// City to select; null or empty clears the filter
    city: Option<String>,
}

async fn set_city_filter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CityFilterRequest>,
) -> Result<Json<CitiesResponse>> {
    let mut map = write_map(&state)?;
    map.city_filter.set_selected(req.city);
    Ok(Json(CitiesResponse {
        cities: map.cities(),
        selected: map.city_filter.selected().map(str::to_string),
    }))
}

// ─── Preferences ─────────────────────────────────────────────

async fn get_prefs(State(state): State<Arc<AppState>>) -> Result<Json<Preferences>> {
    let map = read_map(&state)?;
    Ok(Json(map.prefs.clone()))
}

#[derive(Deserialize, Validate)]
struct UpdatePrefsRequest {
    show_base_markers: Option<bool>,
    #[validate(range(min = 10, max = 200))]
    cluster_radius: Option<u32>,
    map_view: Option<MapView>,
}

/// Partial preferences update; omitted fields keep their value.
async fn update_prefs(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdatePrefsRequest>,
) -> Result<Json<Preferences>> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut map = write_map(&state)?;
    if let Some(show) = req.show_base_markers {
        map.prefs.show_base_markers = show;
    }
    if let Some(radius) = req.cluster_radius {
        map.prefs.cluster_radius = radius;
    }
    if let Some(view) = req.map_view {
        map.prefs.map_view = Some(view);
    }
    persist_best_effort(&state, &map);
    Ok(Json(map.prefs.clone()))
}

// ─── Base locations ──────────────────────────────────────────

#[derive(Serialize)]
pub struct RefreshResponse {
    pub locations: usize,
    pub cities: Vec<String>,
}

/// Refetch the base marker set from the Atlas API and replace it
/// wholesale. Visit statuses are keyed by id and survive.
async fn refresh_locations(State(state): State<Arc<AppState>>) -> Result<Json<RefreshResponse>> {
    let locations = state
        .atlas
        .list_locations(&state.config.marker_group_id)
        .await?;

    let mut map = write_map(&state)?;
    map.replace_locations(locations);
    let response = RefreshResponse {
        locations: map.locations.len(),
        cities: map.cities(),
    };
    persist_best_effort(&state, &map);
    Ok(Json(response))
}

#[derive(Deserialize)]
struct StatusRequest {
    visited: bool,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub location_id: u64,
    pub visited: bool,
    pub visited_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Toggle the global visited flag for a base location.
async fn set_location_status(
    State(state): State<Arc<AppState>>,
    Path(location_id): Path<u64>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<StatusResponse>> {
    let mut map = write_map(&state)?;
    map.statuses.set(location_id, req.visited, chrono::Utc::now());
    let response = StatusResponse {
        location_id,
        visited: map.statuses.is_visited(location_id),
        visited_at: map.statuses.visited_at(location_id),
    };
    persist_best_effort(&state, &map);
    Ok(Json(response))
}

// ─── Campaigns ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct CampaignResponse {
    #[serde(flatten)]
    pub campaign: Campaign,
    /// Hex value of the assigned color, for the frontend's icons
    pub color_hex: &'static str,
    pub marker_count: usize,
}

async fn list_campaigns(State(state): State<Arc<AppState>>) -> Result<Json<Vec<CampaignResponse>>> {
    let map = read_map(&state)?;
    let list = map
        .registry
        .campaigns()
        .into_iter()
        .map(|campaign| {
            let marker_count = map
                .campaign_markers
                .iter()
                .filter(|m| m.campaign_id == campaign.campaign_id)
                .count();
            CampaignResponse {
                color_hex: campaign.color.hex(),
                campaign,
                marker_count,
            }
        })
        .collect();
    Ok(Json(list))
}

#[derive(Deserialize)]
struct LoadQuery {
    /// Reload a campaign that is already loaded (the UI's confirm path)
    #[serde(default)]
    force: bool,
}

/// Fetch a campaign from the Atlas API and install its overlay.
async fn load_campaign(
    State(state): State<Arc<AppState>>,
    Path(campaign_id): Path<String>,
    Query(query): Query<LoadQuery>,
) -> Result<Json<CampaignResponse>> {
    let campaign_id = campaign_id.trim().to_string();
    if campaign_id.is_empty() {
        return Err(AppError::BadRequest("Campaign id must not be empty".to_string()));
    }

    // Duplicate load needs explicit confirmation; declining leaves the
    // prior overlay untouched.
    {
        let map = read_map(&state)?;
        if map.registry.contains(&campaign_id) && !query.force {
            return Err(AppError::Conflict(format!(
                "Campaign {} is already loaded; pass force=true to reload",
                campaign_id
            )));
        }
    }

    let fetch = state.atlas.fetch_campaign(&campaign_id).await?;
    if fetch.markers.is_empty() {
        return Err(AppError::NotFound(
            "No locations found for this campaign".to_string(),
        ));
    }

    let mut map = write_map(&state)?;
    map.install_campaign(&campaign_id, fetch);
    let response = campaign_response(&map, &campaign_id)?;
    persist_best_effort(&state, &map);
    Ok(Json(response))
}

fn campaign_response(map: &MapState, campaign_id: &str) -> Result<CampaignResponse> {
    let campaign = map
        .registry
        .get(campaign_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Campaign {} not loaded", campaign_id)))?;
    let marker_count = map
        .campaign_markers
        .iter()
        .filter(|m| m.campaign_id == campaign_id)
        .count();
    Ok(CampaignResponse {
        color_hex: campaign.color.hex(),
        campaign,
        marker_count,
    })
}

#[derive(Deserialize)]
struct VisibilityRequest {
    visible: bool,
}

async fn set_campaign_visibility(
    State(state): State<Arc<AppState>>,
    Path(campaign_id): Path<String>,
    Json(req): Json<VisibilityRequest>,
) -> Result<Json<CampaignResponse>> {
    let mut map = write_map(&state)?;
    if !map.registry.set_visible(&campaign_id, req.visible) {
        return Err(AppError::NotFound(format!(
            "Campaign {} not loaded",
            campaign_id
        )));
    }
    let response = campaign_response(&map, &campaign_id)?;
    persist_best_effort(&state, &map);
    Ok(Json(response))
}

#[derive(Serialize)]
pub struct CampaignMarkerStatusResponse {
    pub campaign_id: String,
    pub marker_id: u64,
    pub visited: bool,
}

/// Toggle one campaign marker's own visited flag. Independent of the
/// global status for the same location id.
async fn set_campaign_marker_status(
    State(state): State<Arc<AppState>>,
    Path((campaign_id, marker_id)): Path<(String, u64)>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<CampaignMarkerStatusResponse>> {
    let mut map = write_map(&state)?;
    if !map.set_campaign_marker_status(&campaign_id, marker_id, req.visited, chrono::Utc::now()) {
        return Err(AppError::NotFound(format!(
            "Marker {} not found in campaign {}",
            marker_id, campaign_id
        )));
    }
    persist_best_effort(&state, &map);
    Ok(Json(CampaignMarkerStatusResponse {
        campaign_id,
        marker_id,
        visited: req.visited,
    }))
}

#[derive(Serialize)]
pub struct ClearResponse {
    pub removed_campaigns: usize,
    pub removed_markers: usize,
}

async fn remove_campaign(
    State(state): State<Arc<AppState>>,
    Path(campaign_id): Path<String>,
) -> Result<Json<ClearResponse>> {
    let mut map = write_map(&state)?;
    let markers_before = map.campaign_markers.len();
    if !map.remove_campaign(&campaign_id) {
        return Err(AppError::NotFound(format!(
            "Campaign {} not loaded",
            campaign_id
        )));
    }
    let response = ClearResponse {
        removed_campaigns: 1,
        removed_markers: markers_before - map.campaign_markers.len(),
    };
    persist_best_effort(&state, &map);
    Ok(Json(response))
}

async fn clear_campaigns(State(state): State<Arc<AppState>>) -> Result<Json<ClearResponse>> {
    let mut map = write_map(&state)?;
    let response = ClearResponse {
        removed_campaigns: map.registry.campaigns().len(),
        removed_markers: map.campaign_markers.len(),
    };
    map.clear_campaigns();
    persist_best_effort(&state, &map);
    Ok(Json(response))
}

// ─── Export / import ─────────────────────────────────────────

async fn export_data(State(state): State<Arc<AppState>>) -> Result<Json<ExportFile>> {
    let map = read_map(&state)?;
    Ok(Json(ExportFile::new(
        map.locations.clone(),
        map.campaign_markers.clone(),
        map.statuses.entries().clone(),
        map.registry.campaigns(),
        chrono::Utc::now(),
    )))
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub locations: usize,
    pub campaign_markers: usize,
    pub campaigns: usize,
}

/// Replace all persisted state with the uploaded file (destructive; the
/// UI confirms first). Invalid files are rejected before any mutation.
async fn import_data(
    State(state): State<Arc<AppState>>,
    Json(file): Json<ExportFile>,
) -> Result<Json<ImportResponse>> {
    let imported = file.into_import()?;

    let mut map = write_map(&state)?;
    map.apply_import(imported);
    let response = ImportResponse {
        locations: map.locations.len(),
        campaign_markers: map.campaign_markers.len(),
        campaigns: map.registry.campaigns().len(),
    };
    persist_best_effort(&state, &map);
    Ok(Json(response))
}
