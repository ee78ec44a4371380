// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Atlas Media API client.
//!
//! Handles:
//! - Paginated base marker listing
//! - Campaign ("reservation resources") detail fetch
//! - Upstream error mapping (404 vs transport failures)
//!
//! Failures are surfaced to the caller unretried; a failed fetch never
//! touches persisted data.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::error::AppError;
use crate::models::{CampaignMarker, Location};

/// Atlas Media API client.
#[derive(Clone)]
pub struct AtlasClient {
    http: reqwest::Client,
    base_url: String,
}

impl AtlasClient {
    /// Create a client against the given API root (no trailing slash).
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the complete base marker listing for a marker group.
    ///
    /// The listing is paginated; pages are requested strictly one after
    /// another and concatenated until the API reports no further page.
    pub async fn list_locations(&self, marker_group_id: &str) -> Result<Vec<Location>, AppError> {
        let mut locations = Vec::new();
        let mut page: u32 = 1;

        loop {
            let url = format!(
                "{}/public-map-point-markers/{}/?format=json&page={}",
                self.base_url,
                urlencoding::encode(marker_group_id),
                page
            );
            let response: MarkerPage = self.get_json(&url).await?;

            locations.extend(response.results.into_iter().map(Location::from));

            if response.next.is_none() {
                break;
            }
            page += 1;
        }

        tracing::info!(count = locations.len(), pages = page, "Fetched base markers");
        Ok(locations)
    }

    /// Fetch one campaign and flatten its reserved resources into markers.
    ///
    /// Every map point of every reserved resource becomes one marker,
    /// inheriting the resource's reservation window. Markers start
    /// unvisited; visited state is ours, not the API's.
    pub async fn fetch_campaign(&self, campaign_id: &str) -> Result<CampaignFetch, AppError> {
        let url = format!(
            "{}/reservation-resources-map/{}/?format=json",
            self.base_url,
            urlencoding::encode(campaign_id)
        );
        let detail: CampaignDetail = self.get_json(&url).await?;

        let mut markers = Vec::new();
        for resource in detail.reserved_resources {
            let Some(inventory) = resource.inventory_resource else {
                continue;
            };
            for point in inventory.map_point_markers {
                markers.push(CampaignMarker {
                    campaign_id: campaign_id.to_string(),
                    marker_id: point.id,
                    name: point.name,
                    lat: point.lat,
                    lng: point.lng,
                    start_date: resource.start_date,
                    end_date: resource.end_date,
                    visited: false,
                    visited_at: None,
                });
            }
        }

        tracing::info!(
            campaign_id,
            markers = markers.len(),
            "Fetched campaign data"
        );

        Ok(CampaignFetch {
            name: detail.name,
            description: detail.description.unwrap_or_default(),
            markers,
        })
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::AtlasApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();

            if status.as_u16() == 404 {
                return Err(AppError::AtlasApi(AppError::ATLAS_NOT_FOUND.to_string()));
            }

            let body = response.text().await.unwrap_or_default();
            return Err(AppError::AtlasApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::AtlasApi(format!("JSON parse error: {}", e)))
    }
}

/// The flattened result of a campaign fetch.
#[derive(Debug, Clone)]
pub struct CampaignFetch {
    pub name: String,
    pub description: String,
    pub markers: Vec<CampaignMarker>,
}

// ─── Wire DTOs ───────────────────────────────────────────────

/// One page of the base marker listing.
#[derive(Debug, Deserialize)]
struct MarkerPage {
    results: Vec<RawMapPoint>,
    next: Option<String>,
}

/// A map point as the API sends it. Coordinates arrive as strings on
/// some endpoints and numbers on others.
#[derive(Debug, Deserialize)]
struct RawMapPoint {
    id: u64,
    name: String,
    #[serde(deserialize_with = "f64_from_string_or_number")]
    lat: f64,
    #[serde(deserialize_with = "f64_from_string_or_number")]
    lng: f64,
}

impl From<RawMapPoint> for Location {
    fn from(raw: RawMapPoint) -> Self {
        Location {
            id: raw.id,
            name: raw.name,
            lat: raw.lat,
            lng: raw.lng,
        }
    }
}

/// Campaign detail response.
#[derive(Debug, Deserialize)]
struct CampaignDetail {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    reserved_resources: Vec<ReservedResource>,
}

#[derive(Debug, Deserialize)]
struct ReservedResource {
    start_date: NaiveDate,
    end_date: NaiveDate,
    inventory_resource: Option<InventoryResource>,
}

#[derive(Debug, Deserialize)]
struct InventoryResource {
    #[serde(default)]
    map_point_markers: Vec<RawMapPoint>,
}

fn f64_from_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Number(f64),
        String(String),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Number(n) => Ok(n),
        StringOrNumber::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
