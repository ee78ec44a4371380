// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Export/import of tracker progress as a JSON file.
//!
//! The file is written and read in the same shape. Import is all or
//! nothing: validation happens before any state is touched, and a file
//! missing both marker arrays is rejected as not-our-format.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Campaign, CampaignMarker, Location, VisitStatus};

/// The export file format.
///
/// `all_markers` and `campaign_markers` are the recognizable core; the
/// status map and campaign metadata ride along so colors, visibility and
/// visit timestamps survive a round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_markers: Option<Vec<Location>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_markers: Option<Vec<CampaignMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_status: Option<HashMap<u64, VisitStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaigns: Option<Vec<Campaign>>,
    pub export_date: DateTime<Utc>,
}

impl ExportFile {
    pub fn new(
        locations: Vec<Location>,
        campaign_markers: Vec<CampaignMarker>,
        location_status: HashMap<u64, VisitStatus>,
        campaigns: Vec<Campaign>,
        export_date: DateTime<Utc>,
    ) -> Self {
        Self {
            all_markers: Some(locations),
            campaign_markers: Some(campaign_markers),
            location_status: Some(location_status),
            campaigns: Some(campaigns),
            export_date,
        }
    }

    /// Validate an uploaded file and unpack it for wholesale import.
    ///
    /// A file missing *both* top-level marker arrays is rejected before
    /// anything is mutated; a file with one of them imports the other as
    /// empty.
    pub fn into_import(self) -> Result<ImportedState, AppError> {
        if self.all_markers.is_none() && self.campaign_markers.is_none() {
            return Err(AppError::InvalidImport(
                "expected at least one of 'allMarkers' or 'campaignMarkers'".to_string(),
            ));
        }

        Ok(ImportedState {
            locations: self.all_markers.unwrap_or_default(),
            campaign_markers: self.campaign_markers.unwrap_or_default(),
            statuses: self.location_status.unwrap_or_default(),
            campaigns: self.campaigns.unwrap_or_default(),
        })
    }
}

/// Validated import payload, ready to replace the current state.
#[derive(Debug, Clone)]
pub struct ImportedState {
    pub locations: Vec<Location>,
    pub campaign_markers: Vec<CampaignMarker>,
    pub statuses: HashMap<u64, VisitStatus>,
    pub campaigns: Vec<Campaign>,
}
