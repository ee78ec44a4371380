// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resolved marker types produced by a reconciliation pass.

use serde::{Deserialize, Serialize};

use crate::models::MarkerColor;

/// One marker of a render plan, fully resolved: where to draw it, in what
/// color and shape, and what its popup should say.
///
/// `campaign_id` is the discriminator: `None` is a base marker, `Some` a
/// campaign marker. Base and campaign markers sharing a location id are
/// distinct entries (campaign presence suppresses the base one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderableMarker {
    pub location_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub color: MarkerColor,
    pub shape: MarkerShape,
    pub visited: bool,
    pub popup: PopupSpec,
}

/// Marker glyph shape, selected by advertisement type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Circle,
    RoundedRect,
    SmallCircle,
}

/// Advertisement type, classified from the location name.
///
/// First matching substring wins; the checks are case-insensitive and the
/// leading space is part of the pattern (so "Maxitalo" does not match).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdType {
    Maxi,
    ClassicKeski,
    ClassicSingle,
    Standard,
}

impl AdType {
    pub fn classify(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.contains(" maxi") {
            AdType::Maxi
        } else if name.contains(" classic keski") {
            AdType::ClassicKeski
        } else if name.contains(" classic single") {
            AdType::ClassicSingle
        } else {
            AdType::Standard
        }
    }

    /// Shape drawn for this advertisement type. Color is chosen
    /// independently by the visibility rules.
    pub fn shape(self) -> MarkerShape {
        match self {
            AdType::Maxi | AdType::Standard => MarkerShape::Circle,
            AdType::ClassicKeski => MarkerShape::RoundedRect,
            AdType::ClassicSingle => MarkerShape::SmallCircle,
        }
    }
}

/// Structured popup payload; the frontend renders this into HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupSpec {
    pub title: String,
    pub visited: bool,
    /// Pre-formatted "DD-MM-YYYY HH:MM" visit time, when visited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visited_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<CampaignPopup>,
}

/// Campaign details shown in a campaign marker's popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignPopup {
    pub name: String,
    pub description: String,
    /// "DD-MM-YYYY"
    pub start_date: String,
    pub end_date: String,
}
