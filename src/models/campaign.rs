// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Campaign ("company") overlay models and the marker color palette.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one loaded campaign overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    /// Upstream campaign id (a UUID string on the Atlas API)
    pub campaign_id: String,
    pub name: String,
    pub description: String,
    /// Palette color assigned on first load, preserved across updates
    pub color: MarkerColor,
    /// Whether this overlay's markers are drawn
    pub visible: bool,
}

/// One marker belonging to a campaign overlay.
///
/// Identity is `(campaign_id, marker_id)`; the same upstream marker id may
/// appear under several campaigns, each with its own visited state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignMarker {
    pub campaign_id: String,
    pub marker_id: u64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Reservation window inherited from the enclosing resource
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub visited: bool,
    pub visited_at: Option<DateTime<Utc>>,
}

/// Marker colors: a rotation of 20 campaign colors plus two reserved
/// values: `Green` for visited markers and `Grey` for unseen base
/// markers. The reserved two are never handed out to campaigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Blue,
    Orange,
    Violet,
    Yellow,
    Gold,
    Pink,
    Cyan,
    Magenta,
    Lime,
    Teal,
    Indigo,
    Maroon,
    Navy,
    Olive,
    Coral,
    Turquoise,
    Salmon,
    Plum,
    Khaki,
    Green,
    Grey,
}

/// Fixed assignment order for campaign colors. Cycles with wraparound
/// when more than 20 campaigns are loaded; collisions are accepted.
pub const CAMPAIGN_PALETTE: [MarkerColor; 20] = [
    MarkerColor::Red,
    MarkerColor::Blue,
    MarkerColor::Orange,
    MarkerColor::Violet,
    MarkerColor::Yellow,
    MarkerColor::Gold,
    MarkerColor::Pink,
    MarkerColor::Cyan,
    MarkerColor::Magenta,
    MarkerColor::Lime,
    MarkerColor::Teal,
    MarkerColor::Indigo,
    MarkerColor::Maroon,
    MarkerColor::Navy,
    MarkerColor::Olive,
    MarkerColor::Coral,
    MarkerColor::Turquoise,
    MarkerColor::Salmon,
    MarkerColor::Plum,
    MarkerColor::Khaki,
];

impl MarkerColor {
    /// Color reserved for visited markers.
    pub const VISITED: MarkerColor = MarkerColor::Green;

    /// Default color for unseen base markers, also the registry fallback.
    pub const UNSEEN: MarkerColor = MarkerColor::Grey;

    /// Hex value for the frontend's marker icons.
    pub fn hex(self) -> &'static str {
        match self {
            MarkerColor::Red => "#D63E2A",
            MarkerColor::Blue => "#38AADD",
            MarkerColor::Orange => "#F69730",
            MarkerColor::Violet => "#9C2BCB",
            MarkerColor::Yellow => "#FFD326",
            MarkerColor::Gold => "#C4A700",
            MarkerColor::Pink => "#FF8CE0",
            MarkerColor::Cyan => "#30C4C9",
            MarkerColor::Magenta => "#C42986",
            MarkerColor::Lime => "#8BC926",
            MarkerColor::Teal => "#00796B",
            MarkerColor::Indigo => "#3F51B5",
            MarkerColor::Maroon => "#7A1E1E",
            MarkerColor::Navy => "#1A3A6B",
            MarkerColor::Olive => "#707C22",
            MarkerColor::Coral => "#FF7357",
            MarkerColor::Turquoise => "#2BD6C2",
            MarkerColor::Salmon => "#F9A08B",
            MarkerColor::Plum => "#9B4D8C",
            MarkerColor::Khaki => "#B1A25C",
            MarkerColor::Green => "#72B026",
            MarkerColor::Grey => "#7B7B7B",
        }
    }
}
