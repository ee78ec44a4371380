// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persisted user preferences: filter toggles, cluster radius, map view.

use serde::{Deserialize, Serialize};

/// User preferences, persisted across restarts.
///
/// `cluster_radius` is stored and served for the frontend's clustering
/// library; the server never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub show_base_markers: bool,
    pub cluster_radius: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_view: Option<MapView>,
}

/// Last map center and zoom, restored on page load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            show_base_markers: true,
            cluster_radius: 70,
            map_view: None,
        }
    }
}
