// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The marker reconciliation pass.
//!
//! Given the base location set, the campaign overlays, the visit statuses
//! and the active filters, decide which markers are drawn, in what color
//! and shape, and with what popup content. Pure: no side effects, no
//! stored state, identical inputs give identical plans, which is what
//! makes "recompute everything after every change" safe.

use std::collections::HashSet;

use crate::models::{
    AdType, CampaignMarker, Location, MapStats, MarkerColor, PopupSpec, RenderableMarker,
};
use crate::models::marker::CampaignPopup;
use crate::services::{CampaignRegistry, CityFilter, StatusStore};
use crate::time_utils::{format_campaign_date, format_visit_timestamp};

/// Everything one reconciliation pass reads. All borrowed; the reconciler
/// owns nothing.
pub struct ReconcileInput<'a> {
    pub locations: &'a [Location],
    pub campaign_markers: &'a [CampaignMarker],
    pub statuses: &'a StatusStore,
    pub registry: &'a CampaignRegistry,
    pub city_filter: &'a CityFilter,
    pub show_base_markers: bool,
}

/// The resolved output of one pass: markers to draw plus the statistics
/// derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub markers: Vec<RenderableMarker>,
    pub stats: MapStats,
}

/// Run one reconciliation pass.
///
/// Precedence per location id:
/// 1. every marker of a visible campaign renders (one per campaign, so
///    overlapping pins are expected), green when its own visited flag is
///    set, else in the campaign's color;
/// 2. an id covered by any visible campaign marker never also renders as
///    a base marker, whatever the base toggle says;
/// 3. remaining base locations render when the base toggle is on, green
///    if visited, grey otherwise.
///
/// The city filter is applied afterwards to the produced markers, then
/// statistics are taken over what survived.
pub fn reconcile(input: &ReconcileInput) -> RenderPlan {
    let visible_campaigns = input.registry.visible_ids();

    let mut markers = Vec::new();
    let mut covered: HashSet<u64> = HashSet::new();

    for cm in input.campaign_markers {
        if !visible_campaigns.contains(&cm.campaign_id) {
            continue;
        }
        covered.insert(cm.marker_id);
        markers.push(campaign_marker(cm, input.registry));
    }

    if input.show_base_markers {
        for location in input.locations {
            if covered.contains(&location.id) {
                continue;
            }
            markers.push(base_marker(location, input.statuses));
        }
    }

    markers.retain(|m| input.city_filter.should_show(&m.name));

    let stats = MapStats::from_markers(&markers);
    RenderPlan { markers, stats }
}

fn campaign_marker(cm: &CampaignMarker, registry: &CampaignRegistry) -> RenderableMarker {
    let color = if cm.visited {
        MarkerColor::VISITED
    } else {
        registry.color_of(&cm.campaign_id)
    };

    let campaign_popup = registry.get(&cm.campaign_id).map(|c| CampaignPopup {
        name: c.name.clone(),
        description: c.description.clone(),
        start_date: format_campaign_date(cm.start_date),
        end_date: format_campaign_date(cm.end_date),
    });

    RenderableMarker {
        location_id: cm.marker_id,
        campaign_id: Some(cm.campaign_id.clone()),
        name: cm.name.clone(),
        lat: cm.lat,
        lng: cm.lng,
        color,
        shape: AdType::classify(&cm.name).shape(),
        visited: cm.visited,
        popup: PopupSpec {
            title: cm.name.clone(),
            visited: cm.visited,
            visited_on: cm.visited_at.map(format_visit_timestamp),
            campaign: campaign_popup,
        },
    }
}

fn base_marker(location: &Location, statuses: &StatusStore) -> RenderableMarker {
    let visited = statuses.is_visited(location.id);
    let color = if visited {
        MarkerColor::VISITED
    } else {
        MarkerColor::UNSEEN
    };

    RenderableMarker {
        location_id: location.id,
        campaign_id: None,
        name: location.name.clone(),
        lat: location.lat,
        lng: location.lng,
        color,
        shape: AdType::classify(&location.name).shape(),
        visited,
        popup: PopupSpec {
            title: location.name.clone(),
            visited,
            visited_on: statuses.visited_at(location.id).map(format_visit_timestamp),
            campaign: None,
        },
    }
}
