// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! In-memory tracker state and its mutations.
//!
//! One `MapState` holds everything the reconciler reads. All mutation
//! happens through the methods here, under the caller's write lock, so
//! each operation is observed whole; campaign removal in particular
//! drops a campaign's markers and metadata together or not at all.

use chrono::{DateTime, Utc};

use crate::db::PersistedState;
use crate::models::{CampaignMarker, Location, Preferences};
use crate::services::{
    extract_cities, reconcile, CampaignFetch, CampaignRegistry, CityFilter, ImportedState,
    ReconcileInput, RenderPlan, StatusStore,
};

/// Mutable application state behind `AppState`'s lock.
#[derive(Debug, Clone, Default)]
pub struct MapState {
    pub locations: Vec<Location>,
    pub campaign_markers: Vec<CampaignMarker>,
    pub statuses: StatusStore,
    pub registry: CampaignRegistry,
    pub city_filter: CityFilter,
    pub prefs: Preferences,
}

impl MapState {
    /// Restore from a persisted snapshot.
    pub fn from_persisted(persisted: PersistedState) -> Self {
        Self {
            locations: persisted.locations,
            campaign_markers: persisted.campaign_markers,
            statuses: StatusStore::from_entries(persisted.statuses),
            registry: CampaignRegistry::from_campaigns(persisted.campaigns),
            city_filter: CityFilter::new(),
            prefs: persisted.prefs,
        }
    }

    /// Snapshot for persistence.
    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            locations: self.locations.clone(),
            campaign_markers: self.campaign_markers.clone(),
            statuses: self.statuses.entries().clone(),
            campaigns: self.registry.campaigns(),
            prefs: self.prefs.clone(),
        }
    }

    /// Run the reconciler over the current state.
    pub fn render_plan(&self) -> RenderPlan {
        reconcile(&ReconcileInput {
            locations: &self.locations,
            campaign_markers: &self.campaign_markers,
            statuses: &self.statuses,
            registry: &self.registry,
            city_filter: &self.city_filter,
            show_base_markers: self.prefs.show_base_markers,
        })
    }

    /// Replace the base location set wholesale (manual refresh).
    pub fn replace_locations(&mut self, locations: Vec<Location>) {
        self.locations = locations;
    }

    /// Cities derivable from the current location set.
    pub fn cities(&self) -> Vec<String> {
        extract_cities(&self.locations)
    }

    /// Install a fetched campaign overlay, replacing any previous markers
    /// under the same id.
    pub fn install_campaign(&mut self, campaign_id: &str, fetch: CampaignFetch) {
        self.registry
            .add_or_update(campaign_id, &fetch.name, &fetch.description);
        self.campaign_markers
            .retain(|m| m.campaign_id != campaign_id);
        self.campaign_markers.extend(fetch.markers);
    }

    /// Remove a campaign: markers and metadata together.
    ///
    /// Returns false when the campaign was never loaded.
    pub fn remove_campaign(&mut self, campaign_id: &str) -> bool {
        if !self.registry.remove(campaign_id) {
            return false;
        }
        self.campaign_markers
            .retain(|m| m.campaign_id != campaign_id);
        true
    }

    /// Remove every campaign overlay.
    pub fn clear_campaigns(&mut self) {
        self.registry.clear();
        self.campaign_markers.clear();
    }

    /// Toggle the visited flag of one campaign marker, identified by
    /// `(campaign_id, marker_id)`. Independent of the global status for
    /// the same id, by the per-campaign independence rule.
    pub fn set_campaign_marker_status(
        &mut self,
        campaign_id: &str,
        marker_id: u64,
        visited: bool,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(marker) = self
            .campaign_markers
            .iter_mut()
            .find(|m| m.campaign_id == campaign_id && m.marker_id == marker_id)
        else {
            return false;
        };
        marker.visited = visited;
        marker.visited_at = visited.then_some(now);
        true
    }

    /// Replace the whole state with an imported file (destructive).
    /// Preferences survive; the city filter resets with the new data.
    pub fn apply_import(&mut self, imported: ImportedState) {
        self.locations = imported.locations;
        self.campaign_markers = imported.campaign_markers;
        self.statuses = StatusStore::from_entries(imported.statuses);
        self.registry = CampaignRegistry::from_campaigns(imported.campaigns);
        self.city_filter = CityFilter::new();

        // Markers of campaigns the file had no metadata for still need
        // registry entries, or they would render in the fallback color
        // and be impossible to toggle.
        let known: std::collections::HashSet<String> = self
            .registry
            .campaigns()
            .into_iter()
            .map(|c| c.campaign_id)
            .collect();
        let mut missing: Vec<String> = self
            .campaign_markers
            .iter()
            .map(|m| m.campaign_id.clone())
            .filter(|id| !known.contains(id))
            .collect();
        missing.sort();
        missing.dedup();
        for id in missing {
            self.registry.add_or_update(&id, &id, "");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fetch_with_markers(campaign_id: &str, ids: &[u64]) -> CampaignFetch {
        CampaignFetch {
            name: "Yritys Oy".to_string(),
            description: String::new(),
            markers: ids
                .iter()
                .map(|&id| CampaignMarker {
                    campaign_id: campaign_id.to_string(),
                    marker_id: id,
                    name: format!("Paikka Jyväskylä {}", id),
                    lat: 62.0,
                    lng: 25.0,
                    start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                    visited: false,
                    visited_at: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_remove_campaign_is_atomic() {
        let mut state = MapState::default();
        state.install_campaign("a", fetch_with_markers("a", &[1, 2]));
        state.install_campaign("b", fetch_with_markers("b", &[3]));

        assert!(state.remove_campaign("a"));

        // Combined postcondition: no markers for "a" and no metadata
        assert!(!state.campaign_markers.iter().any(|m| m.campaign_id == "a"));
        assert!(!state.registry.contains("a"));
        // Neighbor untouched
        assert_eq!(state.campaign_markers.len(), 1);
        assert!(state.registry.contains("b"));
    }

    #[test]
    fn test_remove_unknown_campaign_is_noop() {
        let mut state = MapState::default();
        state.install_campaign("a", fetch_with_markers("a", &[1]));
        assert!(!state.remove_campaign("nope"));
        assert_eq!(state.campaign_markers.len(), 1);
    }

    #[test]
    fn test_reinstall_replaces_markers_keeps_color() {
        let mut state = MapState::default();
        state.install_campaign("a", fetch_with_markers("a", &[1, 2]));
        let color = state.registry.color_of("a");

        state.install_campaign("a", fetch_with_markers("a", &[5]));

        assert_eq!(state.campaign_markers.len(), 1);
        assert_eq!(state.campaign_markers[0].marker_id, 5);
        assert_eq!(state.registry.color_of("a"), color);
    }

    #[test]
    fn test_campaign_marker_status_independent_per_campaign() {
        let mut state = MapState::default();
        state.install_campaign("a", fetch_with_markers("a", &[1]));
        state.install_campaign("b", fetch_with_markers("b", &[1]));

        assert!(state.set_campaign_marker_status("a", 1, true, Utc::now()));

        let a = state
            .campaign_markers
            .iter()
            .find(|m| m.campaign_id == "a")
            .unwrap();
        let b = state
            .campaign_markers
            .iter()
            .find(|m| m.campaign_id == "b")
            .unwrap();
        assert!(a.visited && a.visited_at.is_some());
        assert!(!b.visited && b.visited_at.is_none());
        // Global status untouched either
        assert!(!state.statuses.is_visited(1));
    }

    #[test]
    fn test_import_rebuilds_registry_for_unknown_campaigns() {
        let mut state = MapState::default();
        let markers = fetch_with_markers("ghost", &[9]).markers;
        state.apply_import(ImportedState {
            locations: vec![],
            campaign_markers: markers,
            statuses: Default::default(),
            campaigns: vec![],
        });

        assert!(state.registry.contains("ghost"));
        assert!(state.registry.get("ghost").unwrap().visible);
    }
}
