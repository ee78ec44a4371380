// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Campaign metadata registry with first-come color assignment.

use std::collections::{HashMap, HashSet};

use crate::models::campaign::CAMPAIGN_PALETTE;
use crate::models::{Campaign, MarkerColor};

/// Holds metadata for every loaded campaign, keyed by campaign id.
///
/// Colors come from a fixed rotation of 20: the Nth distinct campaign ever
/// registered gets palette slot N mod 20, so the 21st reuses the 1st's
/// color. The counter survives removals; a re-added campaign is a new
/// campaign and draws a fresh slot.
#[derive(Debug, Clone, Default)]
pub struct CampaignRegistry {
    campaigns: HashMap<String, Campaign>,
    assigned_colors: usize,
}

impl CampaignRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted metadata, keeping the rotation position past
    /// everything already assigned.
    pub fn from_campaigns(campaigns: Vec<Campaign>) -> Self {
        let assigned_colors = campaigns.len();
        Self {
            campaigns: campaigns
                .into_iter()
                .map(|c| (c.campaign_id.clone(), c))
                .collect(),
            assigned_colors,
        }
    }

    /// Register a campaign or refresh its metadata.
    ///
    /// A new id gets the next palette color and starts visible. A known id
    /// keeps its color and visibility; only name and description change.
    pub fn add_or_update(&mut self, campaign_id: &str, name: &str, description: &str) {
        match self.campaigns.get_mut(campaign_id) {
            Some(existing) => {
                existing.name = name.to_string();
                existing.description = description.to_string();
            }
            None => {
                let color = CAMPAIGN_PALETTE[self.assigned_colors % CAMPAIGN_PALETTE.len()];
                self.assigned_colors += 1;
                self.campaigns.insert(
                    campaign_id.to_string(),
                    Campaign {
                        campaign_id: campaign_id.to_string(),
                        name: name.to_string(),
                        description: description.to_string(),
                        color,
                        visible: true,
                    },
                );
            }
        }
    }

    /// Delete metadata. The caller owns the matching marker deletion (see
    /// `MapState::remove_campaign`).
    pub fn remove(&mut self, campaign_id: &str) -> bool {
        self.campaigns.remove(campaign_id).is_some()
    }

    pub fn clear(&mut self) {
        self.campaigns.clear();
    }

    pub fn set_visible(&mut self, campaign_id: &str, visible: bool) -> bool {
        match self.campaigns.get_mut(campaign_id) {
            Some(c) => {
                c.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, campaign_id: &str) -> bool {
        self.campaigns.contains_key(campaign_id)
    }

    pub fn get(&self, campaign_id: &str) -> Option<&Campaign> {
        self.campaigns.get(campaign_id)
    }

    /// Ids of campaigns whose markers are currently drawn.
    pub fn visible_ids(&self) -> HashSet<String> {
        self.campaigns
            .values()
            .filter(|c| c.visible)
            .map(|c| c.campaign_id.clone())
            .collect()
    }

    /// Assigned color, falling back to the reserved default for unknown
    /// ids; the reconciler never sees an absent color.
    pub fn color_of(&self, campaign_id: &str) -> MarkerColor {
        self.campaigns
            .get(campaign_id)
            .map(|c| c.color)
            .unwrap_or(MarkerColor::UNSEEN)
    }

    /// All campaign metadata, for listings and persistence.
    pub fn campaigns(&self) -> Vec<Campaign> {
        let mut list: Vec<Campaign> = self.campaigns.values().cloned().collect();
        list.sort_by(|a, b| a.campaign_id.cmp(&b.campaign_id));
        list
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }
}
