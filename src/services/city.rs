// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! City filter derived from location names.
//!
//! Upstream names follow "<site> <city> <street...>", so the second
//! whitespace token is the city. There is no city field on the API;
//! this derivation is all we have.

use crate::models::Location;

/// The currently selected city filter. Empty selection means "show all".
#[derive(Debug, Clone, Default)]
pub struct CityFilter {
    /// Lowercased selected city
    selected: Option<String>,
}

impl CityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a city (case-insensitive) or clear the filter with `None`
    /// or an empty string.
    pub fn set_selected(&mut self, city: Option<String>) {
        self.selected = city
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty());
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Whether a marker with this name passes the filter.
    ///
    /// With a filter active, a single-word name can never match.
    pub fn should_show(&self, name: &str) -> bool {
        match &self.selected {
            None => true,
            Some(city) => city_of(name).as_deref() == Some(city.as_str()),
        }
    }
}

/// Lowercased city token of a location name, if it has one.
fn city_of(name: &str) -> Option<String> {
    name.split_whitespace()
        .nth(1)
        .map(|token| token.to_lowercase())
}

/// Distinct cities across the location set: capitalized, sorted, deduped.
/// Recomputed whenever the location set changes.
pub fn extract_cities(locations: &[Location]) -> Vec<String> {
    let mut cities: Vec<String> = locations
        .iter()
        .filter_map(|l| city_of(&l.name))
        .map(|c| capitalize(&c))
        .collect();
    cities.sort();
    cities.dedup();
    cities
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
