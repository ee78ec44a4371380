// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Base location model and per-location visit status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A base map location, independent of any campaign.
///
/// Immutable once fetched; the whole set is replaced on a manual refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Stable upstream id
    pub id: u64,
    /// Display name, e.g. "Keskusta Jyväskylä Kauppakatu 1"
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// The "has been visited" fact for one location.
///
/// Invariant: `visited_at` is set exactly when `visited` is true. Use the
/// constructors to keep the two fields in step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitStatus {
    pub visited: bool,
    pub visited_at: Option<DateTime<Utc>>,
}

impl VisitStatus {
    /// Status for a location visited at `now`.
    pub fn visited(now: DateTime<Utc>) -> Self {
        Self {
            visited: true,
            visited_at: Some(now),
        }
    }

    /// Status for a location never visited (or un-visited).
    pub fn not_visited() -> Self {
        Self {
            visited: false,
            visited_at: None,
        }
    }
}

impl Default for VisitStatus {
    fn default() -> Self {
        Self::not_visited()
    }
}
