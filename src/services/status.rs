// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Visit status store for base locations.
//!
//! The only mutable source of truth for "visited". Campaign markers carry
//! their own independent visited flags; nothing here writes through to
//! them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::VisitStatus;

/// Per-location visited flags with timestamps. Absence means not visited.
#[derive(Debug, Clone, Default)]
pub struct StatusStore {
    entries: HashMap<u64, VisitStatus>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted map.
    pub fn from_entries(entries: HashMap<u64, VisitStatus>) -> Self {
        Self { entries }
    }

    pub fn is_visited(&self, location_id: u64) -> bool {
        self.entries
            .get(&location_id)
            .map(|s| s.visited)
            .unwrap_or(false)
    }

    pub fn visited_at(&self, location_id: u64) -> Option<DateTime<Utc>> {
        self.entries.get(&location_id).and_then(|s| s.visited_at)
    }

    /// Set the visited flag. The timestamp is set to `now` on a transition
    /// to visited and cleared on a transition back; `now` is injected so
    /// callers (and tests) control the clock.
    pub fn set(&mut self, location_id: u64, visited: bool, now: DateTime<Utc>) {
        let status = if visited {
            VisitStatus::visited(now)
        } else {
            VisitStatus::not_visited()
        };
        self.entries.insert(location_id, status);
    }

    /// Snapshot for persistence.
    pub fn entries(&self) -> &HashMap<u64, VisitStatus> {
        &self.entries
    }
}
