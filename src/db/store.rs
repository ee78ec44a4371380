// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON snapshot store, the durable side of the tracker.
//!
//! The browser original kept its state in localStorage; here it is one
//! JSON document on disk, rewritten whole after each mutation. Reads
//! degrade to "nothing persisted" with a warning; writes go through a
//! temp file + rename so a crash never leaves a half-written snapshot.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Campaign, CampaignMarker, Location, Preferences, VisitStatus};

/// Everything the tracker persists, as one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub campaign_markers: Vec<CampaignMarker>,
    #[serde(default)]
    pub statuses: HashMap<u64, VisitStatus>,
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
    #[serde(default)]
    pub prefs: Preferences,
}

/// Snapshot store client. `new_mock()` gives an offline store for tests:
/// loads nothing, writes nowhere, never fails.
#[derive(Clone)]
pub struct JsonDb {
    path: Option<PathBuf>,
}

impl JsonDb {
    /// Open a store at the given path, creating parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Storage(format!("create {}: {}", parent.display(), e)))?;
        }
        tracing::info!(path = %path.display(), "Opened state store");
        Ok(Self { path: Some(path) })
    }

    /// In-memory mock store for tests (offline mode).
    pub fn new_mock() -> Self {
        Self { path: None }
    }

    /// Load the persisted snapshot, if any.
    ///
    /// A missing file is a normal first run. An unreadable or unparseable
    /// file is logged and treated as empty; persistence failures must
    /// not take the tracker down.
    pub fn load(&self) -> Option<PersistedState> {
        let path = self.path.as_ref()?;
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read state file");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Corrupt state file ignored");
                None
            }
        }
    }

    /// Write the snapshot. Atomic per call: the new content lands under a
    /// temp name and is renamed over the old file.
    pub fn save(&self, state: &PersistedState) -> Result<(), AppError> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| AppError::Storage(format!("serialize state: {}", e)))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| AppError::Storage(format!("write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, path)
            .map_err(|e| AppError::Storage(format!("rename {}: {}", path.display(), e)))?;
        Ok(())
    }
}
