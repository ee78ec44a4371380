// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod campaign;
pub mod location;
pub mod marker;
pub mod prefs;
pub mod stats;

pub use campaign::{Campaign, CampaignMarker, MarkerColor};
pub use location::{Location, VisitStatus};
pub use marker::{AdType, MarkerShape, PopupSpec, RenderableMarker};
pub use prefs::{MapView, Preferences};
pub use stats::MapStats;
