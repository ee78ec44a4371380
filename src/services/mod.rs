// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod atlas;
pub mod city;
pub mod reconciler;
pub mod registry;
pub mod status;
pub mod transfer;

pub use atlas::{AtlasClient, CampaignFetch};
pub use city::{extract_cities, CityFilter};
pub use reconciler::{reconcile, ReconcileInput, RenderPlan};
pub use registry::CampaignRegistry;
pub use status::StatusStore;
pub use transfer::{ExportFile, ImportedState};
