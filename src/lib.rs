// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Atlas-Tracker: track visits to outdoor advertising locations.
//!
//! This crate provides the backend API for a map frontend: it fetches the
//! base marker set and campaign overlays from the Atlas Media API, keeps
//! visit statuses and preferences, and serves fully-resolved render plans.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod time_utils;

use std::sync::RwLock;

use config::Config;
use db::JsonDb;
use services::AtlasClient;
use state::MapState;

/// Shared application state.
///
/// `map` is the single mutable state; handlers take the lock for the
/// whole synchronous mutation and never hold it across an await.
pub struct AppState {
    pub config: Config,
    pub db: JsonDb,
    pub atlas: AtlasClient,
    pub map: RwLock<MapState>,
}
