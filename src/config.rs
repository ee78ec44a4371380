//! Application configuration loaded from environment variables.
//!
//! Everything has a local-dev default except nothing: the tracker can
//! start with no environment at all and talk to the public Atlas API.

use std::env;
use std::path::PathBuf;

/// Default upstream API root (the public Atlas Media map endpoints).
const DEFAULT_API_BASE_URL: &str = "https://atlasmedia.mediani.fi/api/v1";

/// Marker group served by the public map-point listing.
const DEFAULT_MARKER_GROUP_ID: &str = "100";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream Atlas API base URL (no trailing slash)
    pub api_base_url: String,
    /// Marker group id for the base location listing
    pub marker_group_id: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Path of the JSON state snapshot
    pub data_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_base_url: env::var("ATLAS_API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            marker_group_id: env::var("ATLAS_MARKER_GROUP_ID")
                .unwrap_or_else(|_| DEFAULT_MARKER_GROUP_ID.to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
            data_path: env::var("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/tracker-state.json")),
        })
    }

    /// Default config for tests: never touches the network or disk paths
    /// that matter.
    pub fn test_default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:0".to_string(),
            marker_group_id: "100".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            data_path: PathBuf::from("test-state.json"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
