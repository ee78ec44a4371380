//! Visit statistics derived from a render plan.
//!
//! Counts describe what is actually drawn: markers removed by the city
//! filter or a disabled toggle are not part of any figure.

use serde::{Deserialize, Serialize};

use crate::models::RenderableMarker;

/// Aggregate figures for the statistics panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapStats {
    /// Markers rendered this pass
    pub total: u32,
    /// Rendered markers whose effective visited flag is set
    pub visited: u32,
    pub not_visited: u32,
    /// round(visited / total * 100); 0 when nothing is rendered
    pub progress_percent: u8,
}

impl MapStats {
    /// Derive statistics from the markers of one reconciliation pass.
    pub fn from_markers(markers: &[RenderableMarker]) -> Self {
        let total = markers.len() as u32;
        let visited = markers.iter().filter(|m| m.visited).count() as u32;
        let not_visited = total - visited;
        let progress_percent = if total > 0 {
            ((f64::from(visited) / f64::from(total)) * 100.0).round() as u8
        } else {
            0
        };

        Self {
            total,
            visited,
            not_visited,
            progress_percent,
        }
    }
}
