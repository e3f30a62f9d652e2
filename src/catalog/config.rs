//! Configuration for composite tensor estimation.

use serde::{Deserialize, Serialize};

/// Search parameters for building a composite moment tensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeConfig {
    /// Half-width of the first search box (degrees).
    pub initial_half_width: f64,
    /// Amount the half-width grows after each unsuccessful search (degrees).
    pub half_width_increment: f64,
    /// Largest half-width that will be searched (degrees).
    pub max_half_width: f64,
    /// Number of events needed to stop widening the search.
    pub min_events: usize,
    /// Optional half-height of a depth window (km). `None` ignores depth.
    pub depth_window_km: Option<f64>,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            initial_half_width: 0.5,
            half_width_increment: 0.1,
            max_half_width: 1.0,
            min_events: 3,
            depth_window_km: None,
        }
    }
}

impl CompositeConfig {
    /// Creates a configuration that only accepts events within a depth window.
    pub fn with_depth_window(depth_window_km: f64) -> Self {
        Self {
            depth_window_km: Some(depth_window_km),
            ..Default::default()
        }
    }
}
