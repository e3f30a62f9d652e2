//! Configuration for slab geometry resolution.

use serde::{Deserialize, Serialize};

/// Defaults applied when slab data does not carry a value itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlabConfig {
    /// Interface dip (degrees) assumed near a trench outside grid coverage.
    pub default_trench_dip: f64,
    /// Depth uncertainty (km) when a grid has no uncertainty surface.
    pub default_depth_uncertainty: f64,
    /// Maximum interface depth (km) for regions missing from the side table.
    pub default_max_interface_depth: f64,
    /// Trench vertices farther than this (km) are ignored.
    pub trench_search_radius_km: f64,
}

impl Default for SlabConfig {
    fn default() -> Self {
        Self {
            default_trench_dip: 17.0,
            default_depth_uncertainty: 10.0,
            default_max_interface_depth: 70.0,
            trench_search_radius_km: 500.0,
        }
    }
}
