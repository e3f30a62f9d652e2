//! Configuration for spatial regionalization.

use serde::{Deserialize, Serialize};

use crate::geometry::BoundaryDistance;

/// Parameters for region layer queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// How distances to unmatched layers are measured.
    pub boundary_distance: BoundaryDistance,
}

impl RegionConfig {
    /// Measures distances to the nearest point on polygon edges.
    pub fn segment_distances() -> Self {
        Self {
            boundary_distance: BoundaryDistance::Segment,
        }
    }
}
