//! Configuration for subduction zone tests.

use serde::{Deserialize, Serialize};

/// Tolerances for comparing an event against local slab geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubductionConfig {
    /// Half-width (degrees) of the P-axis azimuth band around the slab reference azimuth.
    pub dstrike_interf: f64,
    /// Half-width (degrees) of the P-axis plunge band around the slab dip.
    pub ddip_interf: f64,
    /// Half-width (degrees) of the rake band around pure reverse slip.
    pub dlambda: f64,
    /// Depth tolerance (km) around the interface.
    pub ddepth_interf: f64,
    /// Depth tolerance (km) above the interface for intraslab events.
    pub ddepth_intra: f64,
}

impl Default for SubductionConfig {
    fn default() -> Self {
        Self {
            dstrike_interf: 30.0,
            ddip_interf: 30.0,
            dlambda: 60.0,
            ddepth_interf: 20.0,
            ddepth_intra: 10.0,
        }
    }
}
