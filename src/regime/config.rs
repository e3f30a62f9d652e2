//! Aggregate configuration for the classification engine.

use serde::{Deserialize, Serialize};

use crate::catalog::CompositeConfig;
use crate::regions::RegionConfig;
use crate::remote::RemoteConfig;
use crate::slab::SlabConfig;
use crate::subduction::SubductionConfig;
use crate::tensor::FocalMechanismConfig;

/// Every tunable used during classification.
///
/// Each section falls back to its defaults when omitted from JSON, so a
/// partial file only needs the values it changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrecConfig {
    pub composite: CompositeConfig,
    pub focal_mechanism: FocalMechanismConfig,
    pub subduction: SubductionConfig,
    pub slab: SlabConfig,
    pub region: RegionConfig,
    pub remote: RemoteConfig,
}

impl StrecConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
