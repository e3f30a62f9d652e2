//! Inputs and outputs of a classification.

use serde::{Deserialize, Serialize};

use crate::regions::{CrustType, DepthBand, RegionDistances, TectonicDomain, TectonicRegion, TectonicSubtype};
use crate::slab::SlabSurfaceSample;
use crate::subduction::SubductionFlags;
use crate::tensor::{FocalMechanism, MomentTensor, TensorComponents};

/// An earthquake location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypocenter {
    pub lat: f64,
    pub lon: f64,
    /// Depth in km, positive down.
    pub depth: f64,
    pub magnitude: f64,
    /// Origin time, ISO 8601.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl Hypocenter {
    pub fn new(lat: f64, lon: f64, depth: f64, magnitude: f64) -> Self {
        Self {
            lat,
            lon,
            depth,
            magnitude,
            time: None,
        }
    }

    /// Copy with negative depths raised to the surface.
    pub fn pinned(&self) -> Self {
        let mut h = self.clone();
        if h.depth < 0.0 {
            h.depth = 0.0;
        }
        h
    }
}

/// One event of a batch: a hypocenter with an optional tensor or event ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInput {
    #[serde(flatten)]
    pub hypocenter: Hypocenter,
    #[serde(default)]
    pub tensor: Option<TensorComponents>,
    #[serde(default)]
    pub event_id: Option<String>,
}

/// Where the tensor used for a classification came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TensorType {
    /// A solution supplied by the caller or fetched by event ID.
    Actual { source: Option<String>, kind: Option<String> },
    /// Averaged from nearby historical events.
    Composite,
    /// No tensor was available.
    None,
}

impl TensorType {
    pub fn actual(tensor: &MomentTensor) -> Self {
        TensorType::Actual {
            source: tensor.source.clone(),
            kind: tensor.kind.clone(),
        }
    }
}

/// Complete classification of one hypocenter.
#[derive(Debug, Clone, Serialize)]
pub struct TectonicAssessment {
    /// The hypocenter as classified, with negative depths pinned to 0.
    pub hypocenter: Hypocenter,
    pub region: TectonicRegion,
    pub domain: TectonicDomain,
    pub subtype: TectonicSubtype,
    pub focal_mechanism: FocalMechanism,
    pub tensor_type: TensorType,
    pub tensor: Option<MomentTensor>,
    /// Rotation between NP1 and the slab interface; NaN without both.
    pub kagan_angle: f64,
    pub composite_variability: f64,
    pub composite_count: usize,
    pub distances: RegionDistances,
    pub crust: CrustType,
    pub distance_to_oceanic: f64,
    pub distance_to_continental: f64,
    pub has_backarc: bool,
    pub depth_bands: [DepthBand; 3],
    pub slab: Option<SlabSurfaceSample>,
    pub slab_region_name: Option<String>,
    /// Set only when the subduction tests ran.
    pub subduction: Option<SubductionFlags>,
    pub warnings: Vec<String>,
}

impl TectonicAssessment {
    pub fn is_oceanic(&self) -> bool {
        self.crust == CrustType::Oceanic
    }

    /// Warnings joined into one comma-separated string.
    pub fn warning(&self) -> String {
        self.warnings.join(",")
    }
}
