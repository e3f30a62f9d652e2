//! Subtype decision table for events inside subduction domains.
//!
//! The table is keyed by depth zone, the kind of tensor evidence available
//! and the three subduction flags. Rows are matched top to bottom.

use serde::{Deserialize, Serialize};

use crate::regions::TectonicSubtype;
use crate::subduction::SubductionFlags;
use crate::tensor::FocalMechanism;

pub const WARNING_NO_FOCAL_MECHANISM: &str = "No focal mechanism available";
pub const WARNING_NEAR_BELOW_INTERFACE: &str = "Event near/below interface";
pub const WARNING_ABOVE_INTERFACE: &str = "Event above interface";

/// Depth of an event relative to its domain's first two depth bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthZone {
    Shallow,
    Medium,
    Deep,
}

impl DepthZone {
    /// Shallow down to `h1` inclusive, medium down to `h2` inclusive, deep below.
    pub fn from_depth(depth: f64, h1: f64, h2: f64) -> Self {
        if depth <= h1 {
            DepthZone::Shallow
        } else if depth <= h2 {
            DepthZone::Medium
        } else {
            DepthZone::Deep
        }
    }
}

/// What the tensor tells the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TensorEvidence {
    /// A tensor classified as reverse faulting.
    Reverse,
    /// A tensor with any other mechanism.
    Other,
    /// No tensor at all.
    Missing,
}

impl TensorEvidence {
    pub fn new(mechanism: FocalMechanism, has_tensor: bool) -> Self {
        match (has_tensor, mechanism) {
            (false, _) => TensorEvidence::Missing,
            (true, FocalMechanism::RS) => TensorEvidence::Reverse,
            (true, _) => TensorEvidence::Other,
        }
    }
}

/// Subtype chosen by the table and the warning attached to it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegimeDecision {
    pub subtype: TectonicSubtype,
    pub warning: Option<&'static str>,
}

impl RegimeDecision {
    const fn new(subtype: TectonicSubtype, warning: Option<&'static str>) -> Self {
        Self { subtype, warning }
    }
}

/// Looks up the subtype for an event inside a subduction domain.
///
/// In the shallow zone an event inside the slab that does not look like
/// interface slip is treated as crustal; in the medium zone it is intraslab.
/// Every deep event is intraslab.
pub fn decide(zone: DepthZone, evidence: TensorEvidence, flags: SubductionFlags) -> RegimeDecision {
    use DepthZone::*;
    use TectonicSubtype::*;
    use TensorEvidence::*;

    let SubductionFlags {
        interface_like,
        near_interface,
        in_slab,
    } = flags;

    match (zone, evidence, interface_like, near_interface, in_slab) {
        (Deep, _, _, _, true) => RegimeDecision::new(SZIntra, None),
        (Deep, _, _, _, false) => RegimeDecision::new(SZIntra, Some(WARNING_ABOVE_INTERFACE)),
        (_, Reverse, true, true, _) => RegimeDecision::new(SZInter, None),
        (_, Missing, _, true, _) => RegimeDecision::new(SZInter, Some(WARNING_NO_FOCAL_MECHANISM)),
        (Shallow, _, _, _, true) => RegimeDecision::new(ACR, Some(WARNING_NEAR_BELOW_INTERFACE)),
        (Medium, _, _, _, true) => RegimeDecision::new(SZIntra, None),
        (_, _, _, _, false) => RegimeDecision::new(ACR, None),
    }
}
