//! Geometric tests of an event against the local subduction interface.

use serde::{Deserialize, Serialize};

use crate::geometry::normalize_azimuth;
use crate::slab::{SlabSource, SlabSurfaceSample};
use crate::tensor::{MomentTensor, NodalPlane, PrincipalAxis};

use super::config::SubductionConfig;

/// Rake assumed for slip on a subduction interface.
pub const SLAB_RAKE: f64 = 90.0;

/// Outcome of the three subduction tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubductionFlags {
    /// Tensor orientation matches thrusting on the interface.
    pub interface_like: bool,
    /// Depth is within tolerance of the interface.
    pub near_interface: bool,
    /// Depth is below the interface and below the shallow regime.
    pub in_slab: bool,
}

/// Azimuths the P axis is compared against for a slab sample.
///
/// Grid strikes follow the right-hand rule, so the P axis of interface
/// thrusting points 90 degrees anticlockwise of strike. A trench strike does
/// not fix the dip direction, so both perpendiculars are accepted.
pub fn reference_azimuths(slab: &SlabSurfaceSample) -> Vec<f64> {
    match slab.source {
        SlabSource::Grid(_) => vec![slab.strike - 90.0],
        SlabSource::Trench(_) => vec![slab.strike - 90.0, slab.strike + 90.0],
    }
}

/// Whether azimuth `a` lies within `half_width` of `reference`, with bounds
/// moved across north when `a` sits on the other side of it.
fn azimuth_in_band(a: f64, reference: f64, half_width: f64) -> bool {
    let center = normalize_azimuth(reference);
    let mut lo = center - half_width;
    let mut hi = center + half_width;
    for b in [&mut lo, &mut hi] {
        if a > 270.0 && *b < 90.0 {
            *b += 360.0;
        } else if a < 90.0 && *b > 270.0 {
            *b -= 360.0;
        }
    }
    a >= lo && a <= hi
}

/// Applies the interface, depth and intraslab tests with fixed tolerances.
#[derive(Debug, Clone, Default)]
pub struct SubductionZoneClassifier {
    config: SubductionConfig,
}

impl SubductionZoneClassifier {
    pub fn new(config: SubductionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SubductionConfig {
        &self.config
    }

    /// All three tests. `shallow_limit` is the lower bound of the shallow
    /// depth band of the event's domain.
    pub fn classify(
        &self,
        tensor: Option<&MomentTensor>,
        slab: &SlabSurfaceSample,
        depth: f64,
        shallow_limit: f64,
    ) -> SubductionFlags {
        SubductionFlags {
            interface_like: tensor.is_some_and(|t| self.is_rupture_plane_like_interface(&t.p, &t.np1, &t.np2, slab)),
            near_interface: self.is_near_interface_depth(depth, slab.depth),
            in_slab: self.is_in_slab(depth, slab.depth, shallow_limit),
        }
    }

    /// P axis azimuth and plunge match the slab, and one nodal plane has
    /// near-reverse rake.
    pub fn is_rupture_plane_like_interface(
        &self,
        p_axis: &PrincipalAxis,
        np1: &NodalPlane,
        np2: &NodalPlane,
        slab: &SlabSurfaceSample,
    ) -> bool {
        let azimuth_ok = reference_azimuths(slab)
            .into_iter()
            .any(|r| azimuth_in_band(p_axis.azimuth, r, self.config.dstrike_interf));
        let plunge_ok = p_axis.plunge >= slab.dip - self.config.ddip_interf
            && p_axis.plunge <= slab.dip + self.config.ddip_interf;
        let rake_ok = |plane: &NodalPlane| {
            plane.rake > SLAB_RAKE - self.config.dlambda && plane.rake < SLAB_RAKE + self.config.dlambda
        };
        azimuth_ok && plunge_ok && (rake_ok(np1) || rake_ok(np2))
    }

    /// Depth within tolerance of the interface; the lower bound is inclusive,
    /// the upper exclusive.
    pub fn is_near_interface_depth(&self, depth: f64, slab_depth: f64) -> bool {
        depth >= slab_depth - self.config.ddepth_interf && depth < slab_depth + self.config.ddepth_interf
    }

    pub fn is_in_slab(&self, depth: f64, slab_depth: f64, shallow_limit: f64) -> bool {
        depth >= slab_depth - self.config.ddepth_intra && depth >= shallow_limit
    }
}
