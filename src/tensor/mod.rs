//! Moment tensor mathematics.
//!
//! This module provides:
//! - Tensor construction from six components or from a fault plane
//! - Eigen-decomposition into canonical T/N/P axes and both nodal planes
//! - Kagan angle between double-couple orientations
//! - Focal mechanism classification from axis plunges

mod config;
mod moment;
mod kagan;
mod mechanism;

pub use config::FocalMechanismConfig;
pub use moment::{
    MomentTensor, TensorComponents, PrincipalAxis, NodalPlane, Decomposition,
    build_tensor, components_of, decompose, plane_to_tensor, auxiliary_plane,
};
pub use kagan::{kagan_angle, kagan_angle_between};
pub use mechanism::FocalMechanism;
