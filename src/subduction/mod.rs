//! Subduction zone tests.
//!
//! Compares an event's tensor and depth against the local slab interface:
//! whether the tensor looks like interface thrusting, whether the depth is
//! close to the interface, and whether the event sits inside the slab.

mod classifier;
mod config;

pub use classifier::{reference_azimuths, SubductionFlags, SubductionZoneClassifier, SLAB_RAKE};
pub use config::SubductionConfig;
