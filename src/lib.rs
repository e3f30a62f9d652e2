//! Seismotectonic regime classification of earthquake hypocenters.
//!
//! Given a hypocenter and optionally a moment tensor, this crate assigns a
//! tectonic region and subtype using global region polygons, subduction slab
//! geometry grids, trench lines and a catalog of historical moment tensors.

pub mod geometry;
pub mod tensor;
pub mod catalog;
pub mod regions;
pub mod slab;
pub mod subduction;
pub mod remote;
pub mod regime;
pub mod store;

#[cfg(test)]
pub(crate) mod fixtures;

pub use geometry::LatLon;
pub use tensor::{FocalMechanism, MomentTensor, TensorComponents};
pub use catalog::{CompositeConfig, CompositeEstimator, MemoryCatalog};
pub use regions::{Regionalizer, TectonicDomain, TectonicRegion, TectonicSubtype};
pub use slab::{SlabGeometryResolver, SlabSurfaceSample};
pub use subduction::{SubductionFlags, SubductionZoneClassifier};
pub use remote::ComcatClient;
pub use regime::{ClassifyError, EventInput, Hypocenter, RegimeEngine, StrecConfig, TectonicAssessment};
pub use store::{load_bundle_cached, DataBundle};
