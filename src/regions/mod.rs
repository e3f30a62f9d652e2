//! Spatial regionalization.
//!
//! This module resolves, for a hypocenter:
//! - The tectonic region layer (Stable, Active, Subduction, Volcanic) it falls in
//! - The fine-grained tectonic domain of the containing polygon
//! - Distances to the layers it does not fall in
//! - Oceanic or continental crust
//! - The depth-band subtype of the domain at the hypocenter depth

mod config;
mod domain;
mod layer;
mod regionalizer;

pub use config::RegionConfig;
pub use domain::{DepthBand, DomainTable, TectonicDomain, TectonicRegion, TectonicSubtype, band_index};
pub use layer::{LayerHit, PolygonLayer, RegionFeature, RegionLayer};
pub use regionalizer::{CrustType, RegionClassification, RegionDistances, RegionError, RegionLayers, Regionalizer};
