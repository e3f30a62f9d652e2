//! Tectonic region, domain and crust type lookup for a hypocenter.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::config::RegionConfig;
use super::domain::{band_index, DepthBand, DomainTable, TectonicDomain, TectonicRegion, TectonicSubtype};
use super::layer::RegionLayer;
use crate::geometry::LatLon;

/// Errors that can occur during regionalization.
#[derive(Error, Debug)]
pub enum RegionError {
    #[error("No tectonic region layer contains ({lat}, {lon})")]
    RegionNotFound { lat: f64, lon: f64 },
    #[error("Unknown tectonic domain: '{0}'")]
    UnknownDomain(String),
    #[error("Depth bands for '{0}' are not non-decreasing")]
    InvalidDepthBands(String),
}

/// Crust type at the epicenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrustType {
    /// Continental crust, including continental margins.
    Continental,
    /// Oceanic crust.
    Oceanic,
}

/// The four tectonic region layers plus the oceanic layer.
#[derive(Clone)]
pub struct RegionLayers {
    pub stable: Arc<dyn RegionLayer>,
    pub active: Arc<dyn RegionLayer>,
    pub subduction: Arc<dyn RegionLayer>,
    pub volcanic: Arc<dyn RegionLayer>,
    pub oceanic: Arc<dyn RegionLayer>,
}

impl RegionLayers {
    pub fn get(&self, region: TectonicRegion) -> &Arc<dyn RegionLayer> {
        match region {
            TectonicRegion::Stable => &self.stable,
            TectonicRegion::Active => &self.active,
            TectonicRegion::Subduction => &self.subduction,
            TectonicRegion::Volcanic => &self.volcanic,
        }
    }
}

/// Distance in km from the epicenter to each region layer (0 inside).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionDistances {
    pub stable: f64,
    pub active: f64,
    pub subduction: f64,
    pub volcanic: f64,
}

impl RegionDistances {
    pub fn get(&self, region: TectonicRegion) -> f64 {
        match region {
            TectonicRegion::Stable => self.stable,
            TectonicRegion::Active => self.active,
            TectonicRegion::Subduction => self.subduction,
            TectonicRegion::Volcanic => self.volcanic,
        }
    }

    fn set(&mut self, region: TectonicRegion, distance: f64) {
        match region {
            TectonicRegion::Stable => self.stable = distance,
            TectonicRegion::Active => self.active = distance,
            TectonicRegion::Subduction => self.subduction = distance,
            TectonicRegion::Volcanic => self.volcanic = distance,
        }
    }
}

/// Region membership of a hypocenter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionClassification {
    pub region: TectonicRegion,
    pub domain: TectonicDomain,
    /// Subtype of `domain` at the hypocenter depth.
    pub sub_domain: TectonicSubtype,
    pub depth_bands: [DepthBand; 3],
    pub distances: RegionDistances,
    pub crust: CrustType,
    pub distance_to_oceanic: f64,
    pub distance_to_continental: f64,
    /// Whether the containing subduction polygon flags a back-arc region.
    pub has_backarc: bool,
}

impl RegionClassification {
    pub fn is_oceanic(&self) -> bool {
        self.crust == CrustType::Oceanic
    }

    /// Upper bound of the shallowest depth band.
    pub fn h1(&self) -> f64 {
        self.depth_bands[0].upper_km
    }

    /// Upper bound of the middle depth band.
    pub fn h2(&self) -> f64 {
        self.depth_bands[1].upper_km
    }

    /// Replaces the domain and recomputes its depth bands and sub-domain.
    pub fn reassign(&mut self, domain: TectonicDomain, table: &DomainTable, depth: f64) -> Result<(), RegionError> {
        let bands = table.bands(domain)?;
        debug!(from = %self.domain, to = %domain, "domain reassigned");
        self.domain = domain;
        self.depth_bands = bands;
        self.sub_domain = bands[band_index(&bands, depth)].subtype;
        Ok(())
    }
}

/// Resolves tectonic region membership from polygon layers.
pub struct Regionalizer {
    layers: RegionLayers,
    domains: DomainTable,
    config: RegionConfig,
}

impl Regionalizer {
    pub fn new(layers: RegionLayers, domains: DomainTable, config: RegionConfig) -> Self {
        Self {
            layers,
            domains,
            config,
        }
    }

    pub fn domains(&self) -> &DomainTable {
        &self.domains
    }

    /// Classifies a hypocenter against all region layers.
    ///
    /// Layers are tested in the order Stable, Active, Subduction, Volcanic;
    /// the first containing layer determines the region and domain.
    ///
    /// # Errors
    /// `RegionNotFound` if no layer contains the point, `UnknownDomain` if the
    /// containing polygon carries an unrecognized domain label.
    pub fn get_regions(&self, lat: f64, lon: f64, depth: f64) -> Result<RegionClassification, RegionError> {
        let point = LatLon::new(lat, lon);
        let mode = self.config.boundary_distance;

        let mut distances = RegionDistances::default();
        let mut matched = None;
        for region in TectonicRegion::ALL {
            let hit = self.layers.get(region).point_in_layer(point, mode);
            if hit.matched && matched.is_none() {
                distances.set(region, 0.0);
                matched = Some((region, hit));
            } else {
                if hit.matched {
                    warn!(lat, lon, layer = %region, "point falls in more than one region layer");
                }
                distances.set(region, hit.distance_km);
            }
        }

        let (region, hit) = matched.ok_or(RegionError::RegionNotFound { lat, lon })?;
        let domain = match hit.domain.as_deref() {
            Some(label) if !label.trim().is_empty() => label.parse::<TectonicDomain>()?,
            _ => region.default_domain(),
        };
        let depth_bands = self.domains.bands(domain)?;
        let sub_domain = depth_bands[band_index(&depth_bands, depth)].subtype;

        let oceanic = self.layers.oceanic.point_in_layer(point, mode);
        let (crust, distance_to_oceanic, distance_to_continental) = if oceanic.matched {
            (CrustType::Oceanic, 0.0, oceanic.distance_km)
        } else {
            (CrustType::Continental, oceanic.distance_km, 0.0)
        };

        debug!(lat, lon, region = %region, domain = %domain, "region resolved");
        Ok(RegionClassification {
            region,
            domain,
            sub_domain,
            depth_bands,
            distances,
            crust,
            distance_to_oceanic,
            distance_to_continental,
            has_backarc: hit.has_backarc,
        })
    }
}
