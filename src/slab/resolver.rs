//! Local subduction interface geometry at a point.
//!
//! Gridded slab models are consulted first. Where several regional grids
//! cover a point, the shallowest finite depth wins. Only when no grid reports
//! a finite depth does the resolver fall back to the nearest trench vertex,
//! approximating the interface as a plane dipping at a fixed angle from the
//! trench.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::geometry::LatLon;

use super::collection::{slab_region_name, SlabRegion};
use super::config::SlabConfig;
use super::generation::SlabGeneration;
use super::grid::GridStore;
use super::trench::{nearest_trench_vertex, TrenchLine, TrenchSide};

#[derive(Debug, Error)]
pub enum SlabError {
    #[error("slab surface {missing} required by {depth_surface} not found")]
    MissingSurface { depth_surface: String, missing: String },
    #[error("invalid slab grid: {0}")]
    InvalidGrid(String),
}

/// Where a slab sample came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlabSource {
    Grid(SlabGeneration),
    Trench(TrenchSide),
}

/// Interface geometry at one point. Depth is NaN when grids cover the point
/// but hold no data there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabSurfaceSample {
    /// Region code of the grid, or the trench name.
    pub region: String,
    pub strike: f64,
    pub dip: f64,
    pub depth: f64,
    pub depth_uncertainty: f64,
    pub maximum_interface_depth: f64,
    pub source: SlabSource,
}

impl SlabSurfaceSample {
    pub fn has_depth(&self) -> bool {
        self.depth.is_finite()
    }

    pub fn region_name(&self) -> Option<&'static str> {
        slab_region_name(&self.region)
    }

    /// True when a trench sample places the point on the incoming plate.
    pub fn is_outside_trench(&self) -> bool {
        self.source == SlabSource::Trench(TrenchSide::Outside)
    }
}

/// Resolves slab geometry from regional grids and trench lines.
#[derive(Clone)]
pub struct SlabGeometryResolver {
    regions: Vec<SlabRegion>,
    trenches: Vec<TrenchLine>,
    max_interface_depths: HashMap<String, f64>,
    config: SlabConfig,
}

impl SlabGeometryResolver {
    pub fn new(
        regions: Vec<SlabRegion>,
        trenches: Vec<TrenchLine>,
        max_interface_depths: HashMap<String, f64>,
        config: SlabConfig,
    ) -> Self {
        Self {
            regions,
            trenches,
            max_interface_depths,
            config,
        }
    }

    /// Discovers the regional grids held in `store`.
    pub fn from_store(
        store: &dyn GridStore,
        trenches: Vec<TrenchLine>,
        max_interface_depths: HashMap<String, f64>,
        config: SlabConfig,
    ) -> Result<Self, SlabError> {
        let regions = SlabRegion::discover(store)?;
        Ok(Self::new(regions, trenches, max_interface_depths, config))
    }

    pub fn regions(&self) -> &[SlabRegion] {
        &self.regions
    }

    pub fn config(&self) -> &SlabConfig {
        &self.config
    }

    /// Maximum seismogenic interface depth for a region code.
    pub fn maximum_interface_depth(&self, code: &str) -> f64 {
        self.max_interface_depths
            .get(code)
            .copied()
            .unwrap_or(self.config.default_max_interface_depth)
    }

    /// Interface geometry at a point, or `None` when neither grids nor a
    /// trench within the search radius cover it.
    pub fn resolve(&self, lat: f64, lon: f64) -> Option<SlabSurfaceSample> {
        let grid_sample = self.grid_sample(lat, lon);
        if grid_sample.as_ref().is_some_and(|s| s.has_depth()) {
            return grid_sample;
        }
        self.trench_sample(lat, lon).or(grid_sample)
    }

    fn grid_sample(&self, lat: f64, lon: f64) -> Option<SlabSurfaceSample> {
        let mut best: Option<SlabSurfaceSample> = None;
        for region in &self.regions {
            let Some(sample) = region.sample(lat, lon) else {
                continue;
            };
            trace!(region = %region.code, depth = sample.depth, "slab grid candidate");
            let replace = match &best {
                None => true,
                Some(current) => {
                    !sample.depth.is_nan() && (current.depth.is_nan() || sample.depth < current.depth)
                }
            };
            if !replace {
                continue;
            }
            let depth_uncertainty = if sample.strike.is_nan() {
                f64::NAN
            } else {
                sample.uncertainty.unwrap_or(self.config.default_depth_uncertainty)
            };
            best = Some(SlabSurfaceSample {
                region: region.code.clone(),
                strike: sample.strike,
                dip: sample.dip,
                depth: sample.depth,
                depth_uncertainty,
                maximum_interface_depth: self.maximum_interface_depth(&region.code),
                source: SlabSource::Grid(region.generation),
            });
        }
        if let Some(sample) = &best {
            debug!(region = %sample.region, depth = sample.depth, "slab grid selected");
        }
        best
    }

    fn trench_sample(&self, lat: f64, lon: f64) -> Option<SlabSurfaceSample> {
        let point = LatLon::new(lat, lon);
        let (line, vertex, distance) = nearest_trench_vertex(&self.trenches, point)?;
        if distance > self.config.trench_search_radius_km {
            return None;
        }
        let dip = self.config.default_trench_dip;
        let side = TrenchSide::of(vertex, point);
        debug!(
            trench = %line.name,
            distance_km = distance,
            side = side.as_str(),
            "slab geometry from trench fallback"
        );
        Some(SlabSurfaceSample {
            region: line.name.clone(),
            strike: vertex.strike,
            dip,
            depth: distance * dip.to_radians().tan(),
            depth_uncertainty: self.config.default_depth_uncertainty,
            maximum_interface_depth: self.maximum_interface_depth(&line.name),
            source: SlabSource::Trench(side),
        })
    }
}
