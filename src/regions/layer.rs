//! Region polygon layers.

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundaryDistance, LatLon, MultiPolygon};

/// Result of testing a point against one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerHit {
    /// Whether the point lies inside any polygon of the layer.
    pub matched: bool,
    /// Domain label of the containing polygon, if it has one.
    pub domain: Option<String>,
    /// Distance in km to the nearest polygon when outside, or to the edge
    /// of the containing polygon when inside.
    pub distance_km: f64,
    /// Whether the containing polygon contains a back-arc region.
    pub has_backarc: bool,
}

impl LayerHit {
    pub fn outside(distance_km: f64) -> Self {
        Self {
            matched: false,
            domain: None,
            distance_km,
            has_backarc: false,
        }
    }
}

/// A queryable polygon layer.
pub trait RegionLayer: Send + Sync {
    fn point_in_layer(&self, point: LatLon, mode: BoundaryDistance) -> LayerHit;
}

/// One polygon feature with its attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionFeature {
    pub geometry: MultiPolygon,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub backarc: bool,
}

impl RegionFeature {
    pub fn new(geometry: impl Into<MultiPolygon>) -> Self {
        Self {
            geometry: geometry.into(),
            domain: None,
            backarc: false,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_backarc(mut self, backarc: bool) -> Self {
        self.backarc = backarc;
        self
    }
}

/// An in-memory layer of polygon features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonLayer {
    pub name: String,
    pub features: Vec<RegionFeature>,
}

impl PolygonLayer {
    pub fn new(name: impl Into<String>, features: Vec<RegionFeature>) -> Self {
        Self {
            name: name.into(),
            features,
        }
    }
}

impl RegionLayer for PolygonLayer {
    fn point_in_layer(&self, point: LatLon, mode: BoundaryDistance) -> LayerHit {
        let mut nearest = f64::INFINITY;
        for feature in &self.features {
            let distance = feature.geometry.boundary_distance_km(point, mode);
            if feature.geometry.contains(point) {
                return LayerHit {
                    matched: true,
                    domain: feature.domain.clone(),
                    distance_km: distance,
                    has_backarc: feature.backarc,
                };
            }
            nearest = nearest.min(distance);
        }
        LayerHit::outside(nearest)
    }
}
