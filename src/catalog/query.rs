//! Catalog query interface and an in-memory implementation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tensor::TensorComponents;

/// Errors that can occur while querying a moment tensor catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid search box: lat [{0}, {1}] lon [{2}, {3}]")]
    InvalidBox(f64, f64, f64, f64),
    #[error("Catalog backend error: {0}")]
    Backend(String),
}

/// One historical event with its moment tensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    /// Origin time, ISO 8601.
    #[serde(default)]
    pub time: Option<String>,
    pub lat: f64,
    pub lon: f64,
    /// Depth in km.
    pub depth: f64,
    pub magnitude: f64,
    #[serde(flatten)]
    pub components: TensorComponents,
}

/// A latitude/longitude search box in decimal degrees.
///
/// Longitude bounds may extend past +/-180 when the box straddles the
/// antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl SearchBox {
    /// Creates a square box of the given half-width around a point.
    pub fn around(lat: f64, lon: f64, half_width: f64) -> Self {
        Self {
            lat_min: lat - half_width,
            lat_max: lat + half_width,
            lon_min: lon - half_width,
            lon_max: lon + half_width,
        }
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let ok = [self.lat_min, self.lat_max, self.lon_min, self.lon_max]
            .iter()
            .all(|v| v.is_finite())
            && self.lat_min <= self.lat_max
            && self.lon_min <= self.lon_max;
        if ok {
            Ok(())
        } else {
            Err(CatalogError::InvalidBox(self.lat_min, self.lat_max, self.lon_min, self.lon_max))
        }
    }

    /// Tests whether a point lies in the box, inclusive on all edges.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        if lat < self.lat_min || lat > self.lat_max {
            return false;
        }
        [lon, lon - 360.0, lon + 360.0]
            .iter()
            .any(|&l| l >= self.lon_min && l <= self.lon_max)
    }
}

/// Source of historical moment tensors.
pub trait CatalogQuery: Send + Sync {
    /// Returns all rows whose epicenter falls in the box.
    fn query_box(&self, bounds: &SearchBox) -> Result<Vec<CatalogRow>, CatalogError>;
}

/// A catalog held entirely in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryCatalog {
    rows: Vec<CatalogRow>,
}

impl MemoryCatalog {
    pub fn new(rows: Vec<CatalogRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }
}

impl CatalogQuery for MemoryCatalog {
    fn query_box(&self, bounds: &SearchBox) -> Result<Vec<CatalogRow>, CatalogError> {
        bounds.validate()?;
        Ok(self
            .rows
            .iter()
            .filter(|r| bounds.contains(r.lat, r.lon))
            .cloned()
            .collect())
    }
}
