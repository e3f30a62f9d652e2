//! Regular lat/lon rasters and the stores that hold them.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::SlabError;

/// Geographic extent of a grid in decimal degrees.
///
/// Grids crossing the antimeridian have `xmin > xmax`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl GridBounds {
    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        if self.xmin > self.xmax {
            self.xmax + 360.0 - self.xmin
        } else {
            self.xmax - self.xmin
        }
    }

    /// Tests whether a point falls inside the bounding box.
    ///
    /// When the grid crosses the antimeridian, the bound on the query's side
    /// of the seam is shifted by 360 degrees before comparing.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        let (mut xmin, mut xmax) = (self.xmin, self.xmax);
        if xmin > xmax {
            if lon < 0.0 {
                xmin -= 360.0;
            } else {
                xmax += 360.0;
            }
        }
        lat >= self.ymin && lat <= self.ymax && lon >= xmin && lon <= xmax
    }
}

/// A single raster surface that can be sampled at a point.
pub trait GridSurface: Send + Sync {
    fn bounds(&self) -> GridBounds;

    /// Value at the point, or NaN when outside the grid or where there is no data.
    fn sample(&self, lat: f64, lon: f64) -> f64;
}

/// A gridline-registered raster stored north row first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterGrid {
    pub bounds: GridBounds,
    pub nx: usize,
    pub ny: usize,
    #[serde(serialize_with = "nan_as_null", deserialize_with = "null_as_nan")]
    values: Vec<f64>,
}

impl RasterGrid {
    /// Creates a grid from row-major values, north row first.
    pub fn new(bounds: GridBounds, nx: usize, ny: usize, values: Vec<f64>) -> Result<Self, SlabError> {
        let grid = Self { bounds, nx, ny, values };
        grid.validate()?;
        Ok(grid)
    }

    /// Builds a grid by evaluating `f(lat, lon)` at every node.
    pub fn from_fn(bounds: GridBounds, nx: usize, ny: usize, f: impl Fn(f64, f64) -> f64) -> Result<Self, SlabError> {
        let mut grid = Self {
            bounds,
            nx,
            ny,
            values: Vec::new(),
        };
        if nx < 2 || ny < 2 {
            return Err(SlabError::InvalidGrid(format!("{}x{} grid needs at least 2x2 nodes", nx, ny)));
        }
        let mut values = Vec::with_capacity(nx * ny);
        for row in 0..ny {
            for col in 0..nx {
                let (lat, lon) = grid.node(row, col);
                values.push(f(lat, lon));
            }
        }
        grid.values = values;
        Ok(grid)
    }

    /// Checks dimensions against the value count.
    pub fn validate(&self) -> Result<(), SlabError> {
        if self.nx < 2 || self.ny < 2 {
            return Err(SlabError::InvalidGrid(format!("{}x{} grid needs at least 2x2 nodes", self.nx, self.ny)));
        }
        if self.values.len() != self.nx * self.ny {
            return Err(SlabError::InvalidGrid(format!(
                "{}x{} grid has {} values",
                self.nx,
                self.ny,
                self.values.len()
            )));
        }
        if self.bounds.ymin > self.bounds.ymax {
            return Err(SlabError::InvalidGrid(format!(
                "ymin {} above ymax {}",
                self.bounds.ymin, self.bounds.ymax
            )));
        }
        Ok(())
    }

    fn spacing(&self) -> (f64, f64) {
        let dx = self.bounds.width() / (self.nx - 1) as f64;
        let dy = (self.bounds.ymax - self.bounds.ymin) / (self.ny - 1) as f64;
        (dx, dy)
    }

    /// Latitude and longitude of a node.
    pub fn node(&self, row: usize, col: usize) -> (f64, f64) {
        let (dx, dy) = self.spacing();
        (self.bounds.ymax - row as f64 * dy, self.bounds.xmin + col as f64 * dx)
    }
}

impl GridSurface for RasterGrid {
    fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Nearest-node sample.
    fn sample(&self, lat: f64, lon: f64) -> f64 {
        if !self.bounds.contains(lat, lon) {
            return f64::NAN;
        }
        let (dx, dy) = self.spacing();
        let x_offset = (lon - self.bounds.xmin).rem_euclid(360.0);
        let col = if dx > 0.0 { (x_offset / dx).round() as usize } else { 0 };
        let row = if dy > 0.0 {
            ((self.bounds.ymax - lat) / dy).round() as usize
        } else {
            0
        };
        let col = col.min(self.nx - 1);
        let row = row.min(self.ny - 1);
        self.values[row * self.nx + col]
    }
}

fn nan_as_null<S: Serializer>(values: &[f64], s: S) -> Result<S::Ok, S::Error> {
    let opt: Vec<Option<f64>> = values.iter().map(|v| if v.is_nan() { None } else { Some(*v) }).collect();
    opt.serialize(s)
}

fn null_as_nan<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<f64>, D::Error> {
    let opt: Vec<Option<f64>> = Vec::deserialize(d)?;
    Ok(opt.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// A named collection of grid surfaces.
pub trait GridStore: Send + Sync {
    /// Names of all surfaces in the store.
    fn names(&self) -> Vec<String>;

    fn surface(&self, name: &str) -> Option<Arc<dyn GridSurface>>;
}

/// Grids held in memory, keyed by file name.
#[derive(Clone, Default)]
pub struct MemoryGridStore {
    grids: BTreeMap<String, Arc<RasterGrid>>,
}

impl MemoryGridStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, grid: RasterGrid) {
        self.grids.insert(name.into(), Arc::new(grid));
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}

impl GridStore for MemoryGridStore {
    fn names(&self) -> Vec<String> {
        self.grids.keys().cloned().collect()
    }

    fn surface(&self, name: &str) -> Option<Arc<dyn GridSurface>> {
        self.grids.get(name).map(|g| g.clone() as Arc<dyn GridSurface>)
    }
}
