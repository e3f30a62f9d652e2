//! Subduction slab geometry.
//!
//! Regional slab models are sets of co-registered rasters (depth, dip,
//! strike and, for newer models, depth uncertainty) found in a [`GridStore`]
//! by file-name convention. The resolver samples them at a point and falls
//! back to trench polylines outside grid coverage.

mod collection;
mod config;
mod generation;
mod grid;
mod resolver;
mod trench;

pub use collection::{slab_region_name, GridSample, SlabRegion};
pub use config::SlabConfig;
pub use generation::{region_code, SiblingNames, SlabGeneration};
pub use grid::{GridBounds, GridStore, GridSurface, MemoryGridStore, RasterGrid};
pub use resolver::{SlabError, SlabGeometryResolver, SlabSource, SlabSurfaceSample};
pub use trench::{nearest_trench_vertex, TrenchLine, TrenchSide, TrenchVertex};
