//! JSON data bundles holding every read-only resource the engine needs.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::catalog::{CatalogRow, CompositeEstimator, MemoryCatalog};
use crate::regime::{RegimeEngine, StrecConfig};
use crate::regions::{DomainTable, PolygonLayer, RegionLayers, Regionalizer};
use crate::slab::{MemoryGridStore, RasterGrid, SlabError, SlabGeometryResolver, TrenchLine};

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed bundle: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Slab(#[from] SlabError),
}

/// Polygon layers of a bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundleLayers {
    pub stable: PolygonLayer,
    pub active: PolygonLayer,
    pub subduction: PolygonLayer,
    pub volcanic: PolygonLayer,
    pub oceanic: PolygonLayer,
}

/// Polygon layers, slab grids keyed by file name, trench lines, the
/// per-region maximum interface depths and the moment tensor catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataBundle {
    pub layers: BundleLayers,
    #[serde(default)]
    pub slab_grids: BTreeMap<String, RasterGrid>,
    #[serde(default)]
    pub trenches: Vec<TrenchLine>,
    #[serde(default)]
    pub max_interface_depths: HashMap<String, f64>,
    #[serde(default)]
    pub catalog: Vec<CatalogRow>,
}

impl DataBundle {
    pub fn from_json_str(json: &str) -> Result<Self, BundleError> {
        let bundle: DataBundle = serde_json::from_str(json)?;
        bundle.validate()?;
        Ok(bundle)
    }

    pub fn load(path: &Path) -> Result<Self, BundleError> {
        let json = fs::read_to_string(path).map_err(|source| BundleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let bundle = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            grids = bundle.slab_grids.len(),
            trenches = bundle.trenches.len(),
            catalog = bundle.catalog.len(),
            "data bundle loaded"
        );
        Ok(bundle)
    }

    /// Checks every grid's dimensions.
    pub fn validate(&self) -> Result<(), BundleError> {
        for grid in self.slab_grids.values() {
            grid.validate()?;
        }
        Ok(())
    }

    pub fn region_layers(&self) -> RegionLayers {
        let l = &self.layers;
        RegionLayers {
            stable: Arc::new(l.stable.clone()),
            active: Arc::new(l.active.clone()),
            subduction: Arc::new(l.subduction.clone()),
            volcanic: Arc::new(l.volcanic.clone()),
            oceanic: Arc::new(l.oceanic.clone()),
        }
    }

    pub fn grid_store(&self) -> MemoryGridStore {
        let mut store = MemoryGridStore::new();
        for (name, grid) in &self.slab_grids {
            store.insert(name.clone(), grid.clone());
        }
        store
    }

    pub fn memory_catalog(&self) -> MemoryCatalog {
        MemoryCatalog::new(self.catalog.clone())
    }

    /// Wires every resource of the bundle into an engine.
    pub fn build_engine(&self, config: StrecConfig) -> Result<RegimeEngine, BundleError> {
        let regionalizer = Regionalizer::new(self.region_layers(), DomainTable::standard(), config.region.clone());
        let slabs = SlabGeometryResolver::from_store(
            &self.grid_store(),
            self.trenches.clone(),
            self.max_interface_depths.clone(),
            config.slab.clone(),
        )?;
        let composite = CompositeEstimator::new(Arc::new(self.memory_catalog()), config.composite.clone());
        Ok(RegimeEngine::new(config, regionalizer, slabs, composite))
    }
}
