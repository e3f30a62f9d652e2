//! Regional slab models assembled from a grid store.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;

use super::generation::{region_code, SlabGeneration};
use super::grid::{GridStore, GridSurface};
use super::SlabError;

static SLAB_REGION_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("alu", "Alaska-Aleutians"),
        ("cal", "Calabria"),
        ("cam", "Central America"),
        ("car", "Caribbean"),
        ("cas", "Cascadia"),
        ("cot", "Cotabato"),
        ("hal", "Halmahera"),
        ("hel", "Helanic"),
        ("him", "Himalaya"),
        ("hin", "Hindu Kush"),
        ("izu", "Izu-Bonin"),
        ("ker", "Kermadec-Tonga"),
        ("kur", "Kamchatka/Kurils/Japan"),
        ("mak", "Makran"),
        ("man", "Manila"),
        ("mex", "Central America"),
        ("mue", "Muertos"),
        ("pam", "Pamir"),
        ("pan", "Panama"),
        ("phi", "Philippines"),
        ("png", "New Guinea"),
        ("puy", "Puysegur"),
        ("ryu", "Ryukyu"),
        ("sam", "South America"),
        ("sco", "Scotia"),
        ("sol", "Solomon Islands"),
        ("sul", "Sulawesi"),
        ("sum", "Sumatra-Java"),
        ("van", "Santa Cruz Islands/Vanuatu/Loyalty Islands"),
    ])
});

/// Display name of a slab region code, e.g. `kur` => "Kamchatka/Kurils/Japan".
pub fn slab_region_name(code: &str) -> Option<&'static str> {
    SLAB_REGION_NAMES.get(code).copied()
}

/// Raw values read from a region's surfaces at one point, already converted
/// to positive-down depth, positive dip and strike in [0, 360).
#[derive(Debug, Clone, Copy)]
pub struct GridSample {
    pub depth: f64,
    pub dip: f64,
    pub strike: f64,
    /// `None` when the region has no uncertainty surface.
    pub uncertainty: Option<f64>,
}

/// Co-registered depth, dip, strike and optional uncertainty surfaces of one
/// subduction region.
#[derive(Clone)]
pub struct SlabRegion {
    pub code: String,
    pub generation: SlabGeneration,
    depth: Arc<dyn GridSurface>,
    dip: Arc<dyn GridSurface>,
    strike: Arc<dyn GridSurface>,
    uncertainty: Option<Arc<dyn GridSurface>>,
}

impl SlabRegion {
    /// Finds every depth surface in the store and pairs it with its siblings.
    pub fn discover(store: &dyn GridStore) -> Result<Vec<SlabRegion>, SlabError> {
        let mut regions = Vec::new();
        for name in store.names() {
            let generation = SlabGeneration::detect(&name);
            if !generation.is_depth_surface(&name) {
                continue;
            }
            let siblings = generation.sibling_names(&name);
            let fetch = |sibling: &str| {
                store.surface(sibling).ok_or_else(|| SlabError::MissingSurface {
                    depth_surface: name.clone(),
                    missing: sibling.to_string(),
                })
            };
            let depth = fetch(name.as_str())?;
            let dip = fetch(siblings.dip.as_str())?;
            let strike = fetch(siblings.strike.as_str())?;
            // an absent uncertainty surface falls back to the default
            let uncertainty = siblings.uncertainty.as_deref().and_then(|n| store.surface(n));

            let code = region_code(&name).to_string();
            debug!(region = %code, generation = generation.as_str(), surface = %name, "slab region loaded");
            regions.push(SlabRegion {
                code,
                generation,
                depth,
                dip,
                strike,
                uncertainty,
            });
        }
        Ok(regions)
    }

    pub fn display_name(&self) -> Option<&'static str> {
        slab_region_name(&self.code)
    }

    /// Whether the point lies inside the depth grid's bounding box.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.depth.bounds().contains(lat, lon)
    }

    /// Samples all surfaces, or `None` when the point is outside the grid.
    pub fn sample(&self, lat: f64, lon: f64) -> Option<GridSample> {
        if !self.contains(lat, lon) {
            return None;
        }
        let g = self.generation;
        Some(GridSample {
            depth: g.depth(self.depth.sample(lat, lon)),
            dip: g.dip(self.dip.sample(lat, lon)),
            strike: g.strike(self.strike.sample(lat, lon)),
            uncertainty: self.uncertainty.as_ref().map(|u| u.sample(lat, lon)),
        })
    }
}
