//! Tectonic regions, domains and their depth-band subtypes.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::regionalizer::RegionError;

/// Top-level tectonic region, one per polygon layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TectonicRegion {
    Stable,
    Active,
    Subduction,
    Volcanic,
}

impl TectonicRegion {
    /// Layers in the order they are tested.
    pub const ALL: [TectonicRegion; 4] = [
        TectonicRegion::Stable,
        TectonicRegion::Active,
        TectonicRegion::Subduction,
        TectonicRegion::Volcanic,
    ];

    /// Domain assigned when a matching polygon carries none.
    pub fn default_domain(&self) -> TectonicDomain {
        match self {
            TectonicRegion::Stable => TectonicDomain::ScrGeneric,
            TectonicRegion::Active => TectonicDomain::AcrShallow,
            TectonicRegion::Subduction => TectonicDomain::SzGeneric,
            TectonicRegion::Volcanic => TectonicDomain::AcrHotSpot,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TectonicRegion::Stable => "Stable",
            TectonicRegion::Active => "Active",
            TectonicRegion::Subduction => "Subduction",
            TectonicRegion::Volcanic => "Volcanic",
        }
    }
}

impl fmt::Display for TectonicRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final seismotectonic subtype handed to ground-motion model selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TectonicSubtype {
    /// Active crustal region.
    ACR,
    /// Stable continental region.
    SCR,
    /// Subduction interface.
    SZInter,
    /// Subduction intraslab.
    SZIntra,
}

impl TectonicSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            TectonicSubtype::ACR => "ACR",
            TectonicSubtype::SCR => "SCR",
            TectonicSubtype::SZInter => "SZInter",
            TectonicSubtype::SZIntra => "SZIntra",
        }
    }
}

impl fmt::Display for TectonicSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fine-grained tectonic domain carried by region polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TectonicDomain {
    #[serde(rename = "SCR (generic)")]
    ScrGeneric,
    #[serde(rename = "SCR (above slab)")]
    ScrAboveSlab,
    #[serde(rename = "SOR (generic)")]
    SorGeneric,
    #[serde(rename = "SOR (above slab)")]
    SorAboveSlab,
    #[serde(rename = "ACR (shallow)")]
    AcrShallow,
    #[serde(rename = "ACR (deep)")]
    AcrDeep,
    #[serde(rename = "ACR (oceanic boundary)")]
    AcrOceanicBoundary,
    #[serde(rename = "ACR (hot spot)")]
    AcrHotSpot,
    #[serde(rename = "ACR deep (above slab)")]
    AcrDeepAboveSlab,
    #[serde(rename = "ACR shallow (above slab)")]
    AcrShallowAboveSlab,
    #[serde(rename = "ACR oceanic boundary (above slab)")]
    AcrOceanicBoundaryAboveSlab,
    #[serde(rename = "ACR hot spot (above slab)")]
    AcrHotSpotAboveSlab,
    #[serde(rename = "SZ (generic)")]
    SzGeneric,
    #[serde(rename = "SZ (on-shore)")]
    SzOnShore,
    #[serde(rename = "SZ (inland/back-arc)")]
    SzInlandBackArc,
    #[serde(rename = "SZ (outer-trench)")]
    SzOuterTrench,
}

impl TectonicDomain {
    pub const ALL: [TectonicDomain; 16] = [
        TectonicDomain::ScrGeneric,
        TectonicDomain::ScrAboveSlab,
        TectonicDomain::SorGeneric,
        TectonicDomain::SorAboveSlab,
        TectonicDomain::AcrShallow,
        TectonicDomain::AcrDeep,
        TectonicDomain::AcrOceanicBoundary,
        TectonicDomain::AcrHotSpot,
        TectonicDomain::AcrDeepAboveSlab,
        TectonicDomain::AcrShallowAboveSlab,
        TectonicDomain::AcrOceanicBoundaryAboveSlab,
        TectonicDomain::AcrHotSpotAboveSlab,
        TectonicDomain::SzGeneric,
        TectonicDomain::SzOnShore,
        TectonicDomain::SzInlandBackArc,
        TectonicDomain::SzOuterTrench,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TectonicDomain::ScrGeneric => "SCR (generic)",
            TectonicDomain::ScrAboveSlab => "SCR (above slab)",
            TectonicDomain::SorGeneric => "SOR (generic)",
            TectonicDomain::SorAboveSlab => "SOR (above slab)",
            TectonicDomain::AcrShallow => "ACR (shallow)",
            TectonicDomain::AcrDeep => "ACR (deep)",
            TectonicDomain::AcrOceanicBoundary => "ACR (oceanic boundary)",
            TectonicDomain::AcrHotSpot => "ACR (hot spot)",
            TectonicDomain::AcrDeepAboveSlab => "ACR deep (above slab)",
            TectonicDomain::AcrShallowAboveSlab => "ACR shallow (above slab)",
            TectonicDomain::AcrOceanicBoundaryAboveSlab => "ACR oceanic boundary (above slab)",
            TectonicDomain::AcrHotSpotAboveSlab => "ACR hot spot (above slab)",
            TectonicDomain::SzGeneric => "SZ (generic)",
            TectonicDomain::SzOnShore => "SZ (on-shore)",
            TectonicDomain::SzInlandBackArc => "SZ (inland/back-arc)",
            TectonicDomain::SzOuterTrench => "SZ (outer-trench)",
        }
    }

    /// True for the domains where slab geometry drives the subtype.
    pub fn uses_slab_geometry(&self) -> bool {
        matches!(self, TectonicDomain::SzGeneric | TectonicDomain::SzOnShore)
    }
}

impl fmt::Display for TectonicDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TectonicDomain {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TectonicDomain::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RegionError::UnknownDomain(s.to_string()))
    }
}

/// One depth band of a domain: events shallower than `upper_km` get `subtype`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthBand {
    pub upper_km: f64,
    pub subtype: TectonicSubtype,
}

impl DepthBand {
    pub const fn new(upper_km: f64, subtype: TectonicSubtype) -> Self {
        Self { upper_km, subtype }
    }
}

/// Index of the band containing `depth`; the deepest band is unbounded.
pub fn band_index(bands: &[DepthBand; 3], depth: f64) -> usize {
    bands.iter().position(|b| b.upper_km > depth).unwrap_or(bands.len() - 1)
}

/// Depth-band table for every tectonic domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainTable {
    bands: HashMap<TectonicDomain, [DepthBand; 3]>,
}

impl Default for DomainTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl DomainTable {
    /// The standard table used for ground-motion model selection.
    pub fn standard() -> Self {
        use TectonicSubtype::*;
        let stable = [DepthBand::new(40.0, SCR), DepthBand::new(999.0, SCR), DepthBand::new(1000.0, SCR)];
        let stable_above_slab = [
            DepthBand::new(40.0, SCR),
            DepthBand::new(999.0, SZIntra),
            DepthBand::new(1000.0, SZIntra),
        ];
        let active = [DepthBand::new(40.0, ACR), DepthBand::new(999.0, ACR), DepthBand::new(1000.0, ACR)];
        let active_above_slab = [
            DepthBand::new(40.0, ACR),
            DepthBand::new(999.0, SZIntra),
            DepthBand::new(1000.0, SZIntra),
        ];
        let subduction = [
            DepthBand::new(40.0, SZInter),
            DepthBand::new(70.0, SZInter),
            DepthBand::new(1000.0, SZIntra),
        ];

        let mut bands = HashMap::new();
        bands.insert(
            TectonicDomain::ScrGeneric,
            [DepthBand::new(50.0, SCR), DepthBand::new(999.0, SCR), DepthBand::new(1000.0, SCR)],
        );
        bands.insert(TectonicDomain::ScrAboveSlab, stable_above_slab);
        bands.insert(TectonicDomain::SorGeneric, stable);
        bands.insert(TectonicDomain::SorAboveSlab, stable_above_slab);
        for d in [
            TectonicDomain::AcrShallow,
            TectonicDomain::AcrDeep,
            TectonicDomain::AcrOceanicBoundary,
            TectonicDomain::AcrHotSpot,
        ] {
            bands.insert(d, active);
        }
        for d in [
            TectonicDomain::AcrDeepAboveSlab,
            TectonicDomain::AcrShallowAboveSlab,
            TectonicDomain::AcrOceanicBoundaryAboveSlab,
            TectonicDomain::AcrHotSpotAboveSlab,
            TectonicDomain::SzInlandBackArc,
            TectonicDomain::SzOuterTrench,
        ] {
            bands.insert(d, active_above_slab);
        }
        bands.insert(TectonicDomain::SzGeneric, subduction);
        bands.insert(TectonicDomain::SzOnShore, subduction);
        Self { bands }
    }

    /// Overrides the bands of one domain. Band bounds must be non-decreasing.
    pub fn set_bands(&mut self, domain: TectonicDomain, bands: [DepthBand; 3]) -> Result<(), RegionError> {
        if bands.windows(2).any(|w| w[1].upper_km < w[0].upper_km) {
            return Err(RegionError::InvalidDepthBands(domain.to_string()));
        }
        self.bands.insert(domain, bands);
        Ok(())
    }

    /// Depth bands for a domain.
    pub fn bands(&self, domain: TectonicDomain) -> Result<[DepthBand; 3], RegionError> {
        self.bands
            .get(&domain)
            .copied()
            .ok_or_else(|| RegionError::UnknownDomain(domain.to_string()))
    }

    /// Subtype of a domain at the given depth.
    pub fn subtype_at(&self, domain: TectonicDomain, depth: f64) -> Result<TectonicSubtype, RegionError> {
        let bands = self.bands(domain)?;
        Ok(bands[band_index(&bands, depth)].subtype)
    }
}
