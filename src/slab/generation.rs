//! Slab model generations and their raster conventions.
//!
//! The two generations store depth, dip and strike with different signs and
//! name their companion files differently. All of that is normalized here so
//! downstream code sees one convention:
//! depth positive down in km, dip positive, strike in [0, 360).

use serde::{Deserialize, Serialize};

use crate::geometry::normalize_azimuth;

/// A generation of slab geometry models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlabGeneration {
    Slab1,
    Slab2,
}

/// File names of the surfaces that accompany a depth surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingNames {
    pub dip: String,
    pub strike: String,
    pub uncertainty: Option<String>,
}

impl SlabGeneration {
    /// Detects the generation from a surface file name.
    pub fn detect(file_name: &str) -> Self {
        if file_name.to_ascii_lowercase().contains("slab1") {
            SlabGeneration::Slab1
        } else {
            SlabGeneration::Slab2
        }
    }

    /// Whether `file_name` is a depth surface of this generation.
    pub fn is_depth_surface(&self, file_name: &str) -> bool {
        match self {
            SlabGeneration::Slab1 => file_name.contains("_clip"),
            SlabGeneration::Slab2 => file_name.contains("_dep"),
        }
    }

    /// Names of the dip, strike and uncertainty surfaces for a depth surface.
    pub fn sibling_names(&self, depth_file: &str) -> SiblingNames {
        match self {
            SlabGeneration::Slab1 => SiblingNames {
                dip: depth_file.replace("_clip", "_dipclip"),
                strike: depth_file.replace("_clip", "_strclip"),
                uncertainty: None,
            },
            SlabGeneration::Slab2 => SiblingNames {
                dip: depth_file.replace("dep", "dip"),
                strike: depth_file.replace("dep", "str"),
                uncertainty: Some(depth_file.replace("dep", "unc")),
            },
        }
    }

    pub fn has_uncertainty(&self) -> bool {
        matches!(self, SlabGeneration::Slab2)
    }

    /// Depth in km, positive down.
    pub fn depth(&self, raw: f64) -> f64 {
        -raw
    }

    pub fn dip(&self, raw: f64) -> f64 {
        match self {
            SlabGeneration::Slab1 => -raw,
            SlabGeneration::Slab2 => raw.abs(),
        }
    }

    /// Interface strike. Both generations store it directly, Slab1 with
    /// negative azimuths west of north.
    pub fn strike(&self, raw: f64) -> f64 {
        if raw.is_nan() {
            return raw;
        }
        normalize_azimuth(raw)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlabGeneration::Slab1 => "slab1",
            SlabGeneration::Slab2 => "slab2",
        }
    }
}

/// Region code of a slab surface file: the text before the first underscore.
pub fn region_code(file_name: &str) -> &str {
    let base = file_name.rsplit('/').next().unwrap_or(file_name);
    base.split('_').next().unwrap_or(base)
}
