//! Trench polylines used where no slab grid covers a point.

use serde::{Deserialize, Serialize};

use crate::geometry::{great_circle_distance_km, initial_bearing, normalize_azimuth, LatLon};

/// A trench vertex with the local trench strike in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrenchVertex {
    pub lon: f64,
    pub lat: f64,
    pub strike: f64,
}

impl TrenchVertex {
    pub fn new(lon: f64, lat: f64, strike: f64) -> Self {
        Self { lon, lat, strike }
    }

    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

/// Which side of the trench a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrenchSide {
    /// Landward, above the descending plate.
    Inside,
    /// Oceanward, on the incoming plate.
    Outside,
}

impl TrenchSide {
    /// Side of `point` relative to a trench vertex.
    ///
    /// Strike follows the right-hand rule with the slab dipping to the right,
    /// so a point is landward when its bearing from the vertex is 0 to 180
    /// degrees clockwise of the strike.
    pub fn of(vertex: &TrenchVertex, point: LatLon) -> Self {
        let bearing = initial_bearing(vertex.position(), point);
        let diff = normalize_azimuth(bearing - vertex.strike);
        if diff > 0.0 && diff < 180.0 {
            TrenchSide::Inside
        } else {
            TrenchSide::Outside
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrenchSide::Inside => "inside",
            TrenchSide::Outside => "outside",
        }
    }
}

/// A named trench polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrenchLine {
    pub name: String,
    pub vertices: Vec<TrenchVertex>,
}

impl TrenchLine {
    pub fn new(name: impl Into<String>, vertices: Vec<TrenchVertex>) -> Self {
        Self {
            name: name.into(),
            vertices,
        }
    }

    /// Nearest vertex to `point` and its distance in km.
    pub fn nearest_vertex(&self, point: LatLon) -> Option<(&TrenchVertex, f64)> {
        let mut best: Option<(&TrenchVertex, f64)> = None;
        for vertex in &self.vertices {
            let dist = great_circle_distance_km(point, vertex.position());
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((vertex, dist));
            }
        }
        best
    }
}

/// Nearest vertex over a set of trench lines, with the owning line.
pub fn nearest_trench_vertex(lines: &[TrenchLine], point: LatLon) -> Option<(&TrenchLine, &TrenchVertex, f64)> {
    lines
        .iter()
        .filter_map(|line| line.nearest_vertex(point).map(|(v, d)| (line, v, d)))
        .min_by(|a, b| a.2.total_cmp(&b.2))
}
