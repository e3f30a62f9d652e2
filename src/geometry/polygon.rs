//! Geographic polygons with holes and multi-part shapes.
//!
//! Membership is tested in the longitude/latitude plane, with ring longitudes
//! unwrapped so polygons may cross the antimeridian. Boundary distances are
//! measured in km, either to vertices along great circles or to edges in an
//! azimuthal-equidistant projection centered on the query point.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::projection::AzimuthalEquidistant;
use super::sphere::{great_circle_distance_km, LatLon};

/// How the distance from a point to a polygon boundary is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryDistance {
    /// Distance to the nearest boundary vertex.
    #[default]
    Vertex,
    /// Distance to the nearest point on any boundary edge.
    Segment,
}

/// A simple polygon: one exterior ring and zero or more holes.
///
/// Rings are stored as open or closed vertex lists; a repeated first vertex
/// at the end is allowed and harmless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: Vec<LatLon>,
    #[serde(default)]
    pub holes: Vec<Vec<LatLon>>,
}

impl Polygon {
    /// Creates a polygon without holes.
    pub fn new(exterior: Vec<LatLon>) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }

    /// Builds an axis-aligned lat/lon box, densified so its edges follow
    /// parallels and meridians rather than great circles.
    pub fn lat_lon_box(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        const STEPS: usize = 16;
        let mut ring = Vec::with_capacity(4 * STEPS);
        let lerp = |a: f64, b: f64, t: f64| a + (b - a) * t;
        for i in 0..STEPS {
            let t = i as f64 / STEPS as f64;
            ring.push(LatLon::new(lat_min, lerp(lon_min, lon_max, t)));
        }
        for i in 0..STEPS {
            let t = i as f64 / STEPS as f64;
            ring.push(LatLon::new(lerp(lat_min, lat_max, t), lon_max));
        }
        for i in 0..STEPS {
            let t = i as f64 / STEPS as f64;
            ring.push(LatLon::new(lat_max, lerp(lon_max, lon_min, t)));
        }
        for i in 0..STEPS {
            let t = i as f64 / STEPS as f64;
            ring.push(LatLon::new(lerp(lat_max, lat_min, t), lon_min));
        }
        Self::new(ring)
    }

    /// Iterates over all rings, exterior first.
    pub fn rings(&self) -> impl Iterator<Item = &[LatLon]> {
        std::iter::once(self.exterior.as_slice()).chain(self.holes.iter().map(|h| h.as_slice()))
    }

    /// Tests whether `point` lies inside the exterior and outside every hole.
    pub fn contains(&self, point: LatLon) -> bool {
        if !ring_contains(&self.exterior, point) {
            return false;
        }
        !self.holes.iter().any(|hole| ring_contains(hole, point))
    }

    /// Minimum distance in km from `point` to this polygon's boundary.
    pub fn boundary_distance_km(&self, point: LatLon, mode: BoundaryDistance) -> f64 {
        match mode {
            BoundaryDistance::Vertex => self
                .rings()
                .flat_map(|ring| ring.iter())
                .map(|&v| great_circle_distance_km(point, v))
                .fold(f64::INFINITY, f64::min),
            BoundaryDistance::Segment => {
                let proj = AzimuthalEquidistant::new(point);
                self.rings()
                    .map(|ring| {
                        let projected = project_ring(&proj, ring);
                        ring_edges(&projected)
                            .map(|(a, b)| distance_to_segment(DVec2::ZERO, a, b))
                            .fold(f64::INFINITY, f64::min)
                    })
                    .fold(f64::INFINITY, f64::min)
            }
        }
    }
}

/// A polygon made of one or more disjoint parts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiPolygon {
    pub parts: Vec<Polygon>,
}

impl MultiPolygon {
    pub fn new(parts: Vec<Polygon>) -> Self {
        Self { parts }
    }

    pub fn contains(&self, point: LatLon) -> bool {
        self.parts.iter().any(|p| p.contains(point))
    }

    pub fn boundary_distance_km(&self, point: LatLon, mode: BoundaryDistance) -> f64 {
        self.parts
            .iter()
            .map(|p| p.boundary_distance_km(point, mode))
            .fold(f64::INFINITY, f64::min)
    }
}

impl From<Polygon> for MultiPolygon {
    fn from(p: Polygon) -> Self {
        Self { parts: vec![p] }
    }
}

fn project_ring(proj: &AzimuthalEquidistant, ring: &[LatLon]) -> Vec<DVec2> {
    ring.iter().map(|&p| proj.project(p)).collect()
}

/// Consecutive edges of a ring, closing it if needed.
fn ring_edges(ring: &[DVec2]) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
    let n = ring.len();
    (0..n).map(move |i| (ring[i], ring[(i + 1) % n]))
}

/// Ring as (lon, lat) points with each longitude within 180 degrees of the
/// previous one.
fn unwrap_ring(ring: &[LatLon]) -> Vec<DVec2> {
    let mut out: Vec<DVec2> = Vec::with_capacity(ring.len());
    for p in ring {
        let mut lon = p.lon;
        if let Some(prev) = out.last() {
            while lon - prev.x > 180.0 {
                lon -= 360.0;
            }
            while prev.x - lon > 180.0 {
                lon += 360.0;
            }
        }
        out.push(DVec2::new(lon, p.lat));
    }
    out
}

/// Even-odd ray cast from `p` along +x.
fn ring_contains_xy(ring: &[DVec2], p: DVec2) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    for (a, b) in ring_edges(ring) {
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if x_cross > p.x {
                inside = !inside;
            }
        }
    }
    inside
}

fn ring_contains(ring: &[LatLon], point: LatLon) -> bool {
    let unwrapped = unwrap_ring(ring);
    [point.lon, point.lon - 360.0, point.lon + 360.0]
        .iter()
        .any(|&lon| ring_contains_xy(&unwrapped, DVec2::new(lon, point.lat)))
}

fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-18 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
