//! Geographic coordinates on the unit sphere.
//!
//! Positions use the Y-up convention: the north pole is `DVec3::Y` and
//! longitude increases eastward from `+X` toward `+Z`.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Converts to a position on the unit sphere.
    pub fn to_unit(self) -> DVec3 {
        let (lat, lon) = (self.lat.to_radians(), self.lon.to_radians());
        DVec3::new(lat.cos() * lon.cos(), lat.sin(), lat.cos() * lon.sin())
    }

    /// Converts a unit-sphere position back to latitude/longitude.
    pub fn from_unit(p: DVec3) -> Self {
        let p = p.normalize_or_zero();
        let lat = p.y.clamp(-1.0, 1.0).asin().to_degrees();
        let lon = p.z.atan2(p.x).to_degrees();
        Self { lat, lon }
    }
}

/// Normalizes an angle in degrees to `[0, 360)`.
pub fn normalize_azimuth(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Normalizes a longitude in degrees to `[-180, 180)`.
pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Computes the great circle angle (radians) between two unit vectors.
pub fn great_circle_angle(a: DVec3, b: DVec3) -> f64 {
    // atan2 form stays accurate for nearly coincident points
    a.cross(b).length().atan2(a.dot(b))
}

/// Great circle distance in km between two geographic points.
pub fn great_circle_distance_km(a: LatLon, b: LatLon) -> f64 {
    great_circle_angle(a.to_unit(), b.to_unit()) * EARTH_RADIUS_KM
}

/// Returns `(east, north)` tangent unit vectors at sphere point `p`.
///
/// At the poles, where north is undefined, a stable fallback basis is used.
pub fn local_tangent_basis(p: DVec3) -> (DVec3, DVec3) {
    let up = DVec3::Y;
    let mut north = up - p * up.dot(p);
    let nlen = north.length();
    if nlen < 1e-12 {
        let a = if p.x.abs() < 0.9 { DVec3::X } else { DVec3::Z };
        north = (a - p * a.dot(p)).normalize_or_zero();
    } else {
        north /= nlen;
    }
    let east = p.cross(north).normalize_or_zero();
    (east, north)
}

/// Initial compass bearing (degrees, `[0, 360)`) of the great circle from `from` to `to`.
pub fn initial_bearing(from: LatLon, to: LatLon) -> f64 {
    let p = from.to_unit();
    let q = to.to_unit();
    let (east, north) = local_tangent_basis(p);
    let dir = q - p * p.dot(q);
    normalize_azimuth(dir.dot(east).atan2(dir.dot(north)).to_degrees())
}
