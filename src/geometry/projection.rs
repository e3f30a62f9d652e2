//! Spherical azimuthal-equidistant projection.

use glam::DVec2;

use super::sphere::{LatLon, EARTH_RADIUS_KM};

/// Azimuthal-equidistant projection centered on a geographic point.
///
/// Distances and bearings from the center are preserved, so the length of a
/// projected vector is the great circle distance from the center in km.
#[derive(Debug, Clone, Copy)]
pub struct AzimuthalEquidistant {
    center: LatLon,
    sin_lat0: f64,
    cos_lat0: f64,
}

impl AzimuthalEquidistant {
    /// Creates a projection centered on `center`.
    pub fn new(center: LatLon) -> Self {
        let lat0 = center.lat.to_radians();
        Self {
            center,
            sin_lat0: lat0.sin(),
            cos_lat0: lat0.cos(),
        }
    }

    pub fn center(&self) -> LatLon {
        self.center
    }

    /// Projects a point to planar `(x, y)` km, x east and y north of the center.
    pub fn project(&self, p: LatLon) -> DVec2 {
        let lat = p.lat.to_radians();
        let dlon = (p.lon - self.center.lon).to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let cos_dlon = dlon.cos();

        let cos_c = (self.sin_lat0 * sin_lat + self.cos_lat0 * cos_lat * cos_dlon).clamp(-1.0, 1.0);
        let c = cos_c.acos();
        // k -> 1 as c -> 0
        let k = if c.abs() < 1e-12 { 1.0 } else { c / c.sin() };

        let x = k * cos_lat * dlon.sin();
        let y = k * (self.cos_lat0 * sin_lat - self.sin_lat0 * cos_lat * cos_dlon);
        DVec2::new(x, y) * EARTH_RADIUS_KM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::sphere::great_circle_distance_km;

    #[test]
    fn test_center_maps_to_origin() {
        let proj = AzimuthalEquidistant::new(LatLon::new(35.0, -120.0));
        let p = proj.project(LatLon::new(35.0, -120.0));
        assert!(p.length() < 1e-9);
    }

    #[test]
    fn test_radial_distance_preserved() {
        let center = LatLon::new(-20.0, 170.0);
        let proj = AzimuthalEquidistant::new(center);
        for &(lat, lon) in &[(-25.0, 175.0), (-10.0, -175.0), (10.0, 150.0), (-60.0, 100.0)] {
            let p = LatLon::new(lat, lon);
            let projected = proj.project(p).length();
            let expected = great_circle_distance_km(center, p);
            assert!(
                (projected - expected).abs() < 1e-6 * expected.max(1.0),
                "projected {} vs great circle {}",
                projected,
                expected
            );
        }
    }

    #[test]
    fn test_axes_orientation() {
        let proj = AzimuthalEquidistant::new(LatLon::new(0.0, 0.0));
        let north = proj.project(LatLon::new(1.0, 0.0));
        let east = proj.project(LatLon::new(0.0, 1.0));
        assert!(north.y > 0.0 && north.x.abs() < 1e-9);
        assert!(east.x > 0.0 && east.y.abs() < 1e-9);
    }
}
