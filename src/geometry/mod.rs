//! Spherical geometry module.
//!
//! Provides geographic coordinates on the unit sphere, great circle
//! distances and bearings, an azimuthal-equidistant projection and
//! polygon membership/boundary distance built on top of it.

mod sphere;
mod projection;
mod polygon;

pub use sphere::{
    LatLon, EARTH_RADIUS_KM, great_circle_angle, great_circle_distance_km,
    initial_bearing, local_tangent_basis, normalize_azimuth, wrap_longitude,
};
pub use projection::AzimuthalEquidistant;
pub use polygon::{BoundaryDistance, MultiPolygon, Polygon};
