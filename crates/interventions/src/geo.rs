use foundation::math::{Geodetic, Vec3};
use serde::Serialize;

/// Longitude/latitude in degrees, produced once per click.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct GeoCoordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoCoordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Ellipsoidal (WGS84) conversion of a scene point; height is dropped.
    pub fn from_ecef(point: Vec3) -> Self {
        let geo = Geodetic::from_ecef(point);
        Self::new(geo.lon_deg, geo.lat_deg)
    }
}
