use super::{Geodetic, Vec3};

/// East-north-up tangent frame anchored at a geodetic site, expressed in ECEF.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LocalFrame {
    pub origin: Vec3,
    pub east: Vec3,
    pub north: Vec3,
    pub up: Vec3,
}

impl LocalFrame {
    pub fn at(site: Geodetic) -> Self {
        let (sin_lat, cos_lat) = site.lat_deg.to_radians().sin_cos();
        let (sin_lon, cos_lon) = site.lon_deg.to_radians().sin_cos();

        Self {
            origin: site.to_ecef(),
            east: Vec3::new(-sin_lon, cos_lon, 0.0),
            north: Vec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat),
            up: Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat),
        }
    }

    /// ECEF point at a metric offset from the origin.
    pub fn to_world(&self, east_m: f64, north_m: f64, up_m: f64) -> Vec3 {
        self.origin + self.direction(east_m, north_m, up_m)
    }

    /// ECEF direction for local components (not normalized).
    pub fn direction(&self, east: f64, north: f64, up: f64) -> Vec3 {
        self.east.scale(east) + self.north.scale(north) + self.up.scale(up)
    }
}
