use super::Vec3;

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
/// WGS84 first eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);
/// WGS84 second eccentricity squared.
pub const WGS84_EP2: f64 = (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);

/// A location on or above the WGS84 ellipsoid.
///
/// Angles are kept in degrees since that is what users type and services expect;
/// conversions to ECEF (the scene's world frame) go through radians internally.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Geodetic {
    pub lon_deg: f64,
    pub lat_deg: f64,
    /// Height above the ellipsoid.
    pub height_m: f64,
}

impl Geodetic {
    pub const fn new(lon_deg: f64, lat_deg: f64, height_m: f64) -> Self {
        Self {
            lon_deg,
            lat_deg,
            height_m,
        }
    }

    pub fn to_ecef(self) -> Vec3 {
        let (sin_lat, cos_lat) = self.lat_deg.to_radians().sin_cos();
        let (sin_lon, cos_lon) = self.lon_deg.to_radians().sin_cos();

        let n = prime_vertical_radius(sin_lat);
        let r = (n + self.height_m) * cos_lat;
        Vec3::new(
            r * cos_lon,
            r * sin_lon,
            (n * (1.0 - WGS84_E2) + self.height_m) * sin_lat,
        )
    }

    /// Bowring's closed form. Longitude comes from `atan2` and is not wrapped
    /// or clamped beyond that.
    pub fn from_ecef(p: Vec3) -> Self {
        let rho = p.x.hypot(p.y);
        let lon = p.y.atan2(p.x);

        let (sin_u, cos_u) = (p.z * WGS84_A).atan2(rho * WGS84_B).sin_cos();
        let lat = (p.z + WGS84_EP2 * WGS84_B * sin_u.powi(3))
            .atan2(rho - WGS84_E2 * WGS84_A * cos_u.powi(3));

        // Stays finite at the poles, where rho and cos(lat) both vanish.
        let (sin_lat, cos_lat) = lat.sin_cos();
        let n = prime_vertical_radius(sin_lat);
        let height = rho * cos_lat + (p.z + WGS84_E2 * n * sin_lat) * sin_lat - n;
        Self::new(lon.to_degrees(), lat.to_degrees(), height)
    }
}

fn prime_vertical_radius(sin_lat: f64) -> f64 {
    WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt()
}
