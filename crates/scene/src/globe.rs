use foundation::math::{Vec3, WGS84_A, WGS84_B};

use crate::picking::Ray;

/// Ray-ellipsoid intersection for the WGS84 globe centered at the ECEF origin.
///
/// Ellipsoid equation: (x/a)^2 + (y/a)^2 + (z/b)^2 = 1. Returns the nearest hit in
/// front of the ray origin, or `None` when the ray passes through empty sky.
pub fn intersect_wgs84(ray: Ray) -> Option<Vec3> {
    let dir = ray.dir.normalize()?;
    let t = ray_ellipsoid_t(ray.origin, dir)?;
    Some(ray.origin + dir.scale(t))
}

/// Distance along the unit direction `dir` to the nearest positive ellipsoid hit.
pub fn ray_ellipsoid_t(eye: Vec3, dir: Vec3) -> Option<f64> {
    let inv_a2 = 1.0 / (WGS84_A * WGS84_A);
    let inv_b2 = 1.0 / (WGS84_B * WGS84_B);

    let a = (dir.x * dir.x + dir.y * dir.y) * inv_a2 + dir.z * dir.z * inv_b2;
    if a.abs() < 1e-18 {
        return None;
    }
    let b = 2.0 * ((eye.x * dir.x + eye.y * dir.y) * inv_a2 + eye.z * dir.z * inv_b2);
    let c = (eye.x * eye.x + eye.y * eye.y) * inv_a2 + eye.z * eye.z * inv_b2 - 1.0;

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let sdisc = disc.sqrt();
    // a > 0, so t0 <= t1.
    let t0 = (-b - sdisc) / (2.0 * a);
    let t1 = (-b + sdisc) / (2.0 * a);

    if t0 > 0.0 {
        Some(t0)
    } else if t1 > 0.0 {
        Some(t1)
    } else {
        None
    }
}
