use foundation::math::Vec3;
use scene::{SceneHost, ScreenPoint};
use tracing::debug;

use crate::geo::GeoCoordinate;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum PickFailure {
    #[error("no scene geometry under screen point ({x:.1}, {y:.1})")]
    NoIntersection { x: f64, y: f64 },
}

/// Which pick strategy produced the point.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PickSource {
    Surface,
    Globe,
}

/// Picked scene point plus its geographic coordinate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickedPoint {
    pub position: Vec3,
    pub coordinate: GeoCoordinate,
    pub source: PickSource,
}

/// Screen point to geographic coordinate, first success wins:
/// 1. precise pick against rendered geometry,
/// 2. camera ray intersected with the bare globe.
pub fn pick<S: SceneHost + ?Sized>(scene: &S, point: ScreenPoint) -> Result<PickedPoint, PickFailure> {
    let (position, source) = match scene.pick_surface(point) {
        Some(p) => (p, PickSource::Surface),
        None => scene
            .pick_ray(point)
            .and_then(|ray| scene.intersect_globe(ray))
            .map(|p| (p, PickSource::Globe))
            .ok_or(PickFailure::NoIntersection {
                x: point.x,
                y: point.y,
            })?,
    };

    let coordinate = GeoCoordinate::from_ecef(position);
    debug!(
        lon = coordinate.longitude,
        lat = coordinate.latitude,
        ?source,
        "picked coordinate"
    );
    Ok(PickedPoint {
        position,
        coordinate,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{PickFailure, PickSource, pick};
    use foundation::math::{Vec3, WGS84_A};
    use scene::{Camera, GlobeScene, ScreenPoint, Viewport};

    fn orbit_scene() -> GlobeScene {
        let cam = Camera::looking_at(
            Vec3::new(3.0 * WGS84_A, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 1.0),
            Viewport::default(),
        )
        .expect("camera");
        GlobeScene::new(cam)
    }

    #[test]
    fn falls_back_to_globe_when_no_surface_is_hit() {
        let scene = orbit_scene();
        let picked = pick(&scene, ScreenPoint::new(640.0, 360.0)).expect("pick");
        assert_eq!(picked.source, PickSource::Globe);
        assert!(picked.coordinate.longitude.abs() < 1e-9);
        assert!(picked.coordinate.latitude.abs() < 1e-9);
    }

    #[test]
    fn prefers_surface_hit() {
        let mut scene = orbit_scene();
        scene.add_block(0.0, 0.0, 50_000.0);
        let picked = pick(&scene, ScreenPoint::new(640.0, 360.0)).expect("pick");
        assert_eq!(picked.source, PickSource::Surface);
        assert!(picked.position.x > WGS84_A);
    }

    #[test]
    fn sky_fails_cleanly() {
        let scene = orbit_scene();
        for point in [
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(1280.0, 0.0),
            ScreenPoint::new(0.0, 720.0),
            ScreenPoint::new(1280.0, 720.0),
        ] {
            let err = pick(&scene, point).expect_err("sky");
            assert!(matches!(err, PickFailure::NoIntersection { .. }));
        }
    }

    #[test]
    fn points_off_the_viewport_fail() {
        let scene = orbit_scene();
        assert!(pick(&scene, ScreenPoint::new(-5.0, 360.0)).is_err());
    }
}
