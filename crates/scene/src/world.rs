use foundation::math::{Geodetic, LocalFrame, Vec3};
use tracing::debug;

use crate::camera::{Camera, ScreenPoint};
use crate::components::{Marker, SurfaceBox};
use crate::entity::EntityId;
use crate::globe::{intersect_wgs84, ray_ellipsoid_t};
use crate::host::SceneHost;
use crate::picking::{PickOptions, Ray, pick_surfaces};

/// In-memory globe scene: a camera, pickable surface boxes and an append-only marker list.
#[derive(Debug)]
pub struct GlobeScene {
    camera: Camera,
    surfaces: Vec<SurfaceBox>,
    surface_picking: bool,
    markers: Vec<(EntityId, Marker)>,
    next_index: u32,
    redraw_requests: u64,
}

impl GlobeScene {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            surfaces: Vec::new(),
            surface_picking: true,
            markers: Vec::new(),
            next_index: 0,
            redraw_requests: 0,
        }
    }

    /// Disables precise surface picking, as on hosts without depth readback.
    pub fn set_surface_picking(&mut self, enabled: bool) {
        self.surface_picking = enabled;
    }

    pub fn add_surface(&mut self, bounds: SurfaceBox) -> usize {
        self.surfaces.push(bounds);
        self.surfaces.len() - 1
    }

    /// Adds a cube-shaped block whose center sits `half_extent_m` above the ground at a location.
    pub fn add_block(&mut self, lon_deg: f64, lat_deg: f64, half_extent_m: f64) -> usize {
        let ground = LocalFrame::at(Geodetic::new(lon_deg, lat_deg, 0.0));
        let center = ground.to_world(0.0, 0.0, half_extent_m);
        self.add_surface(SurfaceBox::cube(center, half_extent_m))
    }

    pub fn markers(&self) -> &[(EntityId, Marker)] {
        &self.markers
    }

    pub fn redraw_requests(&self) -> u64 {
        self.redraw_requests
    }
}

impl SceneHost for GlobeScene {
    fn pick_surface(&self, point: ScreenPoint) -> Option<Vec3> {
        if !self.surface_picking {
            return None;
        }
        let ray = self.camera.ray_through(point)?;
        let hit = pick_surfaces(&self.surfaces, ray, PickOptions::default())?;

        // Surfaces hidden behind the globe are not visible to the depth buffer.
        let dir = ray.dir.normalize()?;
        if let Some(t_globe) = ray_ellipsoid_t(ray.origin, dir)
            && t_globe < hit.distance
        {
            return None;
        }

        debug!(surface = hit.surface, distance = hit.distance, "surface pick");
        Some(hit.point)
    }

    fn pick_ray(&self, point: ScreenPoint) -> Option<Ray> {
        self.camera.ray_through(point)
    }

    fn intersect_globe(&self, ray: Ray) -> Option<Vec3> {
        intersect_wgs84(ray)
    }

    fn add_entity(&mut self, marker: Marker) -> EntityId {
        let id = EntityId::new(self.next_index);
        self.next_index += 1;
        self.markers.push((id, marker));
        id
    }

    fn request_redraw(&mut self) {
        self.redraw_requests += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::GlobeScene;
    use crate::camera::{Camera, ScreenPoint, Viewport};
    use crate::components::{Billboard, Label, Marker};
    use crate::host::SceneHost;
    use foundation::math::{Geodetic, Vec3, WGS84_A};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn nadir_scene() -> GlobeScene {
        // Straight down over Lahti so the screen center lands on the site.
        let cam = Camera::looking_down_at(25.6615, 60.9827, 500.0, 0.0, -90.0, Viewport::default());
        GlobeScene::new(cam)
    }

    fn marker() -> Marker {
        Marker::new(Vec3::ZERO, Billboard::icon("/icons/greenroof.png"), Label::above_icon("x"))
    }

    #[test]
    fn center_pick_falls_through_to_globe() {
        let scene = nadir_scene();
        let center = ScreenPoint::new(640.0, 360.0);
        assert!(scene.pick_surface(center).is_none());

        let ray = scene.pick_ray(center).expect("ray");
        let hit = scene.intersect_globe(ray).expect("globe hit");
        let geo = Geodetic::from_ecef(hit);
        assert_close(geo.lon_deg, 25.6615, 1e-6);
        assert_close(geo.lat_deg, 60.9827, 1e-6);
        assert_close(geo.height_m, 0.0, 1e-3);
    }

    #[test]
    fn block_under_camera_is_picked_on_its_roof() {
        let mut scene = nadir_scene();
        scene.add_block(25.6615, 60.9827, 20.0);

        let hit = scene.pick_surface(ScreenPoint::new(640.0, 360.0)).expect("roof hit");
        let geo = Geodetic::from_ecef(hit);
        assert!(geo.height_m > 0.0, "roof sits above the ellipsoid: {}", geo.height_m);
        assert_close(geo.lat_deg, 60.9827, 1e-3);
    }

    #[test]
    fn surface_picking_can_be_disabled() {
        let mut scene = nadir_scene();
        scene.add_block(25.6615, 60.9827, 20.0);
        scene.set_surface_picking(false);
        assert!(scene.pick_surface(ScreenPoint::new(640.0, 360.0)).is_none());
    }

    #[test]
    fn sky_click_has_no_globe_hit() {
        let cam = Camera::looking_at(
            Vec3::new(3.0 * WGS84_A, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 1.0),
            Viewport::default(),
        )
        .expect("camera");
        let scene = GlobeScene::new(cam);
        let ray = scene.pick_ray(ScreenPoint::new(0.0, 0.0)).expect("ray");
        assert!(scene.intersect_globe(ray).is_none());
    }

    #[test]
    fn entities_are_appended_in_order_without_implicit_redraw() {
        let mut scene = nadir_scene();
        let a = scene.add_entity(marker());
        let b = scene.add_entity(marker());
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(scene.markers().len(), 2);
        assert_eq!(scene.redraw_requests(), 0);

        scene.request_redraw();
        assert_eq!(scene.redraw_requests(), 1);
    }
}
