use foundation::math::Vec3;

use crate::camera::ScreenPoint;
use crate::components::Marker;
use crate::entity::EntityId;
use crate::picking::Ray;

/// What the interaction pipeline needs from the 3D renderer.
///
/// Redraw is on-demand: inserting an entity does not repaint until
/// [`SceneHost::request_redraw`] is called.
pub trait SceneHost {
    /// Precise pick against rendered geometry (terrain, buildings).
    fn pick_surface(&self, point: ScreenPoint) -> Option<Vec3>;

    /// Camera ray through a screen point.
    fn pick_ray(&self, point: ScreenPoint) -> Option<Ray>;

    /// Intersection of a ray with the bare globe.
    fn intersect_globe(&self, ray: Ray) -> Option<Vec3>;

    fn add_entity(&mut self, marker: Marker) -> EntityId;

    fn request_redraw(&mut self);
}
