use foundation::math::{Geodetic, LocalFrame, Vec3};

use crate::picking::Ray;

/// A 2D screen coordinate in pixels, origin at the top-left of the viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Perspective camera in ECEF space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    /// Unit view direction.
    pub forward: Vec3,
    /// Unit up vector, orthogonal to `forward`.
    pub up: Vec3,
    pub fov_y_rad: f64,
    pub viewport: Viewport,
}

impl Camera {
    pub const DEFAULT_FOV_Y_DEG: f64 = 45.0;

    /// Camera at `eye` looking at `target`, with `world_up` fixing the roll.
    ///
    /// Returns `None` when `eye == target` or `world_up` is parallel to the view direction.
    pub fn looking_at(eye: Vec3, target: Vec3, world_up: Vec3, viewport: Viewport) -> Option<Self> {
        let forward = (target - eye).normalize()?;
        let right = forward.cross(world_up).normalize()?;
        let up = right.cross(forward);
        Some(Self {
            eye,
            forward,
            up,
            fov_y_rad: Self::DEFAULT_FOV_Y_DEG.to_radians(),
            viewport,
        })
    }

    /// Camera hovering `height_m` above a geographic location.
    ///
    /// `heading_deg` is clockwise from north; negative `pitch_deg` looks down.
    pub fn looking_down_at(
        lon_deg: f64,
        lat_deg: f64,
        height_m: f64,
        heading_deg: f64,
        pitch_deg: f64,
        viewport: Viewport,
    ) -> Self {
        let frame = LocalFrame::at(Geodetic::new(lon_deg, lat_deg, height_m));
        let (sin_h, cos_h) = heading_deg.to_radians().sin_cos();
        let (sin_p, cos_p) = pitch_deg.to_radians().sin_cos();
        let horizontal = frame.direction(sin_h, cos_h, 0.0);

        Self {
            eye: frame.origin,
            forward: horizontal.scale(cos_p) + frame.up.scale(sin_p),
            up: horizontal.scale(-sin_p) + frame.up.scale(cos_p),
            fov_y_rad: Self::DEFAULT_FOV_Y_DEG.to_radians(),
            viewport,
        }
    }

    /// World ray through a pixel of the viewport.
    ///
    /// `None` for a degenerate viewport or a point outside it.
    pub fn ray_through(&self, point: ScreenPoint) -> Option<Ray> {
        let w = self.viewport.width;
        let h = self.viewport.height;
        if w <= 1.0 || h <= 1.0 || !self.viewport.contains(point) {
            return None;
        }
        let aspect = w / h;
        let tan = (0.5 * self.fov_y_rad).tan();

        let right = self.forward.cross(self.up).normalize()?;
        let up = right.cross(self.forward);

        let ndc_x = (2.0 * (point.x / w) - 1.0) * aspect;
        let ndc_y = 1.0 - 2.0 * (point.y / h);

        let dir = (self.forward + right.scale(ndc_x * tan) + up.scale(ndc_y * tan)).normalize()?;
        Some(Ray::new(self.eye, dir))
    }
}
