use foundation::math::Vec3;

use crate::components::SurfaceBox;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir.scale(t)
    }
}

/// Nearest surface hit along a camera ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceHit {
    pub surface: usize,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
        }
    }
}

/// Nearest surface along the ray, measured in meters along its normalized direction.
///
/// Equal distances resolve to the lower surface index, so repeated picks of
/// overlapping geometry are stable.
pub fn pick_surfaces(surfaces: &[SurfaceBox], ray: Ray, opts: PickOptions) -> Option<SurfaceHit> {
    let unit = Ray::new(ray.origin, ray.dir.normalize()?);

    let (surface, distance) = surfaces
        .iter()
        .enumerate()
        .filter_map(|(i, s)| Some((i, s.entry_distance(unit.origin, unit.dir, opts.max_distance)?)))
        .fold(None, |best: Option<(usize, f64)>, (i, t)| match best {
            Some((_, bt)) if t.total_cmp(&bt).is_ge() => best,
            _ => Some((i, t)),
        })?;

    Some(SurfaceHit {
        surface,
        distance,
        point: unit.at(distance),
    })
}
