use foundation::math::Vec3;

/// Axis-aligned ECEF box standing in for rendered geometry such as a building block.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl SurfaceBox {
    pub fn cube(center: Vec3, half_extent: f64) -> Self {
        let h = Vec3::new(half_extent, half_extent, half_extent);
        Self {
            min: center - h,
            max: center + h,
        }
    }

    /// Distance along unit `dir` at which a ray enters the box, 0 if it starts inside.
    pub fn entry_distance(&self, origin: Vec3, dir: Vec3, max_distance: f64) -> Option<f64> {
        let (lo, hi) = (self.min.as_array(), self.max.as_array());
        let (o, d) = (origin.as_array(), dir.as_array());
        let mut near = 0.0_f64;
        let mut far = max_distance;

        for axis in 0..3 {
            if d[axis].abs() < 1e-12 {
                // Parallel to this slab pair.
                if o[axis] < lo[axis] || o[axis] > hi[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d[axis];
            let a = (lo[axis] - o[axis]) * inv;
            let b = (hi[axis] - o[axis]) * inv;
            near = near.max(a.min(b));
            far = far.min(a.max(b));
            if far < near {
                return None;
            }
        }
        Some(near)
    }
}

#[cfg(test)]
mod tests {
    use super::SurfaceBox;
    use foundation::math::Vec3;

    #[test]
    fn cube_is_centered() {
        let b = SurfaceBox::cube(Vec3::new(10.0, 0.0, 0.0), 2.0);
        assert_eq!(b.min, Vec3::new(8.0, -2.0, -2.0));
        assert_eq!(b.max, Vec3::new(12.0, 2.0, 2.0));
    }

    #[test]
    fn entry_distance_from_outside_and_inside() {
        let b = SurfaceBox::cube(Vec3::new(5.0, 0.0, 0.0), 1.0);
        let x = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(b.entry_distance(Vec3::ZERO, x, f64::MAX), Some(4.0));
        assert_eq!(b.entry_distance(Vec3::new(5.0, 0.0, 0.0), x, f64::MAX), Some(0.0));
    }

    #[test]
    fn box_behind_or_beside_the_ray_is_missed() {
        let b = SurfaceBox::cube(Vec3::new(5.0, 0.0, 0.0), 1.0);
        assert_eq!(b.entry_distance(Vec3::ZERO, Vec3::new(-1.0, 0.0, 0.0), f64::MAX), None);
        assert_eq!(b.entry_distance(Vec3::new(0.0, 3.0, 0.0), Vec3::new(1.0, 0.0, 0.0), f64::MAX), None);
        assert_eq!(b.entry_distance(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 3.0), None);
    }
}
