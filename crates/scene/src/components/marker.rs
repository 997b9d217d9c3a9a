use foundation::math::Vec3;

use super::{Billboard, Label};

/// Billboard plus label anchored at an ECEF position.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Vec3,
    pub billboard: Billboard,
    pub label: Label,
}

impl Marker {
    pub fn new(position: Vec3, billboard: Billboard, label: Label) -> Self {
        Self {
            position,
            billboard,
            label,
        }
    }
}
