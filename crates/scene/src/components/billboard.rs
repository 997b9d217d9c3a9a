/// Which edge of a billboard or label sits on its anchor position.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum VerticalOrigin {
    #[default]
    Center,
    Top,
    Bottom,
}

/// Screen-facing image anchored at a world position.
#[derive(Debug, Clone, PartialEq)]
pub struct Billboard {
    pub image: String,
    pub vertical_origin: VerticalOrigin,
    pub scale: f32,
    /// Fixed pixel size, independent of zoom.
    pub width_px: u32,
    pub height_px: u32,
}

impl Billboard {
    /// Icon billboard standing on its anchor, drawn at a fixed 300x300 px at 0.15 scale.
    pub fn icon(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            vertical_origin: VerticalOrigin::Bottom,
            scale: 0.15,
            width_px: 300,
            height_px: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Billboard, VerticalOrigin};

    #[test]
    fn icon_stands_on_anchor() {
        let b = Billboard::icon("/icons/greenarea.png");
        assert_eq!(b.vertical_origin, VerticalOrigin::Bottom);
        assert_eq!((b.width_px, b.height_px), (300, 300));
    }
}
