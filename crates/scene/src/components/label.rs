use super::VerticalOrigin;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LabelDraw {
    Fill,
    Outline,
    #[default]
    FillAndOutline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub font: String,
    pub fill_color: [f32; 4],
    pub outline_color: [f32; 4],
    pub outline_width_px: f32,
    pub draw: LabelDraw,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font: "16px sans-serif".to_string(),
            fill_color: [0.0, 0.0, 0.0, 1.0],
            outline_color: [0.0, 0.0, 0.0, 1.0],
            outline_width_px: 2.0,
            draw: LabelDraw::FillAndOutline,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub style: LabelStyle,
    pub vertical_origin: VerticalOrigin,
    /// Screen-space offset from the anchor, in pixels (negative y is up).
    pub pixel_offset: [f64; 2],
}

impl Label {
    /// Label hung above a billboard icon.
    pub fn above_icon(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LabelStyle::default(),
            vertical_origin: VerticalOrigin::Top,
            pixel_offset: [0.0, -50.0],
        }
    }
}
