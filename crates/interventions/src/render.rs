use scene::SceneHost;
use scene::components::{Billboard, Label, Marker};
use scene::entity::EntityId;

use crate::geo::GeoCoordinate;
use crate::intervention::InterventionType;
use crate::picker::PickedPoint;
use crate::prediction::PredictionResult;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IconKind {
    Tree,
    Roof,
    Water,
    Building,
}

impl IconKind {
    pub fn for_intervention(kind: InterventionType) -> Self {
        Self::for_name(kind.as_str())
    }

    /// Icon for a type name as sent on the wire; anything unrecognised gets the building icon.
    pub fn for_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "tree" => IconKind::Tree,
            "roof" => IconKind::Roof,
            "water" => IconKind::Water,
            _ => IconKind::Building,
        }
    }

    pub fn image_path(self) -> &'static str {
        match self {
            IconKind::Tree => "/icons/greenarea.png",
            IconKind::Roof => "/icons/greenroof.png",
            IconKind::Water => "/icons/waterbody.png",
            IconKind::Building => "/icons/buildingarea.png",
        }
    }
}

/// Thermal effect of an intervention, by the sign of the LST delta.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Classification {
    Cooling,
    Warming,
    NoChange,
}

impl Classification {
    pub fn from_delta(delta: f64) -> Self {
        if delta < 0.0 {
            Classification::Cooling
        } else if delta > 0.0 {
            Classification::Warming
        } else {
            Classification::NoChange
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Classification::Cooling => "🌿",
            Classification::Warming => "🔥",
            Classification::NoChange => "⚖️",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Classification::Cooling => "UHI reduced",
            Classification::Warming => "UHI increased",
            Classification::NoChange => "No significant change",
        }
    }
}

/// One placed intervention with its predicted effect.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub entity: EntityId,
    pub position: GeoCoordinate,
    pub kind: InterventionType,
    pub icon: IconKind,
    pub classification: Classification,
    pub label_text: String,
    pub status_message: String,
}

/// Two decimals, with `-0.00` folded into `0.00`.
fn two_decimals(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{v:.2}")
}

pub fn label_text(result: &PredictionResult) -> String {
    format!("ΔLST: {}°C", two_decimals(result.delta_lst))
}

pub fn status_message(result: &PredictionResult) -> String {
    let class = Classification::from_delta(result.delta_lst);
    format!(
        "{} {} | ΔLST: {}°C | New LST: {}°C",
        class.glyph(),
        class.text(),
        two_decimals(result.delta_lst),
        two_decimals(result.predicted_lst),
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationRenderer;

impl AnnotationRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Inserts exactly one marker for the click and requests a redraw.
    pub fn render<S: SceneHost + ?Sized>(
        &self,
        scene: &mut S,
        picked: &PickedPoint,
        kind: InterventionType,
        result: &PredictionResult,
    ) -> Annotation {
        let icon = IconKind::for_intervention(kind);
        let label = label_text(result);

        let marker = Marker::new(
            picked.position,
            Billboard::icon(icon.image_path()),
            Label::above_icon(label.clone()),
        );
        let entity = scene.add_entity(marker);
        scene.request_redraw();

        Annotation {
            entity,
            position: picked.coordinate,
            kind,
            icon,
            classification: Classification::from_delta(result.delta_lst),
            label_text: label,
            status_message: status_message(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use foundation::math::Geodetic;
    use pretty_assertions::assert_eq;
    use scene::{Camera, GlobeScene, Viewport};

    use super::{AnnotationRenderer, Classification, IconKind, label_text, status_message};
    use crate::geo::GeoCoordinate;
    use crate::intervention::InterventionType;
    use crate::picker::{PickSource, PickedPoint};
    use crate::prediction::PredictionResult;

    fn picked() -> PickedPoint {
        let position = Geodetic::new(25.66, 60.98, 0.0).to_ecef();
        PickedPoint {
            position,
            coordinate: GeoCoordinate::new(25.66, 60.98),
            source: PickSource::Globe,
        }
    }

    #[test]
    fn icon_table_covers_every_type() {
        assert_eq!(IconKind::for_intervention(InterventionType::Tree).image_path(), "/icons/greenarea.png");
        assert_eq!(IconKind::for_intervention(InterventionType::Roof).image_path(), "/icons/greenroof.png");
        assert_eq!(IconKind::for_intervention(InterventionType::Water).image_path(), "/icons/waterbody.png");
        assert_eq!(
            IconKind::for_intervention(InterventionType::Building).image_path(),
            "/icons/buildingarea.png"
        );
    }

    #[test]
    fn unknown_names_fall_back_to_building_icon() {
        assert_eq!(IconKind::for_name("lawn"), IconKind::Building);
        assert_eq!(IconKind::for_name(""), IconKind::Building);
        assert_eq!(IconKind::for_name("water"), IconKind::Water);
    }

    #[test]
    fn classification_follows_delta_sign() {
        assert_eq!(Classification::from_delta(-0.01), Classification::Cooling);
        assert_eq!(Classification::from_delta(0.01), Classification::Warming);
        assert_eq!(Classification::from_delta(0.0), Classification::NoChange);
        assert_eq!(Classification::from_delta(-0.0), Classification::NoChange);
    }

    #[test]
    fn cooling_message_uses_two_decimals() {
        let result = PredictionResult::new(30.1, -2.5);
        assert_eq!(
            status_message(&result),
            "🌿 UHI reduced | ΔLST: -2.50°C | New LST: 30.10°C"
        );
        assert_eq!(label_text(&result), "ΔLST: -2.50°C");
    }

    #[test]
    fn zero_result_reads_as_no_change() {
        let result = PredictionResult::new(0.0, -0.0);
        assert_eq!(
            status_message(&result),
            "⚖️ No significant change | ΔLST: 0.00°C | New LST: 0.00°C"
        );
    }

    #[test]
    fn render_adds_one_marker_and_requests_redraw() {
        let mut scene = GlobeScene::new(Camera::looking_down_at(
            25.66,
            60.98,
            250.0,
            0.0,
            -35.0,
            Viewport::default(),
        ));
        let pick = picked();
        let annotation = AnnotationRenderer::new().render(
            &mut scene,
            &pick,
            InterventionType::Tree,
            &PredictionResult::new(31.0, 0.75),
        );

        assert_eq!(scene.markers().len(), 1);
        assert_eq!(scene.redraw_requests(), 1);
        let (entity, marker) = &scene.markers()[0];
        assert_eq!(*entity, annotation.entity);
        assert_eq!(marker.position, pick.position);
        assert_eq!(marker.billboard.image, "/icons/greenarea.png");
        assert_eq!(marker.label.text, "ΔLST: 0.75°C");
        assert_eq!(annotation.classification, Classification::Warming);
        assert_eq!(annotation.position, GeoCoordinate::new(25.66, 60.98));
    }
}
