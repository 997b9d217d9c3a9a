use std::sync::Arc;

use parking_lot::Mutex;
use scene::{SceneHost, ScreenPoint};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::geo::GeoCoordinate;
use crate::info::{InfoBoard, LogNotifier, Notifier};
use crate::picker::{PickFailure, pick};
use crate::prediction::{PredictionError, PredictionRequest, Predictor};
use crate::render::{Annotation, AnnotationRenderer};
use crate::tool::ToolSelector;

pub const PREDICTION_FAILED_ALERT: &str = "Failed to contact backend server.";

/// Terminal state of one click.
#[derive(Debug)]
pub enum ClickOutcome {
    /// Nothing pickable under the click. Logged only.
    PickFailed(PickFailure),
    /// A location was picked but no tool was active. Logged only.
    NoToolSelected(GeoCoordinate),
    /// The prediction call failed; the user was alerted.
    RequestFailed(PredictionError),
    Rendered(Annotation),
}

impl ClickOutcome {
    pub fn annotation(&self) -> Option<&Annotation> {
        match self {
            ClickOutcome::Rendered(a) => Some(a),
            _ => None,
        }
    }
}

/// Runs each click through pick → tool read → predict → render.
///
/// Clicks are independent and may overlap; the only suspension point inside a
/// click is the prediction call, so responses can land out of click order. The
/// scene lock is held only for the synchronous pick and render steps.
pub struct ClickOrchestrator<S, P> {
    scene: Arc<Mutex<S>>,
    tools: ToolSelector,
    predictor: Arc<P>,
    renderer: AnnotationRenderer,
    info: InfoBoard,
    notifier: Arc<dyn Notifier>,
}

impl<S, P> ClickOrchestrator<S, P>
where
    S: SceneHost + Send + 'static,
    P: Predictor,
{
    pub fn new(scene: Arc<Mutex<S>>, tools: ToolSelector, predictor: Arc<P>) -> Self {
        Self {
            scene,
            tools,
            predictor,
            renderer: AnnotationRenderer::new(),
            info: InfoBoard::default(),
            notifier: Arc::new(LogNotifier),
        }
    }

    pub fn with_info_board(mut self, info: InfoBoard) -> Self {
        self.info = info;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn scene(&self) -> &Arc<Mutex<S>> {
        &self.scene
    }

    pub fn tools(&self) -> &ToolSelector {
        &self.tools
    }

    pub fn info(&self) -> &InfoBoard {
        &self.info
    }

    pub async fn handle_click(&self, point: ScreenPoint) -> ClickOutcome {
        let picked = match pick(&*self.scene.lock(), point) {
            Ok(picked) => picked,
            Err(failure) => {
                warn!("could not determine position: {failure}");
                return ClickOutcome::PickFailed(failure);
            }
        };

        // Read at this moment, not at click time: a tool switch in between wins.
        let Some(tool) = self.tools.current() else {
            warn!(
                lon = picked.coordinate.longitude,
                lat = picked.coordinate.latitude,
                "no active tool selected"
            );
            return ClickOutcome::NoToolSelected(picked.coordinate);
        };

        let request = PredictionRequest::new(tool, picked.coordinate);
        let result = match self.predictor.predict(&request).await {
            Ok(result) => result,
            Err(err) => {
                error!("prediction failed for {tool} at ({}, {}): {err}", request.lon, request.lat);
                self.notifier.alert(PREDICTION_FAILED_ALERT);
                return ClickOutcome::RequestFailed(err);
            }
        };

        let annotation = {
            let mut scene = self.scene.lock();
            self.renderer.render(&mut *scene, &picked, tool, &result)
        };
        self.info.set(annotation.status_message.clone());
        info!(
            entity = annotation.entity.index(),
            kind = %tool,
            "{}",
            annotation.status_message
        );
        ClickOutcome::Rendered(annotation)
    }

    /// Runs a click as its own task so later clicks need not wait for it.
    pub fn spawn_click(self: &Arc<Self>, point: ScreenPoint) -> JoinHandle<ClickOutcome> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.handle_click(point).await })
    }
}
