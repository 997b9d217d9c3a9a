mod command;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use interventions::{
    ClickOrchestrator, ClickOutcome, GeoCoordinate, HttpPredictor, InfoBoard, InterventionType,
    Notifier, PlannerConfig, ToolSelector,
};
use parking_lot::Mutex;
use scene::{Camera, GlobeScene, Viewport};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::command::{Command, HELP, parse_command};

/// Lahti city centre, looking down at the old town.
const START_LON: f64 = 25.6615;
const START_LAT: f64 = 60.9827;
const START_HEIGHT_M: f64 = 250.0;
const START_PITCH_DEG: f64 = -35.0;

#[derive(Parser, Debug)]
#[command(author, version, about = "Place urban heat island interventions and preview their effect")]
struct Args {
    /// Prediction endpoint (overrides UHI_PREDICT_URL)
    #[arg(long)]
    predict_url: Option<String>,

    /// Prediction timeout in milliseconds, 0 to wait forever
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Clear the status message after this many milliseconds, 0 to keep it
    #[arg(long)]
    info_clear_ms: Option<u64>,

    /// Viewport width in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Viewport height in pixels
    #[arg(long)]
    height: Option<f64>,

    /// Pickable building block: lon,lat,halfExtentMeters (repeatable)
    #[arg(long = "block")]
    blocks: Vec<String>,
}

impl Args {
    fn apply(&self, config: &mut PlannerConfig) {
        if let Some(url) = &self.predict_url {
            config.predict_url = url.clone();
        }
        if let Some(ms) = self.timeout_ms {
            config.predict_timeout = millis(ms);
        }
        if let Some(ms) = self.info_clear_ms {
            config.info_clear_after = millis(ms);
        }
        config.viewport = Viewport::new(
            viewport_side("width", self.width, config.viewport.width),
            viewport_side("height", self.height, config.viewport.height),
        );
    }
}

/// A non-positive viewport would turn every click into a pick failure.
fn viewport_side(flag: &str, value: Option<f64>, fallback: f64) -> f64 {
    match value {
        None => fallback,
        Some(v) if v.is_finite() && v > 0.0 => v,
        Some(v) => {
            warn!("ignoring --{flag} {v}: expected a positive number");
            fallback
        }
    }
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

fn parse_block(block: &str) -> Result<(f64, f64, f64), Box<dyn std::error::Error>> {
    let parts: Vec<_> = block.split(',').collect();
    if parts.len() != 3 {
        return Err("block must be lon,lat,halfExtentMeters".into());
    }
    let lon: f64 = parts[0].trim().parse()?;
    let lat: f64 = parts[1].trim().parse()?;
    let half: f64 = parts[2].trim().parse()?;
    if !half.is_finite() || half <= 0.0 {
        return Err("block half extent must be positive".into());
    }
    Ok((lon, lat, half))
}

/// Prints the blocking alert the desktop view would pop up.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("[alert] {message}");
    }
}

type Planner = ClickOrchestrator<GlobeScene, HttpPredictor>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = PlannerConfig::from_env();
    args.apply(&mut config);

    let camera = Camera::looking_down_at(
        START_LON,
        START_LAT,
        START_HEIGHT_M,
        0.0,
        START_PITCH_DEG,
        config.viewport,
    );
    let mut globe = GlobeScene::new(camera);
    for block in &args.blocks {
        let (lon, lat, half) = parse_block(block)?;
        globe.add_block(lon, lat, half);
    }

    let predictor = HttpPredictor::new(config.predict_url.clone())
        .with_timeout(config.predict_timeout);
    info!(
        endpoint = predictor.endpoint(),
        width = config.viewport.width,
        height = config.viewport.height,
        blocks = args.blocks.len(),
        "planner ready"
    );

    let planner: Arc<Planner> = Arc::new(
        ClickOrchestrator::new(Arc::new(Mutex::new(globe)), ToolSelector::new(), Arc::new(predictor))
            .with_info_board(InfoBoard::new(config.info_clear_after))
            .with_notifier(Arc::new(StderrNotifier)),
    );

    println!("tools:");
    for kind in InterventionType::ALL {
        println!("  {:<9} {}", kind.as_str(), kind.title());
    }

    let mut in_flight: Vec<JoinHandle<ClickOutcome>> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        match command {
            Command::Tool(kind) => {
                planner.tools().select(kind);
                println!("active tool: {}", kind.title());
            }
            Command::Click(point) => in_flight.push(planner.spawn_click(point)),
            Command::Wait => drain(&mut in_flight).await,
            Command::Markers => print_markers(&planner),
            Command::Info => match planner.info().current() {
                Some(message) => println!("{message}"),
                None => println!("(no message)"),
            },
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }

        for outcome in reap_finished(&mut in_flight).await {
            report(&outcome);
        }
    }

    drain(&mut in_flight).await;
    Ok(())
}

async fn drain(in_flight: &mut Vec<JoinHandle<ClickOutcome>>) {
    for handle in in_flight.drain(..) {
        match handle.await {
            Ok(outcome) => report(&outcome),
            Err(err) => warn!("click task ended abnormally: {err}"),
        }
    }
}

/// Collects the outcomes of clicks that already finished, keeping the rest in flight.
async fn reap_finished(in_flight: &mut Vec<JoinHandle<ClickOutcome>>) -> Vec<ClickOutcome> {
    let (done, pending): (Vec<_>, Vec<_>) = in_flight.drain(..).partition(|h| h.is_finished());
    *in_flight = pending;

    let mut outcomes = Vec::with_capacity(done.len());
    for handle in done {
        match handle.await {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => warn!("click task ended abnormally: {err}"),
        }
    }
    outcomes
}

fn report(outcome: &ClickOutcome) {
    match outcome {
        ClickOutcome::PickFailed(failure) => println!("click ignored: {failure}"),
        ClickOutcome::NoToolSelected(at) => println!(
            "click ignored at ({:.6}, {:.6}): no tool selected",
            at.longitude, at.latitude
        ),
        ClickOutcome::RequestFailed(err) => println!("prediction failed: {err}"),
        ClickOutcome::Rendered(annotation) => println!(
            "{} at ({:.6}, {:.6}): {}",
            annotation.kind.title(),
            annotation.position.longitude,
            annotation.position.latitude,
            annotation.status_message
        ),
    }
}

fn print_markers(planner: &Planner) {
    let scene = planner.scene().lock();
    let markers: Vec<_> = scene
        .markers()
        .iter()
        .map(|(id, marker)| {
            let at = GeoCoordinate::from_ecef(marker.position);
            json!({
                "entity": id.index(),
                "lon": at.longitude,
                "lat": at.latitude,
                "icon": marker.billboard.image,
                "label": marker.label.text,
            })
        })
        .collect();
    println!("{}", json!(markers));
}
