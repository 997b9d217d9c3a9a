//! Request/response boundary to the LST prediction service.
//!
//! The service payload is loosely shaped: any numeric field may be missing and
//! the delta is published under two names. [`PredictionResponse`] mirrors the
//! wire record with every field optional; [`PredictionResult`] is the resolved
//! form with defaults applied, which is all the renderer ever sees.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::geo::GeoCoordinate;
use crate::intervention::InterventionType;

pub const DEFAULT_PREDICT_URL: &str = "http://127.0.0.1:8000/api/predict";

/// Body of `POST /api/predict`: exactly `{"type", "lon", "lat"}`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    #[serde(rename = "type")]
    pub kind: InterventionType,
    pub lon: f64,
    pub lat: f64,
}

impl PredictionRequest {
    pub fn new(kind: InterventionType, coordinate: GeoCoordinate) -> Self {
        Self {
            kind,
            lon: coordinate.longitude,
            lat: coordinate.latitude,
        }
    }
}

/// Wire record returned by the service. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PredictionResponse {
    #[serde(rename = "predicted_LST", default, deserialize_with = "lenient_f64")]
    pub predicted_lst: Option<f64>,
    #[serde(rename = "delta_LST", default, deserialize_with = "lenient_f64")]
    pub delta_lst: Option<f64>,
    #[serde(rename = "LST_change", default, deserialize_with = "lenient_f64")]
    pub lst_change: Option<f64>,
    #[serde(rename = "current_LST", default, deserialize_with = "lenient_f64")]
    pub current_lst: Option<f64>,
    /// Set by the service when it rejects a request with a success status.
    #[serde(default, deserialize_with = "lenient_text")]
    pub error: Option<String>,
}

impl PredictionResponse {
    /// `delta_LST` first, `LST_change` as its synonym.
    pub fn delta(&self) -> Option<f64> {
        self.delta_lst.or(self.lst_change)
    }

    pub fn has_any_value(&self) -> bool {
        self.delta().is_some() || self.predicted_lst.is_some()
    }
}

/// Prediction with absent numbers defaulted to 0.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PredictionResult {
    pub predicted_lst: f64,
    pub delta_lst: f64,
    pub current_lst: Option<f64>,
}

impl PredictionResult {
    pub fn new(predicted_lst: f64, delta_lst: f64) -> Self {
        Self {
            predicted_lst,
            delta_lst,
            current_lst: None,
        }
    }
}

impl From<PredictionResponse> for PredictionResult {
    fn from(resp: PredictionResponse) -> Self {
        Self {
            predicted_lst: resp.predicted_lst.unwrap_or(0.0),
            delta_lst: resp.delta().unwrap_or(0.0),
            current_lst: resp.current_lst,
        }
    }
}

/// Every way the service can fail to produce a prediction.
///
/// The pipeline treats all variants alike; they are distinguished for logs only.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("prediction request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("prediction service returned HTTP {status}")]
    Status { status: u16 },
    #[error("prediction response is not a JSON object: {reason}")]
    Malformed { reason: String },
    #[error("prediction service rejected the request: {0}")]
    Service(String),
    #[error("prediction request timed out after {0:?}")]
    Timeout(Duration),
}

/// The prediction boundary. One call per click, no retries.
#[async_trait]
pub trait Predictor: Send + Sync + 'static {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError>;
}

/// Decodes a response body into a result, applying the leniency rules.
pub fn decode_response(body: &[u8]) -> Result<PredictionResult, PredictionError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| PredictionError::Malformed {
            reason: e.to_string(),
        })?;
    if !value.is_object() {
        return Err(PredictionError::Malformed {
            reason: format!("expected object, got {}", json_kind(&value)),
        });
    }
    let resp: PredictionResponse =
        serde_json::from_value(value).map_err(|e| PredictionError::Malformed {
            reason: e.to_string(),
        })?;

    if let Some(message) = resp.error {
        return Err(PredictionError::Service(message));
    }
    if !resp.has_any_value() {
        debug!("prediction response carries no numeric fields; defaulting to 0");
    }
    Ok(resp.into())
}

/// HTTP implementation of [`Predictor`] over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    http: reqwest::Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpPredictor {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    /// Fails requests that take longer than `timeout`. Without it a stalled
    /// service leaves the click waiting forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn exchange(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError> {
        let resp = self.http.post(&self.endpoint).json(request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(PredictionError::Status {
                status: status.as_u16(),
            });
        }
        let body = resp.bytes().await?;
        decode_response(&body)
    }
}

#[async_trait]
impl Predictor for HttpPredictor {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError> {
        info!(
            kind = %request.kind,
            lon = request.lon,
            lat = request.lat,
            endpoint = %self.endpoint,
            "requesting prediction"
        );
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.exchange(request))
                .await
                .map_err(|_| PredictionError::Timeout(limit))?,
            None => self.exchange(request).await,
        }?;
        info!(
            delta = result.delta_lst,
            predicted = result.predicted_lst,
            current = ?result.current_lst,
            "prediction received"
        );
        Ok(result)
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()).filter(|v| v.is_finite()))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
