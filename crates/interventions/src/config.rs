use std::env;
use std::time::Duration;

use scene::Viewport;
use tracing::warn;

use crate::prediction::DEFAULT_PREDICT_URL;

pub const ENV_PREDICT_URL: &str = "UHI_PREDICT_URL";
pub const ENV_PREDICT_TIMEOUT_MS: &str = "UHI_PREDICT_TIMEOUT_MS";
pub const ENV_INFO_CLEAR_MS: &str = "UHI_INFO_CLEAR_MS";
pub const ENV_VIEWPORT_WIDTH: &str = "UHI_VIEWPORT_WIDTH";
pub const ENV_VIEWPORT_HEIGHT: &str = "UHI_VIEWPORT_HEIGHT";

/// Session settings. Unset or unparsable values fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub predict_url: String,
    /// `None` keeps the request open until the service answers.
    pub predict_timeout: Option<Duration>,
    /// `None` keeps each status message until the next click replaces it.
    pub info_clear_after: Option<Duration>,
    pub viewport: Viewport,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            predict_url: DEFAULT_PREDICT_URL.to_string(),
            predict_timeout: None,
            info_clear_after: None,
            viewport: Viewport::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            predict_url: lookup(ENV_PREDICT_URL)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.predict_url),
            predict_timeout: var_millis(&lookup, ENV_PREDICT_TIMEOUT_MS),
            info_clear_after: var_millis(&lookup, ENV_INFO_CLEAR_MS),
            viewport: Viewport::new(
                var_f64(&lookup, ENV_VIEWPORT_WIDTH, defaults.viewport.width),
                var_f64(&lookup, ENV_VIEWPORT_HEIGHT, defaults.viewport.height),
            ),
        }
    }
}

fn var_millis<F>(lookup: &F, key: &str) -> Option<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(0) => None,
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(err) => {
            warn!("ignoring {key}={raw:?}: {err}");
            None
        }
    }
}

fn var_f64<F>(lookup: &F, key: &str, default: f64) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => {
            warn!("ignoring {key}={raw:?}: expected a positive number");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use scene::Viewport;

    use super::PlannerConfig;

    fn config(pairs: &[(&str, &str)]) -> PlannerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PlannerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(config(&[]), PlannerConfig::default());
        assert_eq!(
            PlannerConfig::default().predict_url,
            "http://127.0.0.1:8000/api/predict"
        );
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("UHI_PREDICT_URL", "http://model:9000/api/predict"),
            ("UHI_PREDICT_TIMEOUT_MS", "1500"),
            ("UHI_INFO_CLEAR_MS", "5000"),
            ("UHI_VIEWPORT_WIDTH", "800"),
            ("UHI_VIEWPORT_HEIGHT", "600"),
        ]);
        assert_eq!(cfg.predict_url, "http://model:9000/api/predict");
        assert_eq!(cfg.predict_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(cfg.info_clear_after, Some(Duration::from_secs(5)));
        assert_eq!(cfg.viewport, Viewport::new(800.0, 600.0));
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = config(&[
            ("UHI_PREDICT_TIMEOUT_MS", "soon"),
            ("UHI_INFO_CLEAR_MS", "0"),
            ("UHI_VIEWPORT_WIDTH", "-3"),
        ]);
        assert_eq!(cfg.predict_timeout, None);
        assert_eq!(cfg.info_clear_after, None);
        assert_eq!(cfg.viewport.width, 1280.0);
    }
}
