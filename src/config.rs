//! Configuration management for backend endpoints and emitter constants
//!
//! Values come from built-in defaults, optionally overlaid by a JSON file
//! named in `CARE_CONFIG`, then by the `CARE_API_BASE_URL` and
//! `CARE_WS_BASE_URL` environment variables. The defaults point at a
//! backend on localhost for development.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

use crate::error::{log_config_error, ConfigError};

pub const CONFIG_PATH_VAR: &str = "CARE_CONFIG";
pub const API_BASE_VAR: &str = "CARE_API_BASE_URL";
pub const WS_BASE_VAR: &str = "CARE_WS_BASE_URL";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_WS_BASE_URL: &str = "ws://localhost:8000";

/// Backend paths, relative to the base URLs.
pub mod paths {
    pub const HEALTH_DATA_STREAM: &str = "/api/ws/health-data";
    pub const HEALTH_CONNECT_DATA: &str = "/api/health-connect-data";
    pub const CLINICAL_DATA: &str = "/api/clinical-data";
    pub const JOURNAL: &str = "/api/journal";
    pub const SYMPTOM_ANALYSIS: &str = "/api/symptom-analysis";
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub endpoints: EndpointConfig,
    pub emitters: EmitterConfig,
}

/// Base URLs for the REST API and the telemetry stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EndpointConfig {
    /// HTTP base, e.g. `http://localhost:8000`
    pub api_base_url: String,
    /// Streaming base, e.g. `ws://localhost:8000`
    pub ws_base_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            ws_base_url: DEFAULT_WS_BASE_URL.to_string(),
        }
    }
}

impl EndpointConfig {
    /// Full URL for a REST path under the API base.
    pub fn http_url(&self, path: &str) -> Result<Url, ConfigError> {
        join_url("api_base_url", &self.api_base_url, path)
    }

    /// Full URL for a streaming path under the websocket base.
    pub fn ws_url(&self, path: &str) -> Result<Url, ConfigError> {
        join_url("ws_base_url", &self.ws_base_url, path)
    }

    /// Telemetry stream endpoint
    pub fn health_stream_url(&self) -> Result<Url, ConfigError> {
        self.ws_url(paths::HEALTH_DATA_STREAM)
    }
}

/// Synthetic values used by the stimulus emitters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmitterConfig {
    /// HRV (ms) sent by the wearable simulation. Low values read as stress.
    pub wearable_hrv: f64,
    /// Pre-filled answer for the lab result prompt
    pub default_biomarker_level: f64,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            wearable_hrv: 25.0,
            default_biomarker_level: 8.5,
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or defaults if the file is missing or the
    /// JSON is invalid. Missing keys take their default values.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_file(&path) {
            Ok(config) => {
                log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                config
            }
            Err(err) => {
                log_config_error(&err, "load_from_file");
                Self::default()
            }
        }
    }

    fn try_load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let display = path.as_ref().display().to_string();
        let contents = fs::read_to_string(&path).map_err(|err| ConfigError::Unreadable {
            path: display.clone(),
            reason: err.to_string(),
        })?;
        serde_json::from_str(&contents).map_err(|err| ConfigError::Unreadable {
            path: display,
            reason: err.to_string(),
        })
    }

    /// Resolve configuration from the process environment
    pub fn load() -> Self {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.is_empty() => Self::load_from_file(path),
            _ => Self::default(),
        };
        config.apply_env_with(|key| std::env::var(key).ok());
        config
    }

    /// Overlay base URLs from an environment lookup. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api) = lookup(API_BASE_VAR).filter(|v| !v.trim().is_empty()) {
            self.endpoints.api_base_url = api.trim().to_string();
        }
        if let Some(ws) = lookup(WS_BASE_VAR).filter(|v| !v.trim().is_empty()) {
            self.endpoints.ws_base_url = ws.trim().to_string();
        }
    }
}

fn join_url(key: &str, base: &str, path: &str) -> Result<Url, ConfigError> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|_| ConfigError::InvalidUrl {
        key: key.to_string(),
        value: base.to_string(),
    })
}
