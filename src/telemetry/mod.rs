//! Telemetry wire model and decoding.
//!
//! The backend pushes one JSON object per websocket text frame. Each object
//! is the complete current reading: fields it leaves out are absent, not
//! "unchanged".

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

pub mod events;

pub use events::{CloseReason, ConnectionStatus, StreamEvent};

/// Latest telemetry reading. Every field stays `None` until a message
/// carries it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TelemetrySnapshot {
    /// Treatment progress, nominally 0-100. Stored as received; clamping is
    /// a display concern.
    pub progress_score: Option<f64>,
    pub insight: Option<String>,
    /// Heart-rate variability in milliseconds
    pub hrv: Option<f64>,
    pub avg_sentiment: Option<f64>,
    pub symptom_score: Option<f64>,
    pub clinical_biomarker: Option<f64>,
}

impl TelemetrySnapshot {
    pub fn is_empty(&self) -> bool {
        self == &TelemetrySnapshot::default()
    }
}

/// Reasons a frame could not become a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Not JSON at all
    Syntax(String),
    /// Valid JSON but not an object
    NotAnObject,
    /// Object with a field of the wrong type
    Shape(String),
    /// Binary frames are not part of the protocol
    Binary { len: usize },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Syntax(reason) => write!(f, "invalid JSON: {}", reason),
            DecodeError::NotAnObject => f.write_str("payload is not a JSON object"),
            DecodeError::Shape(reason) => write!(f, "unexpected field type: {}", reason),
            DecodeError::Binary { len } => write!(f, "unexpected binary frame ({} bytes)", len),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decode one text frame into a snapshot.
pub fn decode_snapshot(text: &str) -> Result<TelemetrySnapshot, DecodeError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|err| DecodeError::Syntax(err.to_string()))?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    serde_json::from_value(value).map_err(|err| DecodeError::Shape(err.to_string()))
}

/// Counters kept by a running subscriber.
#[derive(Debug, Default)]
pub struct SubscriberStats {
    frames_received: AtomicU64,
    snapshots_applied: AtomicU64,
    decode_failures: AtomicU64,
}

/// Plain copy of [`SubscriberStats`] for reporting.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriberStatsSnapshot {
    pub frames_received: u64,
    pub snapshots_applied: u64,
    pub decode_failures: u64,
}

impl SubscriberStats {
    pub fn record_frame(&self) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_snapshot(&self) {
        self.snapshots_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> SubscriberStatsSnapshot {
        SubscriberStatsSnapshot {
            frames_received: self.frames_received.load(Ordering::Relaxed),
            snapshots_applied: self.snapshots_applied.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
        }
    }
}
