//! Event and status types flowing from the telemetry subscriber into the
//! dashboard view state.

use serde::{Deserialize, Serialize};

use super::TelemetrySnapshot;

/// Connection lifecycle shown next to the dashboard title.
///
/// `Disconnected` is terminal for a mounted dashboard: there is no reconnect.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting",
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Disconnected => "Disconnected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ConnectionStatus::Disconnected)
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Why the stream ended. Only used for logging; readers of the view state
/// see a plain `Disconnected`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// Server sent a close frame or the stream ended cleanly
    Normal,
    /// Transport error while reading
    Error,
    /// Handshake never completed
    Handshake,
    /// Dashboard was unmounted and closed the socket itself
    Unmounted,
}

/// Everything the subscriber can tell the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StreamEvent {
    Opened,
    Snapshot(TelemetrySnapshot),
    Malformed { reason: String },
    Closed { reason: CloseReason },
}
