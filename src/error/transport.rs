// Transport error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Transport error code constants
///
/// Error code range: 3001-3005
pub struct TransportErrorCodes {}

impl TransportErrorCodes {
    /// Connection refused, DNS failure, or websocket handshake rejected
    pub const CONNECT: i32 = 3001;

    /// Backend answered with a non-2xx status
    pub const STATUS: i32 = 3002;

    /// Response body could not be decoded
    pub const DECODE: i32 = 3003;

    /// Connection closed before a response arrived
    pub const CLOSED: i32 = 3004;

    /// Request could not be built or sent
    pub const REQUEST: i32 = 3005;
}

/// Log a transport error with structured context
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_transport_error(err: &TransportError, context: &str) {
    error!(
        "Transport error in {}: code={}, component=Backend, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Backend transport errors
///
/// These cover every way an outbound request or the telemetry stream can
/// fail. None of them is fatal: callers degrade to a visible view state.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Could not reach the backend
    Connect { reason: String },

    /// Backend replied with a non-success status
    Status { status: u16 },

    /// Response payload did not match the expected shape
    Decode { reason: String },

    /// Connection closed unexpectedly
    Closed,

    /// Request failed for another reason (body, redirect, builder)
    Request { reason: String },
}

impl ErrorCode for TransportError {
    fn code(&self) -> i32 {
        match self {
            TransportError::Connect { .. } => TransportErrorCodes::CONNECT,
            TransportError::Status { .. } => TransportErrorCodes::STATUS,
            TransportError::Decode { .. } => TransportErrorCodes::DECODE,
            TransportError::Closed => TransportErrorCodes::CLOSED,
            TransportError::Request { .. } => TransportErrorCodes::REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            TransportError::Connect { reason } => {
                format!("Could not reach backend: {}", reason)
            }
            TransportError::Status { status } => {
                format!("Server responded with an error: HTTP {}", status)
            }
            TransportError::Decode { reason } => {
                format!("Malformed response: {}", reason)
            }
            TransportError::Closed => "Connection closed".to_string(),
            TransportError::Request { reason } => format!("Request failed: {}", reason),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TransportError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            TransportError::Status {
                status: status.as_u16(),
            }
        } else if err.is_connect() || err.is_timeout() {
            TransportError::Connect {
                reason: err.to_string(),
            }
        } else if err.is_body() {
            // Connection dropped while the body was in flight
            TransportError::Closed
        } else if err.is_decode() {
            TransportError::Decode {
                reason: err.to_string(),
            }
        } else {
            TransportError::Request {
                reason: err.to_string(),
            }
        }
    }
}

impl From<crate::error::ConfigError> for TransportError {
    fn from(err: crate::error::ConfigError) -> Self {
        TransportError::Request {
            reason: err.message(),
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode {
            reason: err.to_string(),
        }
    }
}
