// Configuration error types and constants

use crate::error::ErrorCode;
use log::warn;
use std::fmt;

/// Configuration error code constants
///
/// Error code range: 5001-5002
pub struct ConfigErrorCodes {}

impl ConfigErrorCodes {
    /// Base URL or joined endpoint is not a valid URL
    pub const INVALID_URL: i32 = 5001;

    /// Config file could not be read or parsed
    pub const UNREADABLE: i32 = 5002;
}

/// Log a configuration problem. Config errors fall back to defaults, so
/// they are reported at warn level.
pub fn log_config_error(err: &ConfigError, context: &str) {
    warn!(
        "Config error in {}: code={}, component=Config, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Value for `key` does not form a valid URL
    InvalidUrl { key: String, value: String },

    /// Config file missing or malformed
    Unreadable { path: String, reason: String },
}

impl ErrorCode for ConfigError {
    fn code(&self) -> i32 {
        match self {
            ConfigError::InvalidUrl { .. } => ConfigErrorCodes::INVALID_URL,
            ConfigError::Unreadable { .. } => ConfigErrorCodes::UNREADABLE,
        }
    }

    fn message(&self) -> String {
        match self {
            ConfigError::InvalidUrl { key, value } => {
                format!("Invalid URL for {}: '{}'", key, value)
            }
            ConfigError::Unreadable { path, reason } => {
                format!("Could not load config {}: {}", path, reason)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConfigError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ConfigError {}
