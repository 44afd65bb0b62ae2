// Error types for the care companion client
//
// This module defines the error types for backend transport, form validation,
// and configuration, each carrying a stable numeric code for CLI exit reporting
// and log correlation.

mod config;
mod transport;
mod validation;

pub use config::{log_config_error, ConfigError, ConfigErrorCodes};
pub use transport::{log_transport_error, TransportError, TransportErrorCodes};
pub use validation::{ValidationError, ValidationErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the library and the CLI.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
