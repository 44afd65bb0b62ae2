// Form validation error types and constants

use crate::error::ErrorCode;
use std::fmt;

/// Validation error code constants
///
/// Error code range: 4001-4002
pub struct ValidationErrorCodes {}

impl ValidationErrorCodes {
    /// Required input was empty
    pub const EMPTY_INPUT: i32 = 4001;

    /// Numeric input could not be parsed
    pub const INVALID_NUMBER: i32 = 4002;
}

/// Input validation errors
///
/// Presence and number-parsing checks only. A validation failure means the
/// request was never issued.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field left blank
    EmptyInput { field: String },

    /// Operator-supplied value is not a finite number
    InvalidNumber { input: String },
}

impl ErrorCode for ValidationError {
    fn code(&self) -> i32 {
        match self {
            ValidationError::EmptyInput { .. } => ValidationErrorCodes::EMPTY_INPUT,
            ValidationError::InvalidNumber { .. } => ValidationErrorCodes::INVALID_NUMBER,
        }
    }

    fn message(&self) -> String {
        match self {
            ValidationError::EmptyInput { field } => format!("{} must not be empty", field),
            ValidationError::InvalidNumber { input } => {
                format!("'{}' is not a valid number", input)
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ValidationError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ValidationError {}
