//! Validation errors for incoming feed records

use thiserror::Error;

/// Why a feed record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is malformed: {reason}")]
    Malformed { field: &'static str, reason: String },

    #[error("{field} must be a valid date, got '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("{field} must be finite and non-negative")]
    InvalidPrice { field: &'static str },
}
