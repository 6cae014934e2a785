//! Recoverable per-line parse errors
//!
//! A `ParseError` means one recognized line could not be turned into a typed
//! record. It is counted and logged by the caller, never propagated as a fatal
//! [`crate::Error`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("invalid timestamp '{value}' (expected ISO-8601 date-time)")]
    InvalidTimestamp { value: String },

    #[error("invalid number for '{field}': '{value}' ({reason})")]
    InvalidNumber {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("non-finite value for '{field}': '{value}'")]
    NonFiniteValue { field: &'static str, value: String },

    #[error("negative value for '{field}': '{value}'")]
    NegativeValue { field: &'static str, value: String },
}

impl ParseError {
    /// Name of the field that caused the failure, if it is known
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ParseError::MissingField { field }
            | ParseError::InvalidNumber { field, .. }
            | ParseError::NonFiniteValue { field, .. }
            | ParseError::NegativeValue { field, .. } => Some(field),
            ParseError::InvalidTimestamp { .. } => Some(crate::constants::fields::TIMESTAMP),
        }
    }
}
