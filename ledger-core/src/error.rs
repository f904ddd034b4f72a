//! Recoverable per-row failures.
//!
//! None of these abort a batch. Whoever hits one substitutes a default value,
//! logs it, and keeps going.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ParseError {
    #[error("could not parse amount: '{0}'")]
    Amount(String),

    #[error("could not parse date: '{0}'")]
    Date(String),

    #[error("malformed row at line {line}: {reason}")]
    Row { line: u64, reason: String },
}

/// A parse failure tied to the table line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: u64,
    pub error: ParseError,
}

impl Diagnostic {
    pub fn new(line: u64, error: ParseError) -> Self {
        Self { line, error }
    }
}
