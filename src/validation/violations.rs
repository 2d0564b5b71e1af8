//! Field-level validation failures.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The reason a single input field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Field is empty or whitespace only
    Blank,
    /// Amount is below zero
    Negative,
    /// Amount must be strictly positive
    NotPositive,
    /// Amount overflows once charges are derived from it
    TooLarge,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Blank => "must not be blank",
            Self::Negative => "must not be negative",
            Self::NotPositive => "must be greater than zero",
            Self::TooLarge => "is too large",
        })
    }
}

/// One rejected input field.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{field} {kind}")]
pub struct FieldViolation {
    /// Dotted path of the field, e.g. `recipient.name`
    pub field: String,
    pub kind: ViolationKind,
}

impl FieldViolation {
    pub fn new(field: &str, kind: ViolationKind) -> Self {
        Self {
            field: field.to_string(),
            kind,
        }
    }
}
