//! Errors returned by the shipment store.

use crate::core::ShipmentStatus;
use crate::validation::FieldViolation;
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Coarse error category, for mapping onto transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    InvalidState,
    InvalidTransition,
}

/// All errors a store operation can report.
///
/// A rejected operation never changes the store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Input was missing or malformed
    #[error("invalid input: {}", join(.violations))]
    Validation { violations: Vec<FieldViolation> },

    #[error("shipment not found: {id}")]
    NotFound { id: String },

    /// The operation does not apply to the shipment's current status
    #[error("cannot {operation} shipment {id} in status {status}")]
    InvalidState {
        id: String,
        status: ShipmentStatus,
        operation: &'static str,
    },

    /// The requested status change is not in the transition table
    #[error("shipment {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: ShipmentStatus,
        to: ShipmentStatus,
    },
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
        }
    }

    pub(crate) fn not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_string() }
    }
}

impl From<Vec<FieldViolation>> for StoreError {
    fn from(violations: Vec<FieldViolation>) -> Self {
        Self::Validation { violations }
    }
}

fn join(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ViolationKind;

    #[test]
    fn messages_name_the_shipment() {
        let err = StoreError::InvalidTransition {
            id: "shp-7".to_string(),
            from: ShipmentStatus::Delivered,
            to: ShipmentStatus::Disputed,
        };
        assert_eq!(
            err.to_string(),
            "shipment shp-7 cannot move from DELIVERED to DISPUTED"
        );
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    }

    #[test]
    fn validation_message_lists_every_field() {
        let err = StoreError::from(vec![
            FieldViolation::new("recipient.name", ViolationKind::Blank),
            FieldViolation::new("agreed_fee", ViolationKind::NotPositive),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid input: recipient.name must not be blank, agreed_fee must be greater than zero"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
