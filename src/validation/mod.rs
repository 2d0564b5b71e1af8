//! Validation of caller-supplied input.
//!
//! Checks accumulate with stillwater's `Validation`; every rejected field is
//! reported at once.

pub mod rules;
pub mod violations;

pub use rules::{validate_acceptance, validate_new_shipment, validate_stored_shipment};
pub use violations::{FieldViolation, ViolationKind};
