//! Input checks for shipment creation and acceptance using Validation.

use crate::core::{ItemInfo, NewShipment, RecipientInfo, Route, Shipment};
use crate::validation::violations::{FieldViolation, ViolationKind};
use rust_decimal::Decimal;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<FieldViolation>>;

fn not_blank(field: &str, value: &str) -> Check {
    if value.trim().is_empty() {
        Validation::fail(FieldViolation::new(field, ViolationKind::Blank))
    } else {
        Validation::success(())
    }
}

fn not_negative(field: &str, value: Decimal) -> Check {
    if value < Decimal::ZERO {
        Validation::fail(FieldViolation::new(field, ViolationKind::Negative))
    } else {
        Validation::success(())
    }
}

fn positive(field: &str, value: Decimal) -> Check {
    if value > Decimal::ZERO {
        Validation::success(())
    } else {
        Validation::fail(FieldViolation::new(field, ViolationKind::NotPositive))
    }
}

fn collect(checks: Vec<Check>) -> Result<(), Vec<FieldViolation>> {
    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
    }
}

fn shipment_field_checks(
    sender_id: &str,
    recipient: &RecipientInfo,
    item: &ItemInfo,
    route: &Route,
    duties_and_taxes: Decimal,
) -> Vec<Check> {
    let mut checks = vec![
        not_blank("sender_id", sender_id),
        not_blank("recipient.name", &recipient.name),
        not_blank("recipient.address", &recipient.address),
        not_blank("item.description", &item.description),
        not_blank("route.origin", &route.origin),
        not_blank("route.destination", &route.destination),
        not_negative("item.declared_value", item.declared_value),
        not_negative("duties_and_taxes", duties_and_taxes),
    ];
    if let Some(weight) = item.weight_kg {
        checks.push(not_negative("item.weight_kg", weight));
    }
    checks
}

/// Check every required field of a new shipment.
///
/// Reports all violations at once instead of stopping at the first.
pub fn validate_new_shipment(input: &NewShipment) -> Result<(), Vec<FieldViolation>> {
    collect(shipment_field_checks(
        &input.sender_id,
        &input.recipient,
        &input.item,
        &input.route,
        input.duties_and_taxes,
    ))
}

/// Apply the creation rules to a stored record, plus its id and code.
///
/// Used when loading records that did not pass through `create_shipment`.
pub fn validate_stored_shipment(shipment: &Shipment) -> Result<(), Vec<FieldViolation>> {
    let mut checks = shipment_field_checks(
        &shipment.sender_id,
        &shipment.recipient,
        &shipment.item,
        &shipment.route,
        shipment.duties_and_taxes,
    );
    checks.push(not_blank("id", &shipment.id));
    checks.push(not_blank("confirmation_code", &shipment.confirmation_code));
    collect(checks)
}

/// Check the carrier and fee supplied when accepting a shipment.
pub fn validate_acceptance(
    traveler_id: &str,
    agreed_fee: Decimal,
) -> Result<(), Vec<FieldViolation>> {
    collect(vec![
        not_blank("traveler_id", traveler_id),
        positive("agreed_fee", agreed_fee),
    ])
}
