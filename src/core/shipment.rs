//! Shipment records and the inputs used to create and query them.

use super::status::ShipmentStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Who receives the parcel at the destination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientInfo {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// What is being carried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub weight_kg: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub declared_value: Decimal,
}

/// Pickup and drop-off locations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub origin: String,
    pub destination: String,
}

impl Route {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

/// Input for creating a shipment.
///
/// The sender id is supplied by the caller (usually from its auth context);
/// everything else comes from the request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShipment {
    pub sender_id: String,
    pub recipient: RecipientInfo,
    pub item: ItemInfo,
    pub route: Route,
    #[serde(default)]
    pub estimated_delivery: Option<DateTime<Utc>>,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub duties_and_taxes: Decimal,
}

/// One peer-to-peer delivery request.
///
/// Records are only ever handed out as copies; the store owns the originals
/// and is the only place where fields change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: String,
    pub sender_id: String,
    pub traveler_id: Option<String>,
    pub status: ShipmentStatus,
    pub recipient: RecipientInfo,
    pub item: ItemInfo,
    pub route: Route,
    pub estimated_delivery: Option<DateTime<Utc>>,
    #[serde(with = "rust_decimal::serde::str")]
    pub agreed_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub commission: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub duties_and_taxes: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub confirmation_code: String,
}

impl Shipment {
    /// Amount the sender pays in total: fee, commission, duties and taxes.
    ///
    /// `None` if the sum does not fit in a `Decimal`.
    pub fn total_cost(&self) -> Option<Decimal> {
        self.agreed_fee
            .checked_add(self.commission)?
            .checked_add(self.duties_and_taxes)
    }

    /// Check the presence invariants between status and optional fields.
    ///
    /// Returns a description of the first broken invariant.
    pub fn check_invariants(&self) -> Result<(), String> {
        let accepted = self.accepted_at.is_some();

        if self.status.is_carried() && !accepted {
            return Err(format!("status {} without accepted_at", self.status));
        }
        if self.status == ShipmentStatus::Posted && accepted {
            return Err("POSTED shipment with accepted_at".to_string());
        }
        if accepted != self.traveler_id.is_some() {
            return Err("traveler_id and accepted_at disagree".to_string());
        }
        if (self.status == ShipmentStatus::Delivered) != self.delivered_at.is_some() {
            return Err(format!(
                "status {} disagrees with delivered_at",
                self.status
            ));
        }
        if !accepted && (!self.agreed_fee.is_zero() || !self.commission.is_zero()) {
            return Err("fee or commission set before acceptance".to_string());
        }
        if [self.agreed_fee, self.commission, self.duties_and_taxes]
            .iter()
            .any(|amount| *amount < Decimal::ZERO)
        {
            return Err("negative monetary amount".to_string());
        }
        Ok(())
    }
}

/// Predicates for listing shipments. Absent fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentFilter {
    #[serde(default)]
    pub status: Option<ShipmentStatus>,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub traveler_id: Option<String>,
}

impl ShipmentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: ShipmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn sender(mut self, sender_id: impl Into<String>) -> Self {
        self.sender_id = Some(sender_id.into());
        self
    }

    pub fn traveler(mut self, traveler_id: impl Into<String>) -> Self {
        self.traveler_id = Some(traveler_id.into());
        self
    }

    /// True when the shipment satisfies every predicate that is set.
    pub fn matches(&self, shipment: &Shipment) -> bool {
        self.status.is_none_or(|status| shipment.status == status)
            && self
                .sender_id
                .as_deref()
                .is_none_or(|sender| shipment.sender_id == sender)
            && self
                .traveler_id
                .as_deref()
                .is_none_or(|traveler| shipment.traveler_id.as_deref() == Some(traveler))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn posted() -> Shipment {
        let now = Utc::now();
        Shipment {
            id: "shp-1".to_string(),
            sender_id: "sender-1".to_string(),
            traveler_id: None,
            status: ShipmentStatus::Posted,
            recipient: RecipientInfo {
                name: "Anna".to_string(),
                address: "Marienplatz 1, München".to_string(),
                phone: None,
            },
            item: ItemInfo {
                description: "Kleine Box mit Büchern".to_string(),
                weight_kg: Some(Decimal::new(25, 1)),
                declared_value: Decimal::from(100),
            },
            route: Route::new("Berlin", "München"),
            estimated_delivery: None,
            agreed_fee: Decimal::ZERO,
            commission: Decimal::ZERO,
            duties_and_taxes: Decimal::ZERO,
            created_at: now,
            updated_at: now,
            accepted_at: None,
            delivered_at: None,
            confirmation_code: "ABCD1234".to_string(),
        }
    }

    #[test]
    fn posted_shipment_satisfies_invariants() {
        assert_eq!(posted().check_invariants(), Ok(()));
    }

    #[test]
    fn invariants_catch_missing_acceptance() {
        let mut shipment = posted();
        shipment.status = ShipmentStatus::InTransit;
        assert!(shipment.check_invariants().is_err());
    }

    #[test]
    fn invariants_allow_cancel_straight_from_posted() {
        let mut shipment = posted();
        shipment.status = ShipmentStatus::Canceled;
        assert_eq!(shipment.check_invariants(), Ok(()));
    }

    #[test]
    fn invariants_catch_delivered_without_timestamp() {
        let mut shipment = posted();
        shipment.status = ShipmentStatus::Delivered;
        shipment.traveler_id = Some("carrier-1".to_string());
        shipment.accepted_at = Some(Utc::now());
        assert!(shipment.check_invariants().is_err());

        shipment.delivered_at = Some(Utc::now());
        assert_eq!(shipment.check_invariants(), Ok(()));
    }

    #[test]
    fn filter_uses_and_semantics() {
        let mut shipment = posted();
        shipment.traveler_id = Some("carrier-1".to_string());

        assert!(ShipmentFilter::new().matches(&shipment));
        assert!(ShipmentFilter::new().sender("sender-1").matches(&shipment));
        assert!(ShipmentFilter::new()
            .sender("sender-1")
            .traveler("carrier-1")
            .status(ShipmentStatus::Posted)
            .matches(&shipment));
        assert!(!ShipmentFilter::new()
            .sender("sender-1")
            .status(ShipmentStatus::Accepted)
            .matches(&shipment));
        assert!(!ShipmentFilter::new().traveler("carrier-2").matches(&shipment));
    }

    #[test]
    fn traveler_filter_skips_unassigned() {
        assert!(!ShipmentFilter::new().traveler("carrier-1").matches(&posted()));
    }

    #[test]
    fn money_serializes_as_strings() {
        let json = serde_json::to_value(posted()).unwrap();
        assert_eq!(json["agreed_fee"], "0");
        assert_eq!(json["item"]["declared_value"], "100");
        assert_eq!(json["item"]["weight_kg"], "2.5");
        assert_eq!(json["status"], "POSTED");
    }

    #[test]
    fn total_cost_adds_all_charges() {
        let mut shipment = posted();
        shipment.agreed_fee = Decimal::from(40);
        shipment.commission = Decimal::from(4);
        shipment.duties_and_taxes = Decimal::new(150, 2);
        assert_eq!(shipment.total_cost(), Some(Decimal::new(4550, 2)));
    }

    #[test]
    fn total_cost_reports_overflow() {
        let mut shipment = posted();
        shipment.agreed_fee = Decimal::MAX;
        shipment.commission = Decimal::ONE;
        assert_eq!(shipment.total_cost(), None);
    }
}
