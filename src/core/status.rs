//! Shipment lifecycle statuses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle status of a shipment.
///
/// `Posted` is the initial status. `Delivered` and `Canceled` are final.
/// `Disputed` is the only error status and can still be resolved.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    Posted,
    Accepted,
    InTransit,
    Delivered,
    Disputed,
    Canceled,
}

impl ShipmentStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [ShipmentStatus; 6] = [
        ShipmentStatus::Posted,
        ShipmentStatus::Accepted,
        ShipmentStatus::InTransit,
        ShipmentStatus::Delivered,
        ShipmentStatus::Disputed,
        ShipmentStatus::Canceled,
    ];

    /// Whether a carrier has taken the shipment on at this status.
    ///
    /// `Canceled` is excluded because it is also reachable straight from
    /// `Posted`; callers must consult `accepted_at` for that case.
    pub fn is_carried(&self) -> bool {
        matches!(
            self,
            Self::Accepted | Self::InTransit | Self::Delivered | Self::Disputed
        )
    }

    /// Wire name, e.g. `IN_TRANSIT`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Posted => "POSTED",
            Self::Accepted => "ACCEPTED",
            Self::InTransit => "IN_TRANSIT",
            Self::Delivered => "DELIVERED",
            Self::Disputed => "DISPUTED",
            Self::Canceled => "CANCELED",
        }
    }

    /// `Delivered` and `Canceled` accept no further transitions.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Delivered | Self::Canceled)
    }

    /// A shipment in an error status needs someone to resolve it.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Disputed)
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string does not name a shipment status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown shipment status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for ShipmentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        ShipmentStatus::ALL
            .into_iter()
            .find(|status| status.name() == normalized)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_wire_format() {
        for status in ShipmentStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.name()));
        }
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(
            "in_transit".parse::<ShipmentStatus>(),
            Ok(ShipmentStatus::InTransit)
        );
        assert_eq!(
            " DELIVERED ".parse::<ShipmentStatus>(),
            Ok(ShipmentStatus::Delivered)
        );
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "available".parse::<ShipmentStatus>().unwrap_err();
        assert_eq!(err, ParseStatusError("available".to_string()));
        assert_eq!(err.to_string(), "unknown shipment status 'available'");
    }

    #[test]
    fn final_and_error_statuses() {
        let finals: Vec<_> = ShipmentStatus::ALL
            .into_iter()
            .filter(|s| s.is_final())
            .collect();
        assert_eq!(
            finals,
            vec![ShipmentStatus::Delivered, ShipmentStatus::Canceled]
        );
        assert!(ShipmentStatus::Disputed.is_error());
        assert!(!ShipmentStatus::Disputed.is_final());
    }

    #[test]
    fn carried_statuses_exclude_posted_and_canceled() {
        assert!(!ShipmentStatus::Posted.is_carried());
        assert!(!ShipmentStatus::Canceled.is_carried());
        assert!(ShipmentStatus::Accepted.is_carried());
        assert!(ShipmentStatus::Disputed.is_carried());
    }
}
