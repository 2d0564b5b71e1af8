//! Checkpoint export and import for shipment stores.
//!
//! A checkpoint is a versioned copy of every shipment and its history that
//! can be written as JSON or as a compact binary blob. Loading one back
//! checks every record against the shipment invariants and the transition
//! table, so a hand-edited or truncated checkpoint is refused as a whole.

use crate::core::{Shipment, ShipmentStatus, StatusHistory};
use crate::policy::TransitionPolicy;
use crate::validation::validate_stored_shipment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// One shipment together with its history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckpointRecord {
    pub shipment: Shipment,
    pub history: StatusHistory,
}

/// Serializable copy of a store's contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub records: Vec<CheckpointRecord>,
}

impl StoreCheckpoint {
    pub fn new(records: Vec<CheckpointRecord>) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            timestamp: Utc::now(),
            records,
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }

    /// Check the version, id uniqueness and every record.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        self.check_version()?;

        let mut seen = HashSet::new();
        for record in &self.records {
            if !seen.insert(record.shipment.id.as_str()) {
                return Err(CheckpointError::DuplicateId(record.shipment.id.clone()));
            }
            validate_record(record).map_err(|reason| CheckpointError::InvalidRecord {
                id: record.shipment.id.clone(),
                reason,
            })?;
        }
        Ok(())
    }
}

fn validate_record(record: &CheckpointRecord) -> Result<(), String> {
    let shipment = &record.shipment;
    validate_stored_shipment(shipment).map_err(|violations| {
        violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    })?;
    shipment.check_invariants()?;

    let entries = record.history.entries();
    let first = entries.first().ok_or("history is empty")?;
    if first.status != ShipmentStatus::Posted {
        return Err(format!("history starts at {}", first.status));
    }
    if let Some(entry) = entries.iter().find(|e| e.shipment_id != shipment.id) {
        return Err(format!("history entry belongs to {}", entry.shipment_id));
    }
    for pair in entries.windows(2) {
        let (from, to) = (pair[0].status, pair[1].status);
        if !TransitionPolicy::is_allowed(from, to) {
            return Err(format!("history moves from {from} to {to}"));
        }
    }
    let accepted_in_history = entries
        .iter()
        .any(|e| e.status == ShipmentStatus::Accepted);
    if accepted_in_history != shipment.accepted_at.is_some() {
        return Err("accepted_at disagrees with history".to_string());
    }
    match entries.last() {
        Some(last) if last.status == shipment.status => Ok(()),
        _ => Err(format!("history does not end at {}", shipment.status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ItemInfo, RecipientInfo, Route, StatusHistoryEntry};
    use rust_decimal::Decimal;

    fn record(status_path: &[ShipmentStatus]) -> CheckpointRecord {
        let now = Utc::now();
        let mut history = StatusHistory::new();
        for &status in status_path {
            history.record(StatusHistoryEntry {
                shipment_id: "shp-1".to_string(),
                status,
                timestamp: now,
                note: None,
            });
        }
        let accepted = status_path.contains(&ShipmentStatus::Accepted);
        let status = *status_path.last().unwrap_or(&ShipmentStatus::Posted);
        CheckpointRecord {
            shipment: Shipment {
                id: "shp-1".to_string(),
                sender_id: "sender-1".to_string(),
                traveler_id: accepted.then(|| "carrier-1".to_string()),
                status,
                recipient: RecipientInfo {
                    name: "Anna".to_string(),
                    address: "Marienplatz 1".to_string(),
                    phone: None,
                },
                item: ItemInfo {
                    description: "Bücher".to_string(),
                    weight_kg: None,
                    declared_value: Decimal::from(100),
                },
                route: Route::new("Berlin", "München"),
                estimated_delivery: None,
                agreed_fee: if accepted { Decimal::from(40) } else { Decimal::ZERO },
                commission: if accepted { Decimal::from(4) } else { Decimal::ZERO },
                duties_and_taxes: Decimal::ZERO,
                created_at: now,
                updated_at: now,
                accepted_at: accepted.then_some(now),
                delivered_at: (status == ShipmentStatus::Delivered).then_some(now),
                confirmation_code: "ABCD1234".to_string(),
            },
            history,
        }
    }

    #[test]
    fn json_roundtrip_preserves_records() {
        let checkpoint = StoreCheckpoint::new(vec![record(&[
            ShipmentStatus::Posted,
            ShipmentStatus::Accepted,
        ])]);

        let json = checkpoint.to_json().unwrap();
        let restored = StoreCheckpoint::from_json(&json).unwrap();

        assert_eq!(restored, checkpoint);
        assert!(restored.validate().is_ok());
    }

    #[test]
    fn binary_roundtrip_preserves_records() {
        let checkpoint = StoreCheckpoint::new(vec![record(&[
            ShipmentStatus::Posted,
            ShipmentStatus::Accepted,
            ShipmentStatus::InTransit,
            ShipmentStatus::Delivered,
        ])]);

        let bytes = checkpoint.to_binary().unwrap();
        let restored = StoreCheckpoint::from_binary(&bytes).unwrap();

        assert_eq!(restored, checkpoint);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut checkpoint = StoreCheckpoint::new(Vec::new());
        checkpoint.version = 99;
        let json = serde_json::to_string(&checkpoint).unwrap();

        let err = StoreCheckpoint::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            CheckpointError::UnsupportedVersion {
                found: 99,
                supported: CHECKPOINT_VERSION
            }
        ));
    }

    #[test]
    fn garbage_is_a_deserialization_error() {
        assert!(matches!(
            StoreCheckpoint::from_binary(&[1, 2, 3]),
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let one = record(&[ShipmentStatus::Posted]);
        let checkpoint = StoreCheckpoint::new(vec![one.clone(), one]);

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::DuplicateId(id)) if id == "shp-1"
        ));
    }

    #[test]
    fn illegal_history_is_rejected() {
        let mut bad = record(&[ShipmentStatus::Posted, ShipmentStatus::Accepted]);
        bad.history.record(StatusHistoryEntry {
            shipment_id: "shp-1".to_string(),
            status: ShipmentStatus::Delivered,
            timestamp: Utc::now(),
            note: None,
        });
        bad.shipment.status = ShipmentStatus::Delivered;
        bad.shipment.delivered_at = Some(Utc::now());

        let err = StoreCheckpoint::new(vec![bad]).validate().unwrap_err();
        assert!(matches!(err, CheckpointError::InvalidRecord { .. }));
    }

    #[test]
    fn history_must_end_at_current_status() {
        let mut bad = record(&[ShipmentStatus::Posted]);
        bad.shipment.status = ShipmentStatus::Canceled;

        assert!(StoreCheckpoint::new(vec![bad]).validate().is_err());
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut bad = record(&[ShipmentStatus::Posted]);
        bad.shipment.recipient.name = String::new();
        bad.shipment.confirmation_code = String::new();

        match StoreCheckpoint::new(vec![bad]).validate() {
            Err(CheckpointError::InvalidRecord { id, reason }) => {
                assert_eq!(id, "shp-1");
                assert_eq!(
                    reason,
                    "recipient.name must not be blank, confirmation_code must not be blank"
                );
            }
            other => panic!("expected invalid record, got {other:?}"),
        }
    }

    #[test]
    fn empty_history_is_rejected() {
        let mut bad = record(&[ShipmentStatus::Posted]);
        bad.history = StatusHistory::new();

        assert!(StoreCheckpoint::new(vec![bad]).validate().is_err());
    }
}
