//! The in-memory shipment store.
//!
//! [`ShipmentStore`] is the single owner of every shipment record and its
//! status history. Both maps live behind one reader-writer lock so that a
//! record update and the matching history append happen in the same critical
//! section. Callers only ever receive copies.

mod error;
mod ids;

pub use error::{ErrorKind, StoreError, StoreResult};
pub use ids::{confirmation_code, IdGenerator, SequentialIdGenerator, UuidIdGenerator};

use crate::builder::ShipmentStoreBuilder;
use crate::checkpoint::{CheckpointError, CheckpointRecord, StoreCheckpoint};
use crate::config::StoreConfig;
use crate::core::{
    NewShipment, Shipment, ShipmentFilter, ShipmentStatus, StatusHistory,
    StatusHistoryEntry,
};
use crate::policy::TransitionPolicy;
use crate::validation::{
    validate_acceptance, validate_new_shipment, FieldViolation, ViolationKind,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Candidates drawn from the configured generator before falling back to UUIDs.
const MAX_ID_ATTEMPTS: usize = 16;


#[derive(Debug, Default)]
struct Inner {
    shipments: HashMap<String, Shipment>,
    histories: HashMap<String, StatusHistory>,
}

/// Exact commission on `agreed_fee`, or `None` if the product overflows.
pub fn commission_for(agreed_fee: Decimal, rate: Decimal) -> Option<Decimal> {
    agreed_fee.checked_mul(rate)
}

fn record_status(
    histories: &mut HashMap<String, StatusHistory>,
    id: &str,
    status: ShipmentStatus,
    at: DateTime<Utc>,
    note: Option<String>,
) {
    histories
        .entry(id.to_string())
        .or_default()
        .record(StatusHistoryEntry {
            shipment_id: id.to_string(),
            status,
            timestamp: at,
            note,
        });
}

/// Thread-safe store of shipments and their status histories.
///
/// Share it between request handlers with an `Arc`.
///
/// # Example
///
/// ```rust
/// use shipment_lifecycle::core::{ItemInfo, NewShipment, RecipientInfo, Route, ShipmentStatus};
/// use shipment_lifecycle::store::ShipmentStore;
/// use rust_decimal::Decimal;
///
/// let store = ShipmentStore::new();
/// let shipment = store
///     .create_shipment(NewShipment {
///         sender_id: "sender-1".to_string(),
///         recipient: RecipientInfo {
///             name: "Anna".to_string(),
///             address: "Marienplatz 1, München".to_string(),
///             phone: None,
///         },
///         item: ItemInfo {
///             description: "Kleine Box mit Büchern".to_string(),
///             weight_kg: None,
///             declared_value: Decimal::from(100),
///         },
///         route: Route::new("Berlin", "München"),
///         estimated_delivery: None,
///         duties_and_taxes: Decimal::ZERO,
///     })
///     .unwrap();
///
/// let accepted = store
///     .accept_shipment(&shipment.id, "carrier-1", Decimal::from(40))
///     .unwrap();
/// assert_eq!(accepted.status, ShipmentStatus::Accepted);
/// assert_eq!(accepted.commission, Decimal::from(4));
/// ```
pub struct ShipmentStore {
    inner: RwLock<Inner>,
    config: StoreConfig,
    ids: Box<dyn IdGenerator>,
}

impl Default for ShipmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShipmentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShipmentStore")
            .field("config", &self.config)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl ShipmentStore {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::from_parts(StoreConfig::default(), Box::new(UuidIdGenerator))
    }

    /// Start building a store with custom configuration or id generation.
    pub fn builder() -> ShipmentStoreBuilder {
        ShipmentStoreBuilder::new()
    }

    /// Assemble a store from already-validated parts.
    pub(crate) fn from_parts(config: StoreConfig, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            config,
            ids,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // Critical sections only write fully built values, so a poisoned lock
    // still guards valid maps.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn unused_id(&self, inner: &Inner) -> String {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if !inner.shipments.contains_key(&candidate) {
                return candidate;
            }
        }
        tracing::warn!(
            attempts = MAX_ID_ATTEMPTS,
            "id generator keeps colliding, falling back to uuid"
        );
        loop {
            let candidate = UuidIdGenerator.next_id();
            if !inner.shipments.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Register a new shipment in `POSTED` status.
    ///
    /// Fails with [`StoreError::Validation`] listing every blank required
    /// field or negative amount.
    pub fn create_shipment(&self, input: NewShipment) -> StoreResult<Shipment> {
        if let Err(violations) = validate_new_shipment(&input) {
            let err = StoreError::from(violations);
            tracing::warn!(kind = ?err.kind(), error = %err, "create_shipment rejected");
            return Err(err);
        }

        let code = confirmation_code(self.config.confirmation_code_length);
        let now = Utc::now();

        let shipment = {
            let mut inner = self.write();
            let id = self.unused_id(&inner);
            let shipment = Shipment {
                id: id.clone(),
                sender_id: input.sender_id,
                traveler_id: None,
                status: ShipmentStatus::Posted,
                recipient: input.recipient,
                item: input.item,
                route: input.route,
                estimated_delivery: input.estimated_delivery,
                agreed_fee: Decimal::ZERO,
                commission: Decimal::ZERO,
                duties_and_taxes: input.duties_and_taxes,
                created_at: now,
                updated_at: now,
                accepted_at: None,
                delivered_at: None,
                confirmation_code: code,
            };
            inner.shipments.insert(id.clone(), shipment.clone());
            record_status(&mut inner.histories, &id, ShipmentStatus::Posted, now, None);
            shipment
        };

        tracing::info!(
            shipment_id = %shipment.id,
            sender_id = %shipment.sender_id,
            origin = %shipment.route.origin,
            destination = %shipment.route.destination,
            "shipment posted"
        );
        Ok(shipment)
    }

    /// Look up one shipment.
    pub fn get_shipment(&self, id: &str) -> StoreResult<Shipment> {
        let found = self.read().shipments.get(id).cloned();
        found.ok_or_else(|| {
            tracing::debug!(shipment_id = %id, "shipment not found");
            StoreError::not_found(id)
        })
    }

    /// Copies of every shipment matching `filter`.
    ///
    /// Results are ordered by creation time, then id.
    pub fn list_shipments(&self, filter: &ShipmentFilter) -> Vec<Shipment> {
        let mut matching: Vec<Shipment> = self
            .read()
            .shipments
            .values()
            .filter(|shipment| filter.matches(shipment))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        tracing::debug!(?filter, count = matching.len(), "listed shipments");
        matching
    }

    /// Hand a `POSTED` shipment to a carrier at an agreed fee.
    ///
    /// Checks run in order: unknown id, status other than `POSTED`, then
    /// blank traveler or non-positive fee. On success the traveler, fee,
    /// commission, status, acceptance time and history entry are written
    /// together.
    pub fn accept_shipment(
        &self,
        id: &str,
        traveler_id: &str,
        agreed_fee: Decimal,
    ) -> StoreResult<Shipment> {
        let result = {
            let mut guard = self.write();
            let inner = &mut *guard;
            match inner.shipments.get_mut(id) {
                None => Err(StoreError::not_found(id)),
                Some(shipment) if shipment.status != ShipmentStatus::Posted => {
                    Err(StoreError::InvalidState {
                        id: id.to_string(),
                        status: shipment.status,
                        operation: "accept",
                    })
                }
                Some(shipment) => {
                    match self.accepted_copy(shipment, traveler_id, agreed_fee) {
                        Err(violations) => Err(StoreError::from(violations)),
                        Ok(accepted) => {
                            *shipment = accepted.clone();
                            record_status(
                                &mut inner.histories,
                                id,
                                ShipmentStatus::Accepted,
                                accepted.updated_at,
                                None,
                            );
                            Ok(accepted)
                        }
                    }
                }
            }
        };

        match &result {
            Ok(shipment) => tracing::info!(
                shipment_id = %shipment.id,
                traveler_id = %traveler_id,
                agreed_fee = %shipment.agreed_fee,
                commission = %shipment.commission,
                "shipment accepted"
            ),
            Err(err) => {
                tracing::warn!(shipment_id = %id, kind = ?err.kind(), error = %err, "accept rejected")
            }
        }
        result
    }

    /// Move a shipment to `requested` if the transition table allows it.
    ///
    /// `POSTED -> ACCEPTED` is refused here even though the table lists it:
    /// acceptance must go through [`accept_shipment`](Self::accept_shipment)
    /// so that traveler, fee and commission are recorded.
    pub fn transition_status(
        &self,
        id: &str,
        requested: ShipmentStatus,
        note: Option<String>,
    ) -> StoreResult<Shipment> {
        let result = {
            let mut guard = self.write();
            let inner = &mut *guard;
            match inner.shipments.get_mut(id) {
                None => Err(StoreError::not_found(id)),
                Some(shipment) => {
                    let from = shipment.status;
                    let reserved = requested == ShipmentStatus::Accepted;
                    if reserved || !TransitionPolicy::is_allowed(from, requested) {
                        Err(StoreError::InvalidTransition {
                            id: id.to_string(),
                            from,
                            to: requested,
                        })
                    } else {
                        let now = Utc::now();
                        shipment.status = requested;
                        shipment.updated_at = now;
                        if requested == ShipmentStatus::Delivered && shipment.delivered_at.is_none() {
                            shipment.delivered_at = Some(now);
                        }
                        let moved = shipment.clone();
                        record_status(&mut inner.histories, id, requested, now, note);
                        Ok((from, moved))
                    }
                }
            }
        };

        match result {
            Ok((from, shipment)) => {
                tracing::info!(
                    shipment_id = %shipment.id,
                    from = %from,
                    to = %shipment.status,
                    terminal = shipment.status.is_final(),
                    "shipment status changed"
                );
                Ok(shipment)
            }
            Err(err) => {
                tracing::warn!(shipment_id = %id, kind = ?err.kind(), error = %err, "transition rejected");
                Err(err)
            }
        }
    }

    /// Status history of one shipment, oldest entry first.
    pub fn get_history(&self, id: &str) -> StoreResult<StatusHistory> {
        let found = self.read().histories.get(id).cloned();
        found.ok_or_else(|| StoreError::not_found(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().shipments.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.read().shipments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // The stored record is replaced in one assignment, so nothing here may
    // touch it.
    fn accepted_copy(
        &self,
        posted: &Shipment,
        traveler_id: &str,
        agreed_fee: Decimal,
    ) -> Result<Shipment, Vec<FieldViolation>> {
        validate_acceptance(traveler_id, agreed_fee)?;
        let commission = commission_for(agreed_fee, self.config.commission_rate)
            .ok_or_else(|| vec![FieldViolation::new("agreed_fee", ViolationKind::TooLarge)])?;

        let now = Utc::now();
        let mut accepted = posted.clone();
        accepted.traveler_id = Some(traveler_id.to_string());
        accepted.agreed_fee = agreed_fee;
        accepted.commission = commission;
        accepted.status = ShipmentStatus::Accepted;
        accepted.accepted_at = Some(now);
        accepted.updated_at = now;
        Ok(accepted)
    }

    /// Copy the whole store into a serializable checkpoint.
    ///
    /// Records are ordered by creation time, then id.
    pub fn checkpoint(&self) -> StoreCheckpoint {
        let mut records: Vec<CheckpointRecord> = {
            let inner = self.read();
            inner
                .shipments
                .values()
                .map(|shipment| CheckpointRecord {
                    shipment: shipment.clone(),
                    history: inner.histories.get(&shipment.id).cloned().unwrap_or_default(),
                })
                .collect()
        };
        records.sort_by(|a, b| {
            a.shipment
                .created_at
                .cmp(&b.shipment.created_at)
                .then_with(|| a.shipment.id.cmp(&b.shipment.id))
        });
        StoreCheckpoint::new(records)
    }

    /// Build a store pre-loaded from a checkpoint.
    ///
    /// The configuration gets the same range checks as
    /// [`ShipmentStoreBuilder::build`]. Every record is checked against the
    /// field rules, the shipment invariants and the transition table before
    /// anything is loaded.
    pub fn restore(
        checkpoint: StoreCheckpoint,
        config: StoreConfig,
        ids: Box<dyn IdGenerator>,
    ) -> Result<Self, CheckpointError> {
        config.validate()?;
        checkpoint.validate()?;

        let store = Self::from_parts(config, ids);
        {
            let mut inner = store.write();
            for record in checkpoint.records {
                let id = record.shipment.id.clone();
                inner.histories.insert(id.clone(), record.history);
                inner.shipments.insert(id, record.shipment);
            }
        }
        tracing::info!(shipments = store.len(), "store restored from checkpoint");
        Ok(store)
    }
}
