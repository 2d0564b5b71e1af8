//! Status history tracking.
//!
//! Every shipment carries an append-only log of the statuses it has moved
//! through. Entries are never edited or removed.

use super::status::ShipmentStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single status change.
///
/// # Example
///
/// ```rust
/// use shipment_lifecycle::core::{ShipmentStatus, StatusHistoryEntry};
/// use chrono::Utc;
///
/// let entry = StatusHistoryEntry {
///     shipment_id: "shp-1".to_string(),
///     status: ShipmentStatus::Posted,
///     timestamp: Utc::now(),
///     note: None,
/// };
/// assert_eq!(entry.status, ShipmentStatus::Posted);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    /// The shipment this entry belongs to
    pub shipment_id: String,
    /// The status the shipment entered
    pub status: ShipmentStatus,
    /// When the status was entered
    pub timestamp: DateTime<Utc>,
    /// Free-text remark supplied with the change
    #[serde(default)]
    pub note: Option<String>,
}

/// Ordered, append-only history of one shipment's statuses.
///
/// # Example
///
/// ```rust
/// use shipment_lifecycle::core::{ShipmentStatus, StatusHistory, StatusHistoryEntry};
/// use chrono::Utc;
///
/// let mut history = StatusHistory::new();
/// for status in [ShipmentStatus::Posted, ShipmentStatus::Accepted] {
///     history.record(StatusHistoryEntry {
///         shipment_id: "shp-1".to_string(),
///         status,
///         timestamp: Utc::now(),
///         note: None,
///     });
/// }
///
/// assert_eq!(
///     history.path(),
///     vec![ShipmentStatus::Posted, ShipmentStatus::Accepted]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusHistory {
    entries: Vec<StatusHistoryEntry>,
}

impl StatusHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry to the end of the history.
    pub fn record(&mut self, entry: StatusHistoryEntry) {
        self.entries.push(entry);
    }

    /// Get the sequence of statuses entered, oldest first.
    pub fn path(&self) -> Vec<ShipmentStatus> {
        self.entries.iter().map(|entry| entry.status).collect()
    }

    /// Calculate total duration from first to last entry.
    ///
    /// Returns `None` if the history is empty, or if the clock went
    /// backwards between the first and last entry.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.entries.first()?, self.entries.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Get all entries in append order.
    pub fn entries(&self) -> &[StatusHistoryEntry] {
        &self.entries
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&StatusHistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
