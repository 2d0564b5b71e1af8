//! Core shipment types.
//!
//! This module contains the plain data of the lifecycle:
//! - Lifecycle statuses
//! - Shipment records, creation input and list filters
//! - Append-only status history
//!
//! Nothing in this module locks, logs or allocates ids; that is the
//! store's job.

mod history;
mod shipment;
mod status;

pub use history::{StatusHistory, StatusHistoryEntry};
pub use shipment::{ItemInfo, NewShipment, RecipientInfo, Route, Shipment, ShipmentFilter};
pub use status::{ParseStatusError, ShipmentStatus};
