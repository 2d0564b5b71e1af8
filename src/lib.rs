//! Shipment lifecycle: an in-memory store for peer-to-peer deliveries
//!
//! A sender posts a shipment, a traveler accepts it at an agreed fee, and
//! the shipment then moves through transit to delivery, dispute or
//! cancellation. The legal moves live in one table; the store applies them
//! atomically and keeps an append-only history for every shipment.
//!
//! # Core Concepts
//!
//! - **Status**: closed set of lifecycle states, two of them final
//! - **Policy**: pure transition table consulted before every status change
//! - **Store**: lock-guarded owner of all shipments and their histories
//! - **History**: ordered, append-only record of status changes
//!
//! # Example
//!
//! ```rust
//! use shipment_lifecycle::core::{ItemInfo, NewShipment, RecipientInfo, Route, ShipmentStatus};
//! use shipment_lifecycle::store::{ErrorKind, ShipmentStore};
//! use rust_decimal::Decimal;
//!
//! let store = ShipmentStore::new();
//! let posted = store
//!     .create_shipment(NewShipment {
//!         sender_id: "sender-1".to_string(),
//!         recipient: RecipientInfo {
//!             name: "Jonas".to_string(),
//!             address: "Zeil 10, Frankfurt".to_string(),
//!             phone: None,
//!         },
//!         item: ItemInfo {
//!             description: "Dokumente".to_string(),
//!             weight_kg: None,
//!             declared_value: Decimal::from(20),
//!         },
//!         route: Route::new("Hamburg", "Frankfurt"),
//!         estimated_delivery: None,
//!         duties_and_taxes: Decimal::ZERO,
//!     })
//!     .unwrap();
//!
//! store
//!     .accept_shipment(&posted.id, "carrier-1", Decimal::from(45))
//!     .unwrap();
//! store
//!     .transition_status(&posted.id, ShipmentStatus::InTransit, None)
//!     .unwrap();
//!
//! let err = store
//!     .transition_status(&posted.id, ShipmentStatus::Canceled, None)
//!     .unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidTransition);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod policy;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{NewShipment, Shipment, ShipmentFilter, ShipmentStatus, StatusHistory};
pub use policy::TransitionPolicy;
pub use store::{ErrorKind, ShipmentStore, StoreError, StoreResult};
