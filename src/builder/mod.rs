//! Builder API for constructing shipment stores.
//!
//! Use the builder when the defaults of [`ShipmentStore::new`] do not fit:
//! a different commission rate, longer confirmation codes, or a custom id
//! scheme.
//!
//! [`ShipmentStore::new`]: crate::store::ShipmentStore::new

pub mod error;
pub mod store;

pub use error::BuildError;
pub use store::ShipmentStoreBuilder;
