//! Checkpoint error types.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A record in the checkpoint breaks a shipment invariant
    #[error("Checkpoint record {id} is invalid: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Checkpoint contains shipment {0} more than once")]
    DuplicateId(String),

    /// The configuration supplied for the restored store is out of range
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
