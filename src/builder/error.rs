//! Build errors for the store builder.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a shipment store.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid store configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
