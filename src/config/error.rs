//! Configuration error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when loading or checking store configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed
    #[error("failed to parse store config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("commission rate {0} is outside 0..=1")]
    CommissionRateOutOfRange(Decimal),

    #[error("confirmation code length {found} is outside {min}..={max}")]
    CodeLengthOutOfRange {
        found: usize,
        min: usize,
        max: usize,
    },
}
