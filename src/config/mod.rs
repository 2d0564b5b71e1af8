//! Store configuration.
//!
//! The commission rate differs between deployments, so it is configuration
//! rather than a literal in the acceptance path.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::ConfigError;

/// Shortest confirmation code the store will generate
pub const MIN_CODE_LENGTH: usize = 4;
/// Longest confirmation code the store will generate
pub const MAX_CODE_LENGTH: usize = 64;

fn default_commission_rate() -> Decimal {
    Decimal::new(10, 2)
}

fn default_code_length() -> usize {
    8
}

/// Tunables for a [`ShipmentStore`](crate::store::ShipmentStore).
///
/// Missing fields take their defaults, so `{}` is a valid document.
///
/// # Example
///
/// ```rust
/// use shipment_lifecycle::config::StoreConfig;
/// use rust_decimal::Decimal;
///
/// let config = StoreConfig::from_json(r#"{ "commission_rate": "0.05" }"#).unwrap();
/// assert_eq!(config.commission_rate, Decimal::new(5, 2));
/// assert_eq!(config.confirmation_code_length, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Fraction of the agreed fee charged as commission
    #[serde(default = "default_commission_rate")]
    pub commission_rate: Decimal,

    /// Number of characters in generated confirmation codes
    #[serde(default = "default_code_length")]
    pub confirmation_code_length: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            commission_rate: default_commission_rate(),
            confirmation_code_length: default_code_length(),
        }
    }
}

impl StoreConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the store cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.commission_rate < Decimal::ZERO || self.commission_rate > Decimal::ONE {
            return Err(ConfigError::CommissionRateOutOfRange(self.commission_rate));
        }
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.confirmation_code_length) {
            return Err(ConfigError::CodeLengthOutOfRange {
                found: self.confirmation_code_length,
                min: MIN_CODE_LENGTH,
                max: MAX_CODE_LENGTH,
            });
        }
        Ok(())
    }
}
