//! Builder for constructing shipment stores.

use crate::builder::error::BuildError;
use crate::config::StoreConfig;
use crate::store::{IdGenerator, ShipmentStore, UuidIdGenerator};
use rust_decimal::Decimal;

/// Builder for constructing stores with a fluent API.
///
/// # Example
///
/// ```rust
/// use shipment_lifecycle::store::{SequentialIdGenerator, ShipmentStore};
/// use rust_decimal::Decimal;
///
/// let store = ShipmentStore::builder()
///     .commission_rate(Decimal::new(5, 2))
///     .id_generator(SequentialIdGenerator::new("shp-"))
///     .build()
///     .unwrap();
///
/// assert_eq!(store.config().commission_rate, Decimal::new(5, 2));
/// ```
pub struct ShipmentStoreBuilder {
    config: StoreConfig,
    ids: Option<Box<dyn IdGenerator>>,
}

impl ShipmentStoreBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: StoreConfig::default(),
            ids: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the fraction of the agreed fee charged as commission.
    pub fn commission_rate(mut self, rate: Decimal) -> Self {
        self.config.commission_rate = rate;
        self
    }

    /// Set the length of generated confirmation codes.
    pub fn confirmation_code_length(mut self, len: usize) -> Self {
        self.config.confirmation_code_length = len;
        self
    }

    /// Use a custom id generator (default: UUID v4).
    pub fn id_generator<G>(mut self, ids: G) -> Self
    where
        G: IdGenerator + 'static,
    {
        self.ids = Some(Box::new(ids));
        self
    }

    /// Build the store.
    /// Returns an error if the configuration is out of range.
    pub fn build(self) -> Result<ShipmentStore, BuildError> {
        self.config.validate()?;
        let ids = self.ids.unwrap_or_else(|| Box::new(UuidIdGenerator));
        Ok(ShipmentStore::from_parts(self.config, ids))
    }
}

impl Default for ShipmentStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::store::SequentialIdGenerator;

    #[test]
    fn defaults_build() {
        let store = ShipmentStoreBuilder::new().build().unwrap();
        assert_eq!(store.config(), &StoreConfig::default());
        assert!(store.is_empty());
    }

    #[test]
    fn builder_rejects_negative_rate() {
        let result = ShipmentStoreBuilder::new()
            .commission_rate(Decimal::from(-1))
            .build();

        assert!(matches!(
            result,
            Err(BuildError::InvalidConfig(
                ConfigError::CommissionRateOutOfRange(_)
            ))
        ));
    }

    #[test]
    fn builder_rejects_oversized_codes() {
        let result = ShipmentStoreBuilder::new()
            .confirmation_code_length(1000)
            .build();

        assert!(matches!(
            result,
            Err(BuildError::InvalidConfig(
                ConfigError::CodeLengthOutOfRange { found: 1000, .. }
            ))
        ));
    }

    #[test]
    fn fluent_api_applies_settings() {
        let store = ShipmentStoreBuilder::new()
            .config(StoreConfig::default())
            .commission_rate(Decimal::new(5, 2))
            .confirmation_code_length(12)
            .id_generator(SequentialIdGenerator::new("shp-"))
            .build()
            .unwrap();

        assert_eq!(store.config().commission_rate, Decimal::new(5, 2));
        assert_eq!(store.config().confirmation_code_length, 12);
    }
}
