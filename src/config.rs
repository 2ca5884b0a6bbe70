//! Zakat engine configuration: nisab threshold and rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

use crate::inputs::IntoAmount;
use crate::types::AssetError;

/// The conventional annual Zakat rate: 2.5%.
pub const DEFAULT_ZAKAT_RATE: Decimal = dec!(0.025);

/// Threshold and rate configuration for the Zakat engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZakatConfig {
    /// Minimum aggregate wealth above which the obligation becomes due.
    pub nisab_threshold: Decimal,
    /// Rate applied to the full net worth once liable. Defaults to 2.5%.
    pub zakat_rate: Decimal,
}

impl ZakatConfig {
    pub fn builder() -> ZakatConfigBuilder {
        ZakatConfigBuilder::default()
    }

    /// Creates a configuration with the default 2.5% rate.
    pub fn new(nisab_threshold: impl IntoAmount) -> Result<Self, AssetError> {
        let config = Self {
            nisab_threshold: nisab_threshold.into_amount()?,
            zakat_rate: DEFAULT_ZAKAT_RATE,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_rate(mut self, rate: impl IntoAmount) -> Result<Self, AssetError> {
        self.zakat_rate = rate.into_amount()?;
        self.validate()?;
        Ok(self)
    }

    /// Validates the configuration for logical consistency.
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.nisab_threshold <= Decimal::ZERO {
            return Err(AssetError::configuration(format!(
                "nisab threshold must be positive (got {})",
                self.nisab_threshold
            )));
        }
        if self.zakat_rate <= Decimal::ZERO || self.zakat_rate >= Decimal::ONE {
            return Err(AssetError::configuration(format!(
                "zakat rate must lie within (0, 1) (got {})",
                self.zakat_rate
            )));
        }
        Ok(())
    }

    /// Loads the configuration from `THARWA_NISAB_THRESHOLD` and, if set,
    /// `THARWA_ZAKAT_RATE`.
    pub fn from_env() -> Result<Self, AssetError> {
        let nisab = env::var("THARWA_NISAB_THRESHOLD").map_err(|_| {
            AssetError::configuration("THARWA_NISAB_THRESHOLD env var not set")
        })?;
        let nisab = nisab.as_str().into_amount()?;

        let rate = match env::var("THARWA_ZAKAT_RATE") {
            Ok(raw) => raw.as_str().into_amount()?,
            Err(_) => DEFAULT_ZAKAT_RATE,
        };

        let config = Self {
            nisab_threshold: nisab,
            zakat_rate: rate,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates the configuration from a JSON file.
    pub fn try_from_json(path: &str) -> Result<Self, AssetError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AssetError::configuration(format!("failed to read config file: {}", e))
        })?;
        let config: ZakatConfig = serde_json::from_str(&content).map_err(|e| {
            AssetError::configuration(format!("failed to parse config JSON: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Builder over [`ZakatConfig`].
///
/// Setters defer conversion failures instead of discarding them: a value
/// that does not convert is held as the error and reported by [`build`],
/// so a malformed input can never fall back to a default.
///
/// [`build`]: ZakatConfigBuilder::build
#[derive(Debug, Default)]
pub struct ZakatConfigBuilder {
    nisab_threshold: Option<Result<Decimal, AssetError>>,
    zakat_rate: Option<Result<Decimal, AssetError>>,
}

impl ZakatConfigBuilder {
    pub fn nisab_threshold(mut self, threshold: impl IntoAmount) -> Self {
        self.nisab_threshold = Some(threshold.into_amount());
        self
    }

    pub fn zakat_rate(mut self, rate: impl IntoAmount) -> Self {
        self.zakat_rate = Some(rate.into_amount());
        self
    }

    pub fn build(self) -> Result<ZakatConfig, AssetError> {
        let config = ZakatConfig {
            nisab_threshold: self.nisab_threshold.transpose()?.unwrap_or(Decimal::ZERO),
            zakat_rate: self.zakat_rate.transpose()?.unwrap_or(DEFAULT_ZAKAT_RATE),
        };
        config.validate()?;
        Ok(config)
    }
}
