//! Settlement configuration
//!
//! Thresholds are decimals so they can be tuned for currencies with
//! different minor-unit precision. Values may be written as TOML strings
//! (`epsilon = "0.001"`) or plain numbers (`epsilon = 0.001`).

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::currency::normalize_currency_code;
use crate::types::{decimal_input, *};

/// Balances within this distance of zero are treated as settled (0.001)
pub fn default_epsilon() -> BigDecimal {
    BigDecimal::new(1.into(), 3)
}

/// Net balances within this distance of zero display as settled (0.01)
pub fn default_display_threshold() -> BigDecimal {
    BigDecimal::new(1.into(), 2)
}

/// Allowed deviation of a share total from 1 (0.0001)
pub fn default_share_tolerance() -> BigDecimal {
    BigDecimal::new(1.into(), 4)
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// Tolerance below which a balance counts as settled during simplification
    #[serde(
        default = "default_epsilon",
        deserialize_with = "decimal_input::deserialize"
    )]
    pub epsilon: BigDecimal,
    /// Tolerance used when classifying a net balance for display
    #[serde(
        default = "default_display_threshold",
        deserialize_with = "decimal_input::deserialize"
    )]
    pub display_threshold: BigDecimal,
    /// ISO 4217 code used when formatting report amounts
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Allowed deviation of a share total from 1 when validating
    #[serde(
        default = "default_share_tolerance",
        deserialize_with = "decimal_input::deserialize"
    )]
    pub share_tolerance: BigDecimal,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            display_threshold: default_display_threshold(),
            currency: default_currency(),
            share_tolerance: default_share_tolerance(),
        }
    }
}

impl SettlementConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> SettleResult<Self> {
        let config: SettlementConfig =
            toml::from_str(content).map_err(|e| SettleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> SettleResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettleError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            epsilon = %config.epsilon,
            currency = %config.currency,
            "loaded settlement config"
        );
        Ok(config)
    }

    /// Use a different settled-balance tolerance
    pub fn with_epsilon(mut self, epsilon: BigDecimal) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Use a different report currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn validate(&self) -> SettleResult<()> {
        let zero = BigDecimal::from(0);

        if self.epsilon <= zero {
            return Err(SettleError::Config(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }

        if self.display_threshold <= zero {
            return Err(SettleError::Config(format!(
                "display_threshold must be positive, got {}",
                self.display_threshold
            )));
        }

        if self.share_tolerance < zero {
            return Err(SettleError::Config(format!(
                "share_tolerance cannot be negative, got {}",
                self.share_tolerance
            )));
        }

        normalize_currency_code(&self.currency)
            .map_err(|e| SettleError::Config(e.to_string()))?;

        Ok(())
    }
}
