//! Configuration loading from TOML.
//!
//! Reads `config.toml` (or the file named by `TOTE_CONFIG`) and
//! deserializes it into strongly-typed structs. Every field has a default,
//! so a missing file or a partial file is fine.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::engine::dividends::DividendConfig;
use crate::money;
use crate::types::ToteError;

/// Default config file path.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the config file path.
pub const CONFIG_PATH_ENV: &str = "TOTE_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub commission: CommissionConfig,
    pub money: MoneyConfig,
}

/// Fraction of each pool retained before dividends are paid.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommissionConfig {
    pub win: Decimal,
    pub place: Decimal,
    pub exacta: Decimal,
}

impl Default for CommissionConfig {
    fn default() -> Self {
        Self {
            win: dec!(0.15),
            place: dec!(0.12),
            exacta: dec!(0.18),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MoneyConfig {
    /// Rounding increment for stakes and dividends.
    pub increment: Decimal,
}

impl Default for MoneyConfig {
    fn default() -> Self {
        Self { increment: money::CENT }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!(path, "No config file found, using default commissions");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// The config path: `TOTE_CONFIG` if set, else `config.toml`.
    pub fn resolve_path() -> String {
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
    }

    /// Reject commissions outside `[0, 1)` and non-positive increments.
    pub fn validate(&self) -> Result<(), ToteError> {
        let commissions = [
            ("win", self.commission.win),
            ("place", self.commission.place),
            ("exacta", self.commission.exacta),
        ];
        for (name, rate) in commissions {
            if rate < Decimal::ZERO || rate >= Decimal::ONE {
                return Err(ToteError::Config(format!(
                    "{name} commission must be in [0, 1), got {rate}"
                )));
            }
        }
        if self.money.increment <= Decimal::ZERO {
            return Err(ToteError::Config(format!(
                "money increment must be positive, got {}",
                self.money.increment
            )));
        }
        Ok(())
    }

    /// Engine settings derived from this config.
    pub fn dividend_config(&self) -> DividendConfig {
        DividendConfig {
            win_commission: self.commission.win,
            place_commission: self.commission.place,
            exacta_commission: self.commission.exacta,
            increment: self.money.increment,
        }
    }
}
