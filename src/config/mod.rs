use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::Result,
    projection::{BillTotalPolicy, ContributionMode, DEFAULT_MAX_PROJECTION_MONTHS},
    utils::paths::{app_data_dir, config_file_in, ensure_dir, write_atomic},
};

const DEFAULT_CURRENCY_SYMBOL: &str = "$";
const DEFAULT_PLACEHOLDER_LABEL: &str = "---";
const DEFAULT_LOW_BALANCE_THRESHOLD: i64 = 100;

/// User preferences that shape projections and how they are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    /// Shown in place of an empty day label.
    pub placeholder_label: String,
    /// Balances at or below this are flagged as low.
    pub low_balance_threshold: Decimal,
    pub max_projection_months: i64,
    pub contribution_mode: ContributionMode,
    pub bill_total_policy: BillTotalPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.into(),
            placeholder_label: DEFAULT_PLACEHOLDER_LABEL.into(),
            low_balance_threshold: Decimal::from(DEFAULT_LOW_BALANCE_THRESHOLD),
            max_projection_months: DEFAULT_MAX_PROJECTION_MONTHS,
            contribution_mode: ContributionMode::default(),
            bill_total_policy: BillTotalPolicy::default(),
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    /// Reads the stored config, falling back to defaults when none was saved yet.
    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            tracing::debug!(path = %self.path.display(), "no config file; using defaults");
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, json.as_bytes())?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn load_without_file_returns_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let config = manager.load().expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.placeholder_label, "---");
        assert_eq!(config.low_balance_threshold, dec!(100));
        assert_eq!(config.max_projection_months, 600);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let config = Config {
            currency_symbol: "€".into(),
            contribution_mode: ContributionMode::DeductFromChecking,
            bill_total_policy: BillTotalPolicy::OccurrenceCount,
            ..Config::default()
        };
        manager.save(&config).expect("save");
        assert_eq!(manager.load().expect("load"), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        fs::write(manager.path(), r#"{ "max_projection_months": 12 }"#).expect("write");
        let config = manager.load().expect("load");
        assert_eq!(config.max_projection_months, 12);
        assert_eq!(config.currency_symbol, "$");
    }
}
