//! Analytics and provider settings.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Annual risk-free rate in percent used by the Sharpe-like ratio.
pub const DEFAULT_RISK_FREE_RATE: f64 = 4.5;

/// Trading days used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Calendar days used to convert holding age into years.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// All settings, as read from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub analytics: AnalyticsConfig,
    pub provider: ProviderConfig,
}

/// Constants feeding the analytics engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Annual risk-free rate in percent
    pub risk_free_rate: f64,
    /// Trading days per year for volatility annualization
    pub trading_days_per_year: f64,
    /// Calendar days per year for return annualization
    pub days_per_year: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            days_per_year: DAYS_PER_YEAR,
        }
    }
}

/// How missing symbols are fetched before a recomputation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// One symbol at a time
    #[default]
    Sequential,
    /// All missing symbols at once, joined before merging
    Concurrent,
}

/// Settings for the simulated price provider and the fetch workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    /// Calendar days of history to generate
    pub history_days: u32,
    /// Simulated network latency per fetch
    pub latency_ms: u64,
    /// Daily drift of the simulated price path
    pub drift: f64,
    /// Seed for reproducible price paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub fetch_mode: FetchMode,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            history_days: 365,
            latency_ms: 300,
            drift: 0.0003,
            seed: None,
            fetch_mode: FetchMode::Sequential,
        }
    }
}

impl Settings {
    /// Get the default settings file path.
    ///
    /// Default path: `~/.config/folio/config.toml`
    /// Can be overridden with `FOLIO_CONFIG_FILE` environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var("FOLIO_CONFIG_FILE") {
            return PathBuf::from(path);
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("folio/config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Load settings from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    /// Load settings from a specific path. A missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
