//! Stockcast configuration, stored as TOML.
//!
//! Resolution order: an explicit `--config` path (must exist), then
//! `<config dir>/stockcast/config.toml` if present, then built-in defaults.
//! Every section is optional; missing keys take their defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{
    ForecastHorizon, YearsOfPrediction, PERIOD_DAYS_MAX, PERIOD_DAYS_MIN, YEARS_MAX, YEARS_MIN,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockcastConfig {
    pub data: DataConfig,
    pub forecast: ForecastConfig,
    pub dashboard: DashboardConfig,
}

/// Which market data provider backs the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Yahoo,
    Csv,
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// First date requested from the provider.
    pub start_date: NaiveDate,
    pub provider: ProviderKind,
    /// Directory holding `<TICKER>.csv` files when `provider = "csv"`.
    pub csv_dir: Option<PathBuf>,
    /// HTTP request timeout for the Yahoo provider.
    pub timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default(),
            provider: ProviderKind::Yahoo,
            csv_dir: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub n_changepoints: usize,
    /// Fraction of history (by row) in which changepoints may be placed.
    pub changepoint_range: f64,
    pub changepoint_prior_scale: f64,
    pub seasonality_prior_scale: f64,
    pub yearly_order: usize,
    pub weekly_order: usize,
    /// Width of the `yhat_lower..yhat_upper` interval, in (0, 1).
    pub interval_width: f64,
    /// Monte Carlo draws for the interval; 0 disables sampling.
    pub uncertainty_samples: usize,
    pub seed: u64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            n_changepoints: 25,
            changepoint_range: 0.8,
            changepoint_prior_scale: 0.05,
            seasonality_prior_scale: 10.0,
            yearly_order: 10,
            weekly_order: 3,
            interval_width: 0.8,
            uncertainty_samples: 1000,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Allow-list shown in the ticker select; the first entry is the default.
    pub tickers: Vec<String>,
    /// Rows shown in the raw and forecast tail previews.
    pub preview_rows: usize,
    pub default_years: u8,
    pub default_period_days: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tickers: ["GOOG", "AAPL", "MSFT", "GME"]
                .into_iter()
                .map(String::from)
                .collect(),
            preview_rows: 5,
            default_years: 2,
            default_period_days: PERIOD_DAYS_MAX,
        }
    }
}

impl StockcastConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Resolve the effective configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config dir>/stockcast/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("stockcast").join("config.toml"))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.dashboard;
        if d.tickers.is_empty() {
            return Err(ConfigError::Invalid("dashboard.tickers must not be empty".into()));
        }
        if d.tickers.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::Invalid("dashboard.tickers contains a blank symbol".into()));
        }
        if d.preview_rows == 0 {
            return Err(ConfigError::Invalid("dashboard.preview_rows must be at least 1".into()));
        }
        YearsOfPrediction::new(d.default_years).map_err(|_| {
            ConfigError::Invalid(format!(
                "dashboard.default_years must be within {YEARS_MIN}..={YEARS_MAX}"
            ))
        })?;
        ForecastHorizon::new(d.default_period_days).map_err(|_| {
            ConfigError::Invalid(format!(
                "dashboard.default_period_days must be within {PERIOD_DAYS_MIN}..={PERIOD_DAYS_MAX}"
            ))
        })?;

        let f = &self.forecast;
        if !(f.changepoint_range > 0.0 && f.changepoint_range <= 1.0) {
            return Err(ConfigError::Invalid("forecast.changepoint_range must be in (0, 1]".into()));
        }
        if !(f.interval_width > 0.0 && f.interval_width < 1.0) {
            return Err(ConfigError::Invalid("forecast.interval_width must be in (0, 1)".into()));
        }
        if f.changepoint_prior_scale <= 0.0 || f.seasonality_prior_scale <= 0.0 {
            return Err(ConfigError::Invalid("forecast prior scales must be positive".into()));
        }

        if self.data.provider == ProviderKind::Csv && self.data.csv_dir.is_none() {
            return Err(ConfigError::Invalid(
                "data.csv_dir is required when data.provider = \"csv\"".into(),
            ));
        }
        if self.data.timeout_secs == 0 {
            return Err(ConfigError::Invalid("data.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
