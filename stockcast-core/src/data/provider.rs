//! Market data provider trait and structured error types.
//!
//! The `MarketDataProvider` trait abstracts over data sources (Yahoo Finance,
//! CSV import, synthetic, in-memory) so the loader can be driven offline and
//! mocked in tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PriceBar;

/// Structured error types for data operations.
///
/// Displayable as-is in the dashboard status line and on the CLI.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("data provider refused the request (HTTP 403)")]
    Blocked,

    #[error("ticker '{ticker}' is not one of: {allowed}")]
    UnknownTicker { ticker: String, allowed: String },

    #[error("csv import {path}: {reason}")]
    CsvImport { path: String, reason: String },

    #[error("http client setup: {0}")]
    ClientSetup(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    CsvImport,
    Synthetic,
    Static,
}

/// Result of a successful fetch for a single ticker.
///
/// `bars` may be empty: a provider with nothing to report is not an error.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub ticker: String,
    pub bars: Vec<PriceBar>,
    pub source: DataSource,
}

/// Source of daily OHLCV history.
///
/// Implementations are called once per cache miss; they do not cache, retry,
/// or sort. The loader sits above this trait.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars for `ticker` with `start <= date <= end`.
    fn fetch(&self, ticker: &str, start: NaiveDate, end: NaiveDate)
        -> Result<FetchResult, DataError>;
}

impl<P: MarketDataProvider + ?Sized> MarketDataProvider for std::sync::Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, ticker: &str, start: NaiveDate, end: NaiveDate)
        -> Result<FetchResult, DataError> {
        (**self).fetch(ticker, start, end)
    }
}
