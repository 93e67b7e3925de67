//! DataLoader: allow-list check, daily cache, provider fetch, normalisation.
//!
//! `load(ticker)` requests `[start_date, today]` from the provider on a cache
//! miss (or when the cached entry was fetched on an earlier day), sorts the
//! result by date, drops anything outside the requested window, and caches
//! it. Provider errors are returned to the caller and never cached. An empty
//! provider response is a valid, empty series.

use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

use super::cache::{CacheLookup, DailyCache};
use super::csv_import::CsvProvider;
use super::provider::{DataError, MarketDataProvider};
use super::synthetic::SyntheticProvider;
use super::universe::TickerList;
use super::yahoo::YahooProvider;
use crate::clock::Clock;
use crate::config::{DataConfig, ProviderKind, StockcastConfig};
use crate::domain::PriceSeries;

pub struct DataLoader {
    provider: Box<dyn MarketDataProvider>,
    cache: DailyCache,
    clock: Arc<dyn Clock>,
    tickers: TickerList,
    start_date: NaiveDate,
}

impl DataLoader {
    pub fn new(
        provider: Box<dyn MarketDataProvider>,
        clock: Arc<dyn Clock>,
        tickers: TickerList,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            provider,
            cache: DailyCache::new(),
            clock,
            tickers,
            start_date,
        }
    }

    /// Loader wired from configuration: provider kind, start date, allow-list.
    pub fn from_config(config: &StockcastConfig, clock: Arc<dyn Clock>) -> Result<Self, DataError> {
        let provider = build_provider(&config.data)?;
        Ok(Self::new(
            provider,
            clock,
            TickerList::from_config(&config.dashboard),
            config.data.start_date,
        ))
    }

    pub fn tickers(&self) -> &TickerList {
        &self.tickers
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn cache(&self) -> &DailyCache {
        &self.cache
    }

    /// Daily history for `ticker` from the start date through today.
    pub fn load(&self, ticker: &str) -> Result<Arc<PriceSeries>, DataError> {
        self.tickers.check(ticker)?;
        let today = self.clock.today();

        match self.cache.lookup(ticker, today) {
            CacheLookup::Hit(series) => {
                tracing::debug!(%ticker, rows = series.len(), "daily cache hit");
                return Ok(series);
            }
            CacheLookup::Stale { fetched_on } => {
                tracing::info!(%ticker, %fetched_on, %today, "daily cache entry stale; refetching");
            }
            CacheLookup::Miss => {
                tracing::debug!(%ticker, "daily cache miss");
            }
        }

        let fetched = self
            .provider
            .fetch(ticker, self.start_date, today)
            .inspect_err(|e| {
                tracing::warn!(%ticker, provider = self.provider.name(), error = %e, "fetch failed");
            })?;

        let bars = fetched
            .bars
            .into_iter()
            .filter(|b| b.date >= self.start_date && b.date <= today)
            .collect();
        let series = Arc::new(PriceSeries::new(ticker, bars));
        let fingerprint = series.fingerprint();

        tracing::info!(
            %ticker,
            rows = series.len(),
            source = ?fetched.source,
            fingerprint = &fingerprint[..12],
            "loaded price history"
        );

        self.cache.insert(Arc::clone(&series), today);
        Ok(series)
    }
}

/// Construct the provider named by the `[data]` config section.
pub fn build_provider(config: &DataConfig) -> Result<Box<dyn MarketDataProvider>, DataError> {
    match config.provider {
        ProviderKind::Yahoo => Ok(Box::new(YahooProvider::new(Duration::from_secs(
            config.timeout_secs,
        ))?)),
        ProviderKind::Csv => {
            let dir = config.csv_dir.clone().ok_or_else(|| {
                DataError::Other("data.csv_dir is required for the csv provider".into())
            })?;
            Ok(Box::new(CsvProvider::new(dir)))
        }
        ProviderKind::Synthetic => Ok(Box::new(SyntheticProvider::new())),
    }
}
