//! In-memory provider with a call counter, for tests and fixtures.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::provider::{DataError, DataSource, FetchResult, MarketDataProvider};
use crate::domain::PriceBar;

#[derive(Debug, Default)]
pub struct StaticProvider {
    bars: HashMap<String, Vec<PriceBar>>,
    failures: HashMap<String, String>,
    calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `bars` for `ticker` (filtered to the requested range on fetch).
    pub fn with_bars(mut self, ticker: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        self.bars.insert(ticker.into(), bars);
        self
    }

    /// Fail every fetch of `ticker` with `DataError::Other(message)`.
    pub fn failing(mut self, ticker: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(ticker.into(), message.into());
        self
    }

    /// Number of `fetch` calls served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MarketDataProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.failures.get(ticker) {
            return Err(DataError::Other(message.clone()));
        }

        let bars = self
            .bars
            .get(ticker)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start && b.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(FetchResult {
            ticker: ticker.to_string(),
            bars,
            source: DataSource::Static,
        })
    }
}
