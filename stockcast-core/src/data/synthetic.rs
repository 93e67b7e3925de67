//! Synthetic random-walk provider for demos and offline development.
//!
//! Each ticker gets its own deterministic walk (seeded from the ticker via
//! BLAKE3), weekdays only, starting at 100.0. The data is clearly fake and is
//! tagged `DataSource::Synthetic`.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{DataError, DataSource, FetchResult, MarketDataProvider};
use crate::domain::PriceBar;

#[derive(Debug, Default, Clone, Copy)]
pub struct SyntheticProvider;

impl SyntheticProvider {
    pub fn new() -> Self {
        Self
    }

    /// Generate the walk for `ticker` over `[start, end]`.
    pub fn generate(ticker: &str, start: NaiveDate, end: NaiveDate) -> Vec<PriceBar> {
        let seed = *blake3::hash(ticker.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let mut bars = Vec::new();
        let mut price = 100.0_f64;
        let mut current = start;

        while current <= end {
            if matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
                current += Duration::days(1);
                continue;
            }

            // Slight upward drift so forecasts have a visible trend.
            let daily_return: f64 = rng.gen_range(-0.02..0.0215);
            let open = price;
            let close = price * (1.0 + daily_return);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(500_000..5_000_000u64);

            bars.push(PriceBar {
                date: current,
                open,
                high,
                low,
                close,
                adj_close: close,
                volume,
            });

            price = close;
            current += Duration::days(1);
        }

        bars
    }
}

impl MarketDataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        Ok(FetchResult {
            ticker: ticker.to_string(),
            bars: Self::generate(ticker, start, end),
            source: DataSource::Synthetic,
        })
    }
}
