//! Ticker allow-list: the fixed set of symbols the ticker select offers.

use serde::{Deserialize, Serialize};

use super::provider::DataError;
use crate::config::DashboardConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerList {
    tickers: Vec<String>,
}

impl TickerList {
    /// Build from explicit symbols. Symbols are upper-cased and
    /// de-duplicated, keeping first occurrence order. Returns `None` if empty.
    pub fn new<I, S>(tickers: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for t in tickers {
            let t = t.as_ref().trim().to_ascii_uppercase();
            if !t.is_empty() && !out.contains(&t) {
                out.push(t);
            }
        }
        if out.is_empty() {
            None
        } else {
            Some(Self { tickers: out })
        }
    }

    /// GOOG, AAPL, MSFT, GME.
    pub fn default_list() -> Self {
        Self {
            tickers: ["GOOG", "AAPL", "MSFT", "GME"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(&config.tickers).unwrap_or_else(Self::default_list)
    }

    pub fn all(&self) -> &[String] {
        &self.tickers
    }

    /// The default selection.
    pub fn first(&self) -> &str {
        &self.tickers[0]
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.tickers.iter().any(|t| t == ticker)
    }

    pub fn position(&self, ticker: &str) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tickers.get(index).map(String::as_str)
    }

    /// Reject anything outside the list before it reaches a provider.
    pub fn check(&self, ticker: &str) -> Result<(), DataError> {
        if self.contains(ticker) {
            Ok(())
        } else {
            Err(DataError::UnknownTicker {
                ticker: ticker.to_string(),
                allowed: self.tickers.join(", "),
            })
        }
    }
}

impl Default for TickerList {
    fn default() -> Self {
        Self::default_list()
    }
}
