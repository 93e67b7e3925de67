//! Process-wide per-ticker daily cache.
//!
//! Key = ticker, value = (series, fetch date). An entry is valid only while
//! its fetch date equals the caller's "today"; the first lookup on a later
//! day reports it stale and the loader replaces it. There is no eviction and
//! no size bound beyond the ticker allow-list.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::PriceSeries;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub series: Arc<PriceSeries>,
    pub fetched_on: NaiveDate,
}

impl CacheEntry {
    pub fn is_fresh(&self, today: NaiveDate) -> bool {
        self.fetched_on == today
    }
}

/// Outcome of a cache lookup.
#[derive(Debug, Clone)]
pub enum CacheLookup {
    Hit(Arc<PriceSeries>),
    Stale { fetched_on: NaiveDate },
    Miss,
}

#[derive(Debug, Default)]
pub struct DailyCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl DailyCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // A poisoned lock still holds whole entries; keep serving them.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn lookup(&self, ticker: &str, today: NaiveDate) -> CacheLookup {
        match self.entries().get(ticker) {
            Some(entry) if entry.is_fresh(today) => CacheLookup::Hit(Arc::clone(&entry.series)),
            Some(entry) => CacheLookup::Stale {
                fetched_on: entry.fetched_on,
            },
            None => CacheLookup::Miss,
        }
    }

    /// Store a freshly fetched series, replacing any previous entry (last write wins).
    pub fn insert(&self, series: Arc<PriceSeries>, fetched_on: NaiveDate) {
        let ticker = series.ticker().to_string();
        self.entries().insert(
            ticker,
            CacheEntry {
                series,
                fetched_on,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    /// Snapshot of (ticker, fetch date, rows), sorted by ticker.
    pub fn status(&self) -> Vec<(String, NaiveDate, usize)> {
        let mut out: Vec<_> = self
            .entries()
            .iter()
            .map(|(t, e)| (t.clone(), e.fetched_on, e.series.len()))
            .collect();
        out.sort();
        out
    }
}
