//! CSV import provider for offline use.
//!
//! Reads `<dir>/<TICKER>.csv` in the Yahoo Finance export layout:
//! `Date,Open,High,Low,Close,Adj Close,Volume`. Cells that do not parse
//! (Yahoo writes `null` for missing quotes) become NaN, and rows whose
//! prices are all missing are dropped.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::provider::{DataError, DataSource, FetchResult, MarketDataProvider};
use crate::domain::PriceBar;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Open", deserialize_with = "csv::invalid_option")]
    open: Option<f64>,
    #[serde(rename = "High", deserialize_with = "csv::invalid_option")]
    high: Option<f64>,
    #[serde(rename = "Low", deserialize_with = "csv::invalid_option")]
    low: Option<f64>,
    #[serde(rename = "Close", deserialize_with = "csv::invalid_option")]
    close: Option<f64>,
    #[serde(rename = "Adj Close", default, deserialize_with = "csv::invalid_option")]
    adj_close: Option<f64>,
    #[serde(rename = "Volume", deserialize_with = "csv::invalid_option")]
    volume: Option<f64>,
}

pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, ticker: &str) -> PathBuf {
        self.dir.join(format!("{ticker}.csv"))
    }

    fn read_bars(path: &Path) -> Result<Vec<PriceBar>, DataError> {
        let csv_err = |reason: String| DataError::CsvImport {
            path: path.display().to_string(),
            reason,
        };

        let mut reader = csv::Reader::from_path(path).map_err(|e| csv_err(e.to_string()))?;
        let mut bars = Vec::new();

        for (line, record) in reader.deserialize::<CsvRow>().enumerate() {
            let row = record.map_err(|e| csv_err(format!("row {}: {e}", line + 2)))?;
            if row.open.is_none() && row.high.is_none() && row.low.is_none() && row.close.is_none()
            {
                continue;
            }
            let close = row.close.unwrap_or(f64::NAN);
            bars.push(PriceBar {
                date: row.date,
                open: row.open.unwrap_or(f64::NAN),
                high: row.high.unwrap_or(f64::NAN),
                low: row.low.unwrap_or(f64::NAN),
                close,
                adj_close: row.adj_close.unwrap_or(close),
                volume: row.volume.map(|v| v.max(0.0) as u64).unwrap_or(0),
            });
        }

        Ok(bars)
    }
}

impl MarketDataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let path = self.path_for(ticker);
        if !path.is_file() {
            return Err(DataError::CsvImport {
                path: path.display().to_string(),
                reason: "file not found".into(),
            });
        }

        let bars = Self::read_bars(&path)?
            .into_iter()
            .filter(|b| b.date >= start && b.date <= end)
            .collect();

        Ok(FetchResult {
            ticker: ticker.to_string(),
            bars,
            source: DataSource::CsvImport,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SAMPLE: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2024-01-02,100.0,101.0,99.0,100.5,100.4,1000
2024-01-03,null,null,null,null,null,null
2024-01-04,102.0,103.0,101.0,102.5,102.4,1200
2024-01-05,103.0,104.0,102.0,103.5,103.4,1300
";

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn reads_yahoo_export_and_filters_range() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("GOOG.csv"), SAMPLE).unwrap();

        let provider = CsvProvider::new(dir.path());
        let result = provider.fetch("GOOG", d(2024, 1, 1), d(2024, 1, 4)).unwrap();

        assert_eq!(result.source, DataSource::CsvImport);
        assert_eq!(result.bars.len(), 2);
        assert_eq!(result.bars[0].adj_close, 100.4);
        assert_eq!(result.bars[1].date, d(2024, 1, 4));
    }

    #[test]
    fn missing_file_is_a_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = CsvProvider::new(dir.path());
        let err = provider.fetch("AAPL", d(2024, 1, 1), d(2024, 1, 4)).unwrap_err();
        assert!(matches!(err, DataError::CsvImport { .. }));
    }

    #[test]
    fn malformed_date_reports_row() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("MSFT.csv"),
            "Date,Open,High,Low,Close,Adj Close,Volume\nnot-a-date,1,1,1,1,1,1\n",
        )
        .unwrap();
        let provider = CsvProvider::new(dir.path());
        let err = provider.fetch("MSFT", d(2024, 1, 1), d(2024, 1, 4)).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }
}
