//! The forecast table: one row per history date plus one per future day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single forecast row. Prices are in the series' own units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub ds: NaiveDate,
    pub trend: f64,
    pub trend_lower: f64,
    pub trend_upper: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub weekly: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub yearly: Option<f64>,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
    pub yhat: f64,
}

/// Ordered forecast rows covering the history dates and the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastTable {
    rows: Vec<ForecastRow>,
    history_len: usize,
}

impl ForecastTable {
    pub fn new(rows: Vec<ForecastRow>, history_len: usize) -> Self {
        Self { rows, history_len }
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of leading rows that fall on history dates.
    pub fn history_len(&self) -> usize {
        self.history_len
    }

    /// Rows past the last history date.
    pub fn future(&self) -> &[ForecastRow] {
        &self.rows[self.history_len.min(self.rows.len())..]
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.ds)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.ds)
    }

    pub fn tail(&self, n: usize) -> &[ForecastRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    pub fn has_weekly(&self) -> bool {
        self.rows.iter().any(|r| r.weekly.is_some())
    }

    pub fn has_yearly(&self) -> bool {
        self.rows.iter().any(|r| r.yearly.is_some())
    }

    /// Every row satisfies `yhat_lower <= yhat_upper`.
    pub fn bounds_ordered(&self) -> bool {
        self.rows
            .iter()
            .all(|r| r.yhat_lower <= r.yhat_upper && r.trend_lower <= r.trend_upper)
    }

    /// Write the table as CSV with a header row.
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut w = csv::Writer::from_writer(writer);
        w.write_record([
            "ds",
            "trend",
            "trend_lower",
            "trend_upper",
            "weekly",
            "yearly",
            "yhat_lower",
            "yhat_upper",
            "yhat",
        ])?;
        let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
        for r in &self.rows {
            w.write_record([
                r.ds.to_string(),
                r.trend.to_string(),
                r.trend_lower.to_string(),
                r.trend_upper.to_string(),
                opt(r.weekly),
                opt(r.yearly),
                r.yhat_lower.to_string(),
                r.yhat_upper.to_string(),
                r.yhat.to_string(),
            ])?;
        }
        w.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day: u32, yhat: f64) -> ForecastRow {
        ForecastRow {
            ds: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            trend: yhat,
            trend_lower: yhat,
            trend_upper: yhat,
            weekly: Some(0.0),
            yearly: None,
            yhat_lower: yhat - 1.0,
            yhat_upper: yhat + 1.0,
            yhat,
        }
    }

    #[test]
    fn future_and_tail_slices() {
        let t = ForecastTable::new((1..=5).map(|d| row(d, d as f64)).collect(), 3);
        assert_eq!(t.len(), 5);
        assert_eq!(t.future().len(), 2);
        assert_eq!(t.tail(2)[0].yhat, 4.0);
        assert_eq!(t.tail(10).len(), 5);
        assert!(t.has_weekly());
        assert!(!t.has_yearly());
        assert!(t.bounds_ordered());
    }

    #[test]
    fn csv_has_header_and_rows() {
        let t = ForecastTable::new(vec![row(1, 10.0)], 1);
        let mut buf = Vec::new();
        t.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("ds,trend"));
        assert!(lines.next().unwrap().starts_with("2024-01-01,10"));
    }
}
