//! Polars frames for price series and forecast tables, and the string
//! previews the dashboard shows of their last rows.

use chrono::{Duration, NaiveDate};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::PriceSeries;
use crate::forecast::ForecastTable;

/// Column header of the leading row-position column in previews.
pub const INDEX_COLUMN: &str = "#";

fn epoch_days(d: NaiveDate) -> i32 {
    (d - NaiveDate::default()).num_days() as i32
}

fn date_column(name: &str, dates: impl Iterator<Item = NaiveDate>) -> PolarsResult<Column> {
    let days: Vec<i32> = dates.map(epoch_days).collect();
    Column::new(name.into(), days).cast(&DataType::Date)
}

/// `Date, Open, High, Low, Close, Adj Close, Volume`, one row per bar.
pub fn series_frame(series: &PriceSeries) -> PolarsResult<DataFrame> {
    let bars = series.bars();
    DataFrame::new(vec![
        date_column("Date", bars.iter().map(|b| b.date))?,
        Column::new("Open".into(), bars.iter().map(|b| b.open).collect::<Vec<f64>>()),
        Column::new("High".into(), bars.iter().map(|b| b.high).collect::<Vec<f64>>()),
        Column::new("Low".into(), bars.iter().map(|b| b.low).collect::<Vec<f64>>()),
        Column::new("Close".into(), bars.iter().map(|b| b.close).collect::<Vec<f64>>()),
        Column::new(
            "Adj Close".into(),
            bars.iter().map(|b| b.adj_close).collect::<Vec<f64>>(),
        ),
        Column::new("Volume".into(), bars.iter().map(|b| b.volume).collect::<Vec<u64>>()),
    ])
}

/// One row per forecast date. Seasonal columns appear only when fitted.
pub fn forecast_frame(table: &ForecastTable) -> PolarsResult<DataFrame> {
    let rows = table.rows();
    let f = |get: fn(&crate::forecast::ForecastRow) -> f64| -> Vec<f64> {
        rows.iter().map(get).collect()
    };
    let mut columns = vec![
        date_column("ds", rows.iter().map(|r| r.ds))?,
        Column::new("trend".into(), f(|r| r.trend)),
        Column::new("trend_lower".into(), f(|r| r.trend_lower)),
        Column::new("trend_upper".into(), f(|r| r.trend_upper)),
    ];
    if table.has_weekly() {
        let v: Vec<Option<f64>> = rows.iter().map(|r| r.weekly).collect();
        columns.push(Column::new("weekly".into(), v));
    }
    if table.has_yearly() {
        let v: Vec<Option<f64>> = rows.iter().map(|r| r.yearly).collect();
        columns.push(Column::new("yearly".into(), v));
    }
    columns.push(Column::new("yhat_lower".into(), f(|r| r.yhat_lower)));
    columns.push(Column::new("yhat_upper".into(), f(|r| r.yhat_upper)));
    columns.push(Column::new("yhat".into(), f(|r| r.yhat)));
    DataFrame::new(columns)
}

/// A stringified tail of a frame, ready for any table widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Height of the frame the preview was cut from.
    pub total_rows: usize,
}

impl TablePreview {
    /// Last `n` rows of `df`, each prefixed by its position in the full frame.
    pub fn tail_of(df: &DataFrame, n: usize) -> PolarsResult<Self> {
        let total_rows = df.height();
        let tail = df.tail(Some(n));
        let offset = total_rows - tail.height();

        let mut columns = Vec::with_capacity(tail.width() + 1);
        columns.push(INDEX_COLUMN.to_string());
        columns.extend(tail.get_columns().iter().map(|c| c.name().to_string()));

        let mut rows = Vec::with_capacity(tail.height());
        for i in 0..tail.height() {
            let mut row = Vec::with_capacity(columns.len());
            row.push((offset + i).to_string());
            for col in tail.get_columns() {
                row.push(format_cell(&col.get(i)?));
            }
            rows.push(row);
        }

        Ok(Self {
            columns,
            rows,
            total_rows,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn format_cell(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Float64(v) => format!("{v:.2}"),
        AnyValue::Float32(v) => format!("{v:.2}"),
        AnyValue::Date(days) => (NaiveDate::default() + Duration::days(i64::from(*days))).to_string(),
        AnyValue::String(s) => (*s).to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceBar;

    fn series(n: i64) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PriceSeries::new(
            "GOOG",
            (0..n)
                .map(|i| PriceBar {
                    date: start + Duration::days(i),
                    open: 10.0 + i as f64,
                    high: 11.0 + i as f64,
                    low: 9.0 + i as f64,
                    close: 10.5 + i as f64,
                    adj_close: 10.5 + i as f64,
                    volume: 100 * i as u64,
                })
                .collect(),
        )
    }

    #[test]
    fn series_frame_has_yahoo_columns() {
        let df = series_frame(&series(3)).unwrap();
        assert_eq!(df.height(), 3);
        let names: Vec<String> = df.get_columns().iter().map(|c| c.name().to_string()).collect();
        assert_eq!(
            names,
            ["Date", "Open", "High", "Low", "Close", "Adj Close", "Volume"]
        );
    }

    #[test]
    fn tail_preview_keeps_positions_and_formats() {
        let df = series_frame(&series(8)).unwrap();
        let p = TablePreview::tail_of(&df, 5).unwrap();
        assert_eq!(p.total_rows, 8);
        assert_eq!(p.rows.len(), 5);
        assert_eq!(p.columns[0], INDEX_COLUMN);
        assert_eq!(p.rows[0][0], "3");
        assert_eq!(p.rows[0][1], "2024-01-04");
        assert_eq!(p.rows[0][2], "13.00");
        assert_eq!(p.rows[4][7], "700");
    }

    #[test]
    fn tail_of_short_and_empty_frames() {
        let df = series_frame(&series(2)).unwrap();
        assert_eq!(TablePreview::tail_of(&df, 5).unwrap().rows.len(), 2);
        let empty = series_frame(&series(0)).unwrap();
        let p = TablePreview::tail_of(&empty, 5).unwrap();
        assert!(p.is_empty());
        assert_eq!(p.columns.len(), 8);
    }
}
