//! The display model: everything one dashboard cycle decided to show.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{PriceSeries, SelectionState};
use crate::forecast::{ForecastComponents, ForecastResult};
use crate::frame::TablePreview;

pub const PAGE_TITLE: &str = "Stock Trend Prediction App";
pub const RAW_DATA_HEADER: &str = "Raw Data";
pub const RAW_CHART_HEADER: &str = "Raw Data Visualization";
pub const RAW_CHART_TITLE: &str = "Time Series Data with Rangeslider";
pub const OPEN_TRACE: &str = "Opening Price";
pub const CLOSE_TRACE: &str = "Closing Price";
pub const FORECAST_DATA_HEADER: &str = "Forecast Data";
pub const COMPONENTS_CAPTION: &str = "Forecast Components";
pub const INSUFFICIENT_DATA: &str =
    "Insufficient data points for prediction. Please choose another stock or adjust the date range.";
pub const PROCEEDING: &str = "Data loaded successfully. Proceeding with prediction.";

/// Which branch the controller took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardState {
    /// Fewer than two rows; the forecaster was not called.
    Insufficient,
    /// Two or more rows and a successful forecast.
    Forecastable,
    /// The provider or the forecaster failed.
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
}

/// Open and close traces over the full series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawChart {
    pub title: String,
    pub points: Vec<RawPoint>,
}

impl RawChart {
    pub fn from_series(series: &PriceSeries) -> Self {
        Self {
            title: RAW_CHART_TITLE.to_string(),
            points: series
                .bars()
                .iter()
                .map(|b| RawPoint {
                    date: b.date,
                    open: b.open,
                    close: b.close,
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPoint {
    pub ds: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

/// Observed closes overlaid with the predicted value and its interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastChart {
    pub observed: Vec<(NaiveDate, f64)>,
    pub band: Vec<BandPoint>,
    pub history_end: NaiveDate,
}

impl ForecastChart {
    pub fn from_result(result: &ForecastResult) -> Self {
        Self {
            observed: result.model.history().to_vec(),
            band: result
                .table
                .rows()
                .iter()
                .map(|r| BandPoint {
                    ds: r.ds,
                    yhat: r.yhat,
                    yhat_lower: r.yhat_lower,
                    yhat_upper: r.yhat_upper,
                })
                .collect(),
            history_end: result.model.last_history_date(),
        }
    }
}

/// The part of the page only a successful forecast produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSection {
    pub preview: TablePreview,
    pub plot_caption: String,
    pub chart: ForecastChart,
    pub components: ForecastComponents,
    pub end_date: NaiveDate,
    pub horizon_days: u32,
}

impl ForecastSection {
    pub fn end_date_line(&self) -> String {
        format!(
            "End Date of Prediction: {} ({} days ahead)",
            self.end_date.format("%Y-%m-%d"),
            self.horizon_days
        )
    }
}

/// One full page. Built by `DashboardController::render`, drawn by `present`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub title: String,
    pub selection: SelectionState,
    pub today: NaiveDate,
    pub state: DashboardState,
    pub raw_preview: TablePreview,
    pub raw_chart: RawChart,
    pub status: StatusMessage,
    pub forecast: Option<ForecastSection>,
}

impl DisplayModel {
    pub fn years_label(&self) -> String {
        format!("Years of Prediction: {}", self.selection.years.get())
    }

    pub fn horizon_label(&self) -> String {
        format!("Prediction Period: {} days", self.selection.horizon.days())
    }
}

/// "Forecast Plot for N Years".
pub fn years_caption(years: u8) -> String {
    format!("Forecast Plot for {years} Years")
}
