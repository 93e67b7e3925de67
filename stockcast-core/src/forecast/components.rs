//! Component breakdown of a fitted model: trend, weekly and yearly profiles.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::model::FittedModel;
use super::seasonality::SeasonalityKind;
use super::table::ForecastTable;

/// A non-leap reference year starting on a Sunday.
const REFERENCE_YEAR: i32 = 2017;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayValue {
    pub weekday: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOfYearValue {
    pub day_of_year: u32,
    pub date: NaiveDate,
    pub value: f64,
}

/// Trend over the forecast range plus one cycle of each fitted seasonality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastComponents {
    pub trend: Vec<(NaiveDate, f64)>,
    pub weekly: Option<Vec<WeekdayValue>>,
    pub yearly: Option<Vec<DayOfYearValue>>,
}

impl ForecastComponents {
    pub fn from_model(model: &FittedModel, table: &ForecastTable) -> Self {
        let trend = table.rows().iter().map(|r| (r.ds, r.trend)).collect();

        let weekly = model.has_seasonality(SeasonalityKind::Weekly).then(|| {
            reference_days(7)
                .filter_map(|d| {
                    model
                        .seasonal(SeasonalityKind::Weekly, d)
                        .map(|value| WeekdayValue {
                            weekday: d.weekday().to_string(),
                            value,
                        })
                })
                .collect()
        });

        let yearly = model.has_seasonality(SeasonalityKind::Yearly).then(|| {
            reference_days(365)
                .filter_map(|d| {
                    model
                        .seasonal(SeasonalityKind::Yearly, d)
                        .map(|value| DayOfYearValue {
                            day_of_year: d.ordinal(),
                            date: d,
                            value,
                        })
                })
                .collect()
        });

        Self {
            trend,
            weekly,
            yearly,
        }
    }

    /// Number of component panels a chart needs.
    pub fn panel_count(&self) -> usize {
        1 + usize::from(self.weekly.is_some()) + usize::from(self.yearly.is_some())
    }
}

fn reference_days(n: i64) -> impl Iterator<Item = NaiveDate> {
    let first = NaiveDate::from_ymd_opt(REFERENCE_YEAR, 1, 1).unwrap_or_default();
    (0..n).map(move |i| first + Duration::days(i))
}
