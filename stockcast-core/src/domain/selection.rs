//! Selection state: ticker, "years of prediction", and the day horizon.
//!
//! The years value and the day horizon are deliberately independent. The
//! years value is displayed as a label only; the horizon alone drives the
//! forecast. Both are surfaced so the two controls can be seen to disagree.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PERIOD_DAYS_MIN: u32 = 30;
/// Approximately five years.
pub const PERIOD_DAYS_MAX: u32 = 1825;
pub const YEARS_MIN: u8 = 1;
pub const YEARS_MAX: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("prediction period must be within {min}..={max} days, got {got}")]
    HorizonOutOfRange { got: u32, min: u32, max: u32 },

    #[error("years of prediction must be within {min}..={max}, got {got}")]
    YearsOutOfRange { got: u8, min: u8, max: u8 },
}

/// Forecast horizon in calendar days, always within [30, 1825].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ForecastHorizon(u32);

impl ForecastHorizon {
    pub fn new(days: u32) -> Result<Self, DomainError> {
        if (PERIOD_DAYS_MIN..=PERIOD_DAYS_MAX).contains(&days) {
            Ok(Self(days))
        } else {
            Err(DomainError::HorizonOutOfRange {
                got: days,
                min: PERIOD_DAYS_MIN,
                max: PERIOD_DAYS_MAX,
            })
        }
    }

    /// Slider semantics: out-of-range input snaps to the nearest bound.
    pub fn clamped(days: i64) -> Self {
        Self(days.clamp(PERIOD_DAYS_MIN as i64, PERIOD_DAYS_MAX as i64) as u32)
    }

    pub fn days(self) -> u32 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::days(self.0 as i64)
    }

    /// `from + horizon` calendar days.
    pub fn end_date_from(self, from: NaiveDate) -> NaiveDate {
        from + self.as_duration()
    }

    pub fn step(self, delta: i64) -> Self {
        Self::clamped(self.0 as i64 + delta)
    }
}

impl Default for ForecastHorizon {
    fn default() -> Self {
        Self(PERIOD_DAYS_MAX)
    }
}

impl TryFrom<u32> for ForecastHorizon {
    type Error = DomainError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<ForecastHorizon> for u32 {
    fn from(h: ForecastHorizon) -> u32 {
        h.0
    }
}

/// The "years of prediction" slider value, within [1, 5].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct YearsOfPrediction(u8);

impl YearsOfPrediction {
    pub fn new(years: u8) -> Result<Self, DomainError> {
        if (YEARS_MIN..=YEARS_MAX).contains(&years) {
            Ok(Self(years))
        } else {
            Err(DomainError::YearsOutOfRange {
                got: years,
                min: YEARS_MIN,
                max: YEARS_MAX,
            })
        }
    }

    pub fn clamped(years: i64) -> Self {
        Self(years.clamp(YEARS_MIN as i64, YEARS_MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn step(self, delta: i64) -> Self {
        Self::clamped(self.0 as i64 + delta)
    }
}

impl Default for YearsOfPrediction {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u8> for YearsOfPrediction {
    type Error = DomainError;

    fn try_from(years: u8) -> Result<Self, Self::Error> {
        Self::new(years)
    }
}

impl From<YearsOfPrediction> for u8 {
    fn from(y: YearsOfPrediction) -> u8 {
        y.0
    }
}

/// What the user currently has selected in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub ticker: String,
    pub years: YearsOfPrediction,
    pub horizon: ForecastHorizon,
}

impl SelectionState {
    pub fn new(ticker: impl Into<String>, years: YearsOfPrediction, horizon: ForecastHorizon) -> Self {
        Self {
            ticker: ticker.into(),
            years,
            horizon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_bounds() {
        assert!(ForecastHorizon::new(29).is_err());
        assert!(ForecastHorizon::new(30).is_ok());
        assert!(ForecastHorizon::new(1825).is_ok());
        assert!(ForecastHorizon::new(1826).is_err());
    }

    #[test]
    fn horizon_clamps_and_steps() {
        assert_eq!(ForecastHorizon::clamped(-5).days(), 30);
        assert_eq!(ForecastHorizon::clamped(10_000).days(), 1825);
        assert_eq!(ForecastHorizon::default().step(-1).days(), 1824);
        assert_eq!(ForecastHorizon::default().step(1).days(), 1825);
    }

    #[test]
    fn end_date_is_calendar_days() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let horizon = ForecastHorizon::new(30).unwrap();
        assert_eq!(
            horizon.end_date_from(today),
            NaiveDate::from_ymd_opt(2024, 2, 9).unwrap()
        );
    }

    #[test]
    fn years_bounds_and_default() {
        assert!(YearsOfPrediction::new(0).is_err());
        assert!(YearsOfPrediction::new(6).is_err());
        assert_eq!(YearsOfPrediction::default().get(), 2);
        assert_eq!(YearsOfPrediction::clamped(9).get(), 5);
    }

    #[test]
    fn horizon_deserialization_rejects_out_of_range() {
        let ok: ForecastHorizon = serde_json::from_str("365").unwrap();
        assert_eq!(ok.days(), 365);
        assert!(serde_json::from_str::<ForecastHorizon>("5").is_err());
    }
}
