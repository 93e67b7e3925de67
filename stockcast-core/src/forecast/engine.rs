//! The `ForecastEngine` seam and its default implementation.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use super::components::ForecastComponents;
use super::model::FittedModel;
use super::table::ForecastTable;
use crate::config::ForecastConfig;
use crate::domain::{ForecastHorizon, PriceSeries};
use crate::rng::RngHierarchy;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    #[error("insufficient data: need at least {required} usable observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("degenerate history: {0}")]
    DegenerateHistory(String),

    #[error("numerical failure while fitting: {0}")]
    Numerical(String),
}

/// A fitted model paired with the table it produced.
#[derive(Debug, Clone)]
pub struct ForecastResult {
    pub model: Arc<FittedModel>,
    pub table: ForecastTable,
}

impl ForecastResult {
    pub fn components(&self) -> ForecastComponents {
        ForecastComponents::from_model(&self.model, &self.table)
    }
}

/// Fits a series once and predicts history plus `horizon` calendar days.
pub trait ForecastEngine: Send + Sync {
    fn name(&self) -> &str;

    fn forecast(
        &self,
        series: &PriceSeries,
        horizon: ForecastHorizon,
    ) -> Result<ForecastResult, ForecastError>;
}

impl<E: ForecastEngine + ?Sized> ForecastEngine for Arc<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn forecast(
        &self,
        series: &PriceSeries,
        horizon: ForecastHorizon,
    ) -> Result<ForecastResult, ForecastError> {
        (**self).forecast(series, horizon)
    }
}

/// Additive trend + seasonality engine with seeded Monte Carlo intervals.
#[derive(Debug, Clone)]
pub struct AdditiveEngine {
    config: ForecastConfig,
    rng: RngHierarchy,
}

impl AdditiveEngine {
    pub fn new(config: ForecastConfig) -> Self {
        let rng = RngHierarchy::new(config.seed);
        Self { config, rng }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }
}

impl Default for AdditiveEngine {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}

impl ForecastEngine for AdditiveEngine {
    fn name(&self) -> &str {
        "additive"
    }

    fn forecast(
        &self,
        series: &PriceSeries,
        horizon: ForecastHorizon,
    ) -> Result<ForecastResult, ForecastError> {
        let points: Vec<_> = series.closes().collect();
        let model = FittedModel::fit(&points, &self.config)?;
        debug!(
            ticker = series.ticker(),
            observations = model.history().len(),
            changepoints = model.changepoint_dates().len(),
            seasonalities = model.seasonalities().len(),
            sigma = model.sigma(),
            "model fitted"
        );

        let dates = model.future_dates(horizon.days());
        let mut rng = self.rng.rng_for(series.ticker(), horizon.days());
        let table = model.predict(
            &dates,
            self.config.uncertainty_samples,
            self.config.interval_width,
            &mut rng,
        );
        info!(
            ticker = series.ticker(),
            horizon_days = horizon.days(),
            rows = table.len(),
            "forecast complete"
        );

        Ok(ForecastResult {
            model: Arc::new(model),
            table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceBar;
    use chrono::{Duration, NaiveDate};

    fn series(n: i64) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let bars = (0..n)
            .map(|i| {
                let p = 100.0 + i as f64;
                PriceBar {
                    date: start + Duration::days(i),
                    open: p,
                    high: p + 1.0,
                    low: p - 1.0,
                    close: p,
                    adj_close: p,
                    volume: 1_000,
                }
            })
            .collect();
        PriceSeries::new("TEST", bars)
    }

    fn fast_engine() -> AdditiveEngine {
        AdditiveEngine::new(ForecastConfig {
            uncertainty_samples: 100,
            ..ForecastConfig::default()
        })
    }

    #[test]
    fn forecast_extends_by_horizon() {
        let s = series(40);
        let h = ForecastHorizon::new(30).unwrap();
        let result = fast_engine().forecast(&s, h).unwrap();
        assert_eq!(result.table.len(), 70);
        assert_eq!(
            result.table.last_date(),
            Some(s.last_date().unwrap() + Duration::days(30))
        );
        assert_eq!(result.table.history_len(), 40);
    }

    #[test]
    fn same_inputs_same_bounds() {
        let s = series(40);
        let h = ForecastHorizon::new(60).unwrap();
        let e = fast_engine();
        let a = e.forecast(&s, h).unwrap();
        let b = e.forecast(&s, h).unwrap();
        assert_eq!(a.table, b.table);
    }

    #[test]
    fn short_series_is_an_error_not_a_panic() {
        let h = ForecastHorizon::new(30).unwrap();
        assert!(matches!(
            fast_engine().forecast(&series(1), h),
            Err(ForecastError::InsufficientData { .. })
        ));
        assert!(fast_engine().forecast(&series(0), h).is_err());
    }
}
