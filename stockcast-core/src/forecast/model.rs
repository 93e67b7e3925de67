//! Additive piecewise-linear trend + Fourier seasonality model.
//!
//! `y(t) = g(t) + s_yearly(t) + s_weekly(t) + e`, fitted on max-abs scaled
//! closes against time scaled to [0, 1] over the history span. Changepoint
//! slopes and seasonal coefficients are ridge-penalised; the penalty
//! strength comes from the residual variance of an unpenalised first pass.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::engine::ForecastError;
use super::linalg::NormalEquations;
use super::seasonality::{auto_seasonalities, Seasonality, SeasonalityKind};
use super::table::{ForecastRow, ForecastTable};
use super::uncertainty::{interval, standard_normal, TrendPath};
use crate::config::ForecastConfig;

/// Minimum usable observations for a fit.
pub const MIN_OBSERVATIONS: usize = 2;

/// Ridge added to every coefficient so the system stays positive definite.
const JITTER: f64 = 1e-8;
/// First-pass ridge used only to estimate the residual variance.
const FIRST_PASS_RIDGE: f64 = 1e-6;
/// Prior scale for the base slope and offset.
const BASE_PRIOR_SCALE: f64 = 5.0;

/// A fitted model. Holds everything needed to predict any date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    start: NaiveDate,
    span_days: f64,
    y_scale: f64,
    k: f64,
    m: f64,
    changepoints: Vec<f64>,
    deltas: Vec<f64>,
    seasonalities: Vec<Seasonality>,
    betas: Vec<Vec<f64>>,
    sigma: f64,
    history: Vec<(NaiveDate, f64)>,
    history_dates: Vec<NaiveDate>,
}

struct Layout<'a> {
    changepoints: &'a [f64],
    seasonalities: &'a [Seasonality],
}

impl Layout<'_> {
    fn cols(&self) -> usize {
        2 + self.changepoints.len() + self.seasonalities.iter().map(|s| s.width()).sum::<usize>()
    }

    fn push_row(&self, date: NaiveDate, t: f64, out: &mut Vec<f64>) {
        out.push(1.0);
        out.push(t);
        out.extend(self.changepoints.iter().map(|s| (t - s).max(0.0)));
        for s in self.seasonalities {
            s.push_features(date, out);
        }
    }
}

impl FittedModel {
    /// Fit on `(date, value)` points. Non-finite values are dropped; their
    /// dates still count as history dates for prediction.
    pub fn fit(points: &[(NaiveDate, f64)], config: &ForecastConfig) -> Result<Self, ForecastError> {
        let mut history: Vec<(NaiveDate, f64)> =
            points.iter().copied().filter(|(_, y)| y.is_finite()).collect();
        history.sort_by_key(|(d, _)| *d);

        let mut history_dates: Vec<NaiveDate> = points.iter().map(|(d, _)| *d).collect();
        history_dates.sort();
        history_dates.dedup();

        if history.len() < MIN_OBSERVATIONS {
            return Err(ForecastError::InsufficientData {
                required: MIN_OBSERVATIONS,
                actual: history.len(),
            });
        }

        let start = history[0].0;
        let end = history[history.len() - 1].0;
        let span = (end - start).num_days();
        if span <= 0 {
            return Err(ForecastError::DegenerateHistory(format!(
                "all {} observations fall on {start}",
                history.len()
            )));
        }
        let span_days = span as f64;

        let max_abs = history.iter().map(|(_, y)| y.abs()).fold(0.0, f64::max);
        let y_scale = if max_abs > 0.0 { max_abs } else { 1.0 };

        let t_of = |d: NaiveDate| (d - start).num_days() as f64 / span_days;

        let hist_size = (history.len() as f64 * config.changepoint_range).floor() as usize;
        let n_cp = config.n_changepoints.min(hist_size.saturating_sub(1));
        let changepoints: Vec<f64> = (1..=n_cp)
            .map(|i| {
                let idx = (i as f64 * (hist_size - 1) as f64 / n_cp as f64).round() as usize;
                t_of(history[idx].0)
            })
            .collect();

        let seasonalities = auto_seasonalities(span, config);
        let layout = Layout {
            changepoints: &changepoints,
            seasonalities: &seasonalities,
        };
        let cols = layout.cols();

        let mut design = Vec::with_capacity(history.len() * cols);
        let mut ys = Vec::with_capacity(history.len());
        let mut normal = NormalEquations::new(cols);
        let mut row = Vec::with_capacity(cols);
        for (date, y) in &history {
            row.clear();
            layout.push_row(*date, t_of(*date), &mut row);
            let y = y / y_scale;
            normal.add_row(&row, y);
            design.extend_from_slice(&row);
            ys.push(y);
        }

        let residual_var = |beta: &[f64]| -> f64 {
            let sse: f64 = design
                .chunks_exact(cols)
                .zip(&ys)
                .map(|(x, y)| {
                    let fit: f64 = x.iter().zip(beta).map(|(a, b)| a * b).sum();
                    (y - fit).powi(2)
                })
                .sum();
            sse / ys.len() as f64
        };

        let first = normal
            .solve_ridge(&vec![FIRST_PASS_RIDGE; cols])
            .ok_or_else(|| ForecastError::Numerical("first-pass system not positive definite".into()))?;
        let sigma2 = residual_var(&first).max(1e-12);

        let mut penalty = Vec::with_capacity(cols);
        let base = sigma2 / BASE_PRIOR_SCALE.powi(2) + JITTER;
        penalty.push(base);
        penalty.push(base);
        let delta_pen = sigma2 / config.changepoint_prior_scale.powi(2) + JITTER;
        penalty.extend(std::iter::repeat(delta_pen).take(n_cp));
        let season_pen = sigma2 / config.seasonality_prior_scale.powi(2) + JITTER;
        penalty.resize(cols, season_pen);

        let beta = normal
            .solve_ridge(&penalty)
            .ok_or_else(|| ForecastError::Numerical("penalised system not positive definite".into()))?;
        let sigma = residual_var(&beta).sqrt();
        if !sigma.is_finite() {
            return Err(ForecastError::Numerical("residual variance is not finite".into()));
        }

        let m = beta[0];
        let k = beta[1];
        let deltas = beta[2..2 + n_cp].to_vec();
        let mut offset = 2 + n_cp;
        let betas = seasonalities
            .iter()
            .map(|s| {
                let b = beta[offset..offset + s.width()].to_vec();
                offset += s.width();
                b
            })
            .collect();

        Ok(Self {
            start,
            span_days,
            y_scale,
            k,
            m,
            changepoints,
            deltas,
            seasonalities,
            betas,
            sigma,
            history,
            history_dates,
        })
    }

    /// Observations the model was fitted on, sorted by date.
    pub fn history(&self) -> &[(NaiveDate, f64)] {
        &self.history
    }

    /// Distinct history dates, including dates whose value was unusable.
    pub fn history_dates(&self) -> &[NaiveDate] {
        &self.history_dates
    }

    pub fn last_history_date(&self) -> NaiveDate {
        self.history_dates.last().copied().unwrap_or(self.start)
    }

    pub fn seasonalities(&self) -> &[Seasonality] {
        &self.seasonalities
    }

    pub fn has_seasonality(&self, kind: SeasonalityKind) -> bool {
        self.seasonalities.iter().any(|s| s.kind == kind)
    }

    /// Changepoint locations mapped back to calendar dates.
    pub fn changepoint_dates(&self) -> Vec<NaiveDate> {
        self.changepoints
            .iter()
            .map(|t| self.start + Duration::days((t * self.span_days).round() as i64))
            .collect()
    }

    /// Residual standard deviation in price units.
    pub fn sigma(&self) -> f64 {
        self.sigma * self.y_scale
    }

    /// History dates followed by `days` consecutive calendar days.
    pub fn future_dates(&self, days: u32) -> Vec<NaiveDate> {
        let last = self.last_history_date();
        let mut dates = self.history_dates.clone();
        dates.extend((1..=i64::from(days)).map(|i| last + Duration::days(i)));
        dates
    }

    fn t_of(&self, date: NaiveDate) -> f64 {
        (date - self.start).num_days() as f64 / self.span_days
    }

    fn trend_scaled(&self, t: f64) -> f64 {
        let bends: f64 = self
            .changepoints
            .iter()
            .zip(&self.deltas)
            .map(|(s, d)| d * (t - s).max(0.0))
            .sum();
        self.k * t + self.m + bends
    }

    fn seasonal_scaled(&self, kind: SeasonalityKind, date: NaiveDate) -> Option<f64> {
        self.seasonalities
            .iter()
            .zip(&self.betas)
            .find(|(s, _)| s.kind == kind)
            .map(|(s, b)| s.evaluate(date, b))
    }

    pub fn trend(&self, date: NaiveDate) -> f64 {
        self.trend_scaled(self.t_of(date)) * self.y_scale
    }

    /// Seasonal contribution in price units, `None` if not fitted.
    pub fn seasonal(&self, kind: SeasonalityKind, date: NaiveDate) -> Option<f64> {
        self.seasonal_scaled(kind, date).map(|v| v * self.y_scale)
    }

    /// Point prediction without uncertainty.
    pub fn predict_point(&self, date: NaiveDate) -> f64 {
        let t = self.t_of(date);
        let seasonal: f64 = self
            .seasonalities
            .iter()
            .zip(&self.betas)
            .map(|(s, b)| s.evaluate(date, b))
            .sum();
        (self.trend_scaled(t) + seasonal) * self.y_scale
    }

    /// Predict every date in `dates` with simulated interval bounds.
    ///
    /// `samples == 0` collapses the bounds onto the point values.
    pub fn predict<R: Rng + ?Sized>(
        &self,
        dates: &[NaiveDate],
        samples: usize,
        width: f64,
        rng: &mut R,
    ) -> ForecastTable {
        let t_max = dates.iter().map(|d| self.t_of(*d)).fold(f64::MIN, f64::max);
        let mean_abs_delta = if self.deltas.is_empty() {
            0.0
        } else {
            self.deltas.iter().map(|d| d.abs()).sum::<f64>() / self.deltas.len() as f64
        };
        let paths: Vec<TrendPath> = (0..samples)
            .map(|_| TrendPath::sample(rng, t_max, self.changepoints.len(), mean_abs_delta))
            .collect();

        let mut trend_buf = Vec::with_capacity(samples);
        let mut yhat_buf = Vec::with_capacity(samples);
        let last = self.last_history_date();
        let mut rows = Vec::with_capacity(dates.len());
        for &ds in dates {
            let t = self.t_of(ds);
            let trend = self.trend_scaled(t);
            let weekly = self.seasonal_scaled(SeasonalityKind::Weekly, ds);
            let yearly = self.seasonal_scaled(SeasonalityKind::Yearly, ds);
            let seasonal = weekly.unwrap_or(0.0) + yearly.unwrap_or(0.0);
            let yhat = trend + seasonal;

            let ((trend_lower, trend_upper), (yhat_lower, yhat_upper)) = if samples == 0 {
                ((trend, trend), (yhat, yhat))
            } else {
                trend_buf.clear();
                yhat_buf.clear();
                for path in &paths {
                    let sim = trend + path.offset(t);
                    trend_buf.push(sim);
                    yhat_buf.push(sim + seasonal + self.sigma * standard_normal(rng));
                }
                (interval(&mut trend_buf, width), interval(&mut yhat_buf, width))
            };

            let s = self.y_scale;
            rows.push(ForecastRow {
                ds,
                trend: trend * s,
                trend_lower: trend_lower * s,
                trend_upper: trend_upper * s,
                weekly: weekly.map(|v| v * s),
                yearly: yearly.map(|v| v * s),
                yhat_lower: yhat_lower * s,
                yhat_upper: yhat_upper * s,
                yhat: yhat * s,
            });
        }
        let history_len = dates.iter().take_while(|d| **d <= last).count();
        ForecastTable::new(rows, history_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
    }

    fn linear(n: i64) -> Vec<(NaiveDate, f64)> {
        (0..n)
            .map(|i| (start() + Duration::days(i), 100.0 + 0.5 * i as f64))
            .collect()
    }

    #[test]
    fn fits_a_straight_line() {
        let cfg = ForecastConfig::default();
        let model = FittedModel::fit(&linear(200), &cfg).unwrap();
        let d = start() + Duration::days(150);
        assert!((model.predict_point(d) - 175.0).abs() < 1.0);
        let future = start() + Duration::days(260);
        assert!((model.predict_point(future) - 230.0).abs() < 5.0);
    }

    #[test]
    fn rejects_too_few_points() {
        let cfg = ForecastConfig::default();
        let err = FittedModel::fit(&linear(1), &cfg).unwrap_err();
        assert_eq!(
            err,
            ForecastError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
        let nan = vec![(start(), f64::NAN), (start() + Duration::days(1), f64::NAN)];
        assert!(matches!(
            FittedModel::fit(&nan, &cfg),
            Err(ForecastError::InsufficientData { actual: 0, .. })
        ));
    }

    #[test]
    fn rejects_single_date() {
        let cfg = ForecastConfig::default();
        let pts = vec![(start(), 1.0), (start(), 2.0)];
        assert!(matches!(
            FittedModel::fit(&pts, &cfg),
            Err(ForecastError::DegenerateHistory(_))
        ));
    }

    #[test]
    fn constant_zero_series_does_not_divide_by_zero() {
        let cfg = ForecastConfig::default();
        let pts: Vec<_> = (0..30).map(|i| (start() + Duration::days(i), 0.0)).collect();
        let model = FittedModel::fit(&pts, &cfg).unwrap();
        assert!(model.predict_point(start() + Duration::days(40)).abs() < 1e-6);
    }

    #[test]
    fn changepoints_stay_in_first_part_of_history() {
        let cfg = ForecastConfig::default();
        let model = FittedModel::fit(&linear(100), &cfg).unwrap();
        let cps = model.changepoint_dates();
        assert_eq!(cps.len(), 25);
        let cutoff = start() + Duration::days(80);
        assert!(cps.iter().all(|d| *d < cutoff && *d > start()));
    }

    #[test]
    fn seasonalities_follow_span() {
        let cfg = ForecastConfig::default();
        let short = FittedModel::fit(&linear(10), &cfg).unwrap();
        assert!(short.seasonalities().is_empty());
        let long = FittedModel::fit(&linear(800), &cfg).unwrap();
        assert!(long.has_seasonality(SeasonalityKind::Yearly));
        assert!(long.has_seasonality(SeasonalityKind::Weekly));
    }

    #[test]
    fn picks_up_weekly_pattern() {
        let cfg = ForecastConfig::default();
        let pts: Vec<_> = (0..140)
            .map(|i| {
                let d = start() + Duration::days(i);
                let bump = if i % 7 == 0 { 10.0 } else { 0.0 };
                (d, 50.0 + bump)
            })
            .collect();
        let model = FittedModel::fit(&pts, &cfg).unwrap();
        let peak = model.seasonal(SeasonalityKind::Weekly, start()).unwrap();
        let off = model
            .seasonal(SeasonalityKind::Weekly, start() + Duration::days(3))
            .unwrap();
        assert!(peak > off + 3.0);
    }

    #[test]
    fn predict_table_shape_and_bounds() {
        let cfg = ForecastConfig::default();
        let model = FittedModel::fit(&linear(120), &cfg).unwrap();
        let dates = model.future_dates(30);
        let mut rng = StdRng::seed_from_u64(1);
        let table = model.predict(&dates, 200, 0.8, &mut rng);
        assert_eq!(table.len(), 150);
        assert_eq!(table.history_len(), 120);
        assert_eq!(table.last_date(), Some(start() + Duration::days(149)));
        assert!(table.bounds_ordered());
        let last = table.rows().last().unwrap();
        assert!(last.yhat_lower <= last.yhat_upper);
        assert!(last.trend_upper - last.trend_lower >= 0.0);
    }

    #[test]
    fn zero_samples_collapse_bounds() {
        let cfg = ForecastConfig::default();
        let model = FittedModel::fit(&linear(50), &cfg).unwrap();
        let dates = model.future_dates(30);
        let mut rng = StdRng::seed_from_u64(1);
        let table = model.predict(&dates, 0, 0.8, &mut rng);
        for r in table.rows() {
            assert_eq!(r.yhat_lower, r.yhat);
            assert_eq!(r.yhat_upper, r.yhat);
        }
    }

    #[test]
    fn nan_dates_are_kept_as_history_dates() {
        let cfg = ForecastConfig::default();
        let mut pts = linear(20);
        pts.push((start() + Duration::days(20), f64::NAN));
        let model = FittedModel::fit(&pts, &cfg).unwrap();
        assert_eq!(model.history().len(), 20);
        assert_eq!(model.history_dates().len(), 21);
        assert_eq!(model.future_dates(30).len(), 51);
    }
}
