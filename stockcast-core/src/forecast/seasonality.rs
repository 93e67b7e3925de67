//! Fourier seasonal terms.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::config::ForecastConfig;

/// Span (days) of history needed before yearly seasonality is fitted.
pub const YEARLY_MIN_SPAN_DAYS: i64 = 730;
/// Span (days) of history needed before weekly seasonality is fitted.
pub const WEEKLY_MIN_SPAN_DAYS: i64 = 14;

/// Which periodic component a seasonality represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalityKind {
    Weekly,
    Yearly,
}

impl SeasonalityKind {
    pub fn name(self) -> &'static str {
        match self {
            SeasonalityKind::Weekly => "weekly",
            SeasonalityKind::Yearly => "yearly",
        }
    }

    pub fn period_days(self) -> f64 {
        match self {
            SeasonalityKind::Weekly => 7.0,
            SeasonalityKind::Yearly => 365.25,
        }
    }
}

/// A seasonal component expanded into `2 * order` sine/cosine columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    pub kind: SeasonalityKind,
    pub order: usize,
}

impl Seasonality {
    pub fn width(&self) -> usize {
        2 * self.order
    }

    /// Append this seasonality's feature values for `date` to `out`.
    pub fn push_features(&self, date: NaiveDate, out: &mut Vec<f64>) {
        let t = days_since_epoch(date);
        let period = self.kind.period_days();
        for i in 1..=self.order {
            let x = 2.0 * PI * i as f64 * t / period;
            out.push(x.sin());
            out.push(x.cos());
        }
    }

    /// Seasonal contribution for `date` given this component's coefficients.
    pub fn evaluate(&self, date: NaiveDate, beta: &[f64]) -> f64 {
        debug_assert_eq!(beta.len(), self.width());
        let t = days_since_epoch(date);
        let period = self.kind.period_days();
        (1..=self.order)
            .map(|i| {
                let x = 2.0 * PI * i as f64 * t / period;
                beta[2 * (i - 1)] * x.sin() + beta[2 * (i - 1) + 1] * x.cos()
            })
            .sum()
    }
}

/// Seasonalities enabled for a history covering `span_days`.
pub fn auto_seasonalities(span_days: i64, config: &ForecastConfig) -> Vec<Seasonality> {
    let mut out = Vec::new();
    if span_days >= YEARLY_MIN_SPAN_DAYS && config.yearly_order > 0 {
        out.push(Seasonality {
            kind: SeasonalityKind::Yearly,
            order: config.yearly_order,
        });
    }
    if span_days >= WEEKLY_MIN_SPAN_DAYS && config.weekly_order > 0 {
        out.push(Seasonality {
            kind: SeasonalityKind::Weekly,
            order: config.weekly_order,
        });
    }
    out
}

fn days_since_epoch(date: NaiveDate) -> f64 {
    (date - NaiveDate::default()).num_days() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weekly_features_repeat_every_seven_days() {
        let s = Seasonality {
            kind: SeasonalityKind::Weekly,
            order: 3,
        };
        let mut a = Vec::new();
        let mut b = Vec::new();
        s.push_features(d(2024, 3, 4), &mut a);
        s.push_features(d(2024, 3, 11), &mut b);
        assert_eq!(a.len(), 6);
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn evaluate_matches_features_dot_beta() {
        let s = Seasonality {
            kind: SeasonalityKind::Yearly,
            order: 2,
        };
        let beta = [0.5, -1.0, 0.25, 2.0];
        let date = d(2020, 7, 15);
        let mut f = Vec::new();
        s.push_features(date, &mut f);
        let dot: f64 = f.iter().zip(beta.iter()).map(|(a, b)| a * b).sum();
        assert!((s.evaluate(date, &beta) - dot).abs() < 1e-12);
    }

    #[test]
    fn auto_enables_by_span() {
        let cfg = ForecastConfig::default();
        assert!(auto_seasonalities(10, &cfg).is_empty());
        let short = auto_seasonalities(100, &cfg);
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].kind, SeasonalityKind::Weekly);
        let long = auto_seasonalities(3000, &cfg);
        assert_eq!(long.len(), 2);
        assert_eq!(long[0].kind, SeasonalityKind::Yearly);
        assert_eq!(long[0].order, 10);
    }
}
