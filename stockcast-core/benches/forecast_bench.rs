//! Criterion benchmarks for the forecast hot paths.
//!
//! 1. Model fit on daily histories of increasing length
//! 2. Full forecast (fit + Monte Carlo intervals) at the default horizon
//! 3. Polars tail preview of a forecast table

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chrono::{Duration, NaiveDate};
use stockcast_core::config::ForecastConfig;
use stockcast_core::forecast::FittedModel;
use stockcast_core::frame::{forecast_frame, TablePreview};
use stockcast_core::{AdditiveEngine, ForecastEngine, ForecastHorizon, PriceBar, PriceSeries};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_points(n: usize) -> Vec<(NaiveDate, f64)> {
    let base = NaiveDate::from_ymd_opt(2015, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let x = i as f64;
            (
                base + Duration::days(i as i64),
                100.0 + x * 0.05 + (x * 2.0 * std::f64::consts::PI / 365.25).sin() * 8.0,
            )
        })
        .collect()
}

fn make_series(n: usize) -> PriceSeries {
    let bars = make_points(n)
        .into_iter()
        .map(|(date, close)| PriceBar {
            date,
            open: close - 0.3,
            high: close + 1.0,
            low: close - 1.0,
            close,
            adj_close: close,
            volume: 1_000_000,
        })
        .collect();
    PriceSeries::new("BENCH", bars)
}

// ── 1. Fit ───────────────────────────────────────────────────────────

fn bench_fit(c: &mut Criterion) {
    let config = ForecastConfig::default();
    let mut group = c.benchmark_group("fit");
    for n in [250usize, 1_000, 2_500] {
        let points = make_points(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, pts| {
            b.iter(|| FittedModel::fit(black_box(pts), &config))
        });
    }
    group.finish();
}

// ── 2. Forecast ──────────────────────────────────────────────────────

fn bench_forecast(c: &mut Criterion) {
    let series = make_series(2_500);
    let engine = AdditiveEngine::new(ForecastConfig {
        uncertainty_samples: 200,
        ..ForecastConfig::default()
    });
    let horizon = ForecastHorizon::default();
    c.bench_function("forecast_2500_rows_1825_days", |b| {
        b.iter(|| engine.forecast(black_box(&series), horizon))
    });
}

// ── 3. Preview ───────────────────────────────────────────────────────

fn bench_preview(c: &mut Criterion) {
    let series = make_series(2_500);
    let engine = AdditiveEngine::new(ForecastConfig {
        uncertainty_samples: 0,
        ..ForecastConfig::default()
    });
    let Ok(result) = engine.forecast(&series, ForecastHorizon::default()) else {
        return;
    };
    c.bench_function("forecast_tail_preview", |b| {
        b.iter(|| {
            let df = forecast_frame(black_box(&result.table)).ok()?;
            TablePreview::tail_of(&df, 5).ok()
        })
    });
}

criterion_group!(benches, bench_fit, bench_forecast, bench_preview);
criterion_main!(benches);
