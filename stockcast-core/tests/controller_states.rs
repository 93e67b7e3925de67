//! DashboardController state selection and page presentation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use stockcast_core::config::ForecastConfig;
use stockcast_core::dashboard::{ForecastChart, RawChart, StatusMessage};
use stockcast_core::data::StaticProvider;
use stockcast_core::forecast::ForecastComponents;
use stockcast_core::frame::TablePreview;
use stockcast_core::{
    present, AdditiveEngine, DashboardController, DashboardState, DashboardSurface, DataLoader,
    FixedClock, ForecastEngine, ForecastError, ForecastHorizon, ForecastResult, PriceBar,
    PriceSeries, SelectionState, TickerList, YearsOfPrediction,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn today() -> NaiveDate {
    d(2024, 1, 10)
}

fn bars(n: i64) -> Vec<PriceBar> {
    let first = today() - Duration::days(n);
    (0..n)
        .map(|i| {
            let p = 120.0 + (i as f64 / 5.0).sin() * 3.0 + i as f64 * 0.1;
            PriceBar {
                date: first + Duration::days(i),
                open: p - 0.4,
                high: p + 1.2,
                low: p - 1.2,
                close: p,
                adj_close: p,
                volume: 10_000,
            }
        })
        .collect()
}

/// Delegates to a real engine and counts calls.
struct SpyEngine {
    inner: AdditiveEngine,
    calls: AtomicUsize,
}

impl SpyEngine {
    fn new() -> Self {
        Self {
            inner: AdditiveEngine::new(ForecastConfig {
                uncertainty_samples: 40,
                ..ForecastConfig::default()
            }),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ForecastEngine for SpyEngine {
    fn name(&self) -> &str {
        "spy"
    }

    fn forecast(
        &self,
        series: &PriceSeries,
        horizon: ForecastHorizon,
    ) -> Result<ForecastResult, ForecastError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.forecast(series, horizon)
    }
}

struct FailingEngine;

impl ForecastEngine for FailingEngine {
    fn name(&self) -> &str {
        "failing"
    }

    fn forecast(&self, _: &PriceSeries, _: ForecastHorizon) -> Result<ForecastResult, ForecastError> {
        Err(ForecastError::Numerical("matrix exploded".into()))
    }
}

#[derive(Default)]
struct CountingSurface {
    raw_charts: usize,
    forecast_charts: usize,
    components_charts: usize,
    tables: usize,
    statuses: Vec<StatusMessage>,
    texts: Vec<String>,
    captions: Vec<String>,
}

impl DashboardSurface for CountingSurface {
    fn title(&mut self, _text: &str) {}
    fn subheader(&mut self, _text: &str) {}
    fn caption(&mut self, text: &str) {
        self.captions.push(text.to_string());
    }
    fn text(&mut self, text: &str) {
        self.texts.push(text.to_string());
    }
    fn table(&mut self, _table: &TablePreview) {
        self.tables += 1;
    }
    fn raw_chart(&mut self, _chart: &RawChart) {
        self.raw_charts += 1;
    }
    fn status(&mut self, status: &StatusMessage) {
        self.statuses.push(status.clone());
    }
    fn forecast_chart(&mut self, _chart: &ForecastChart) {
        self.forecast_charts += 1;
    }
    fn components_chart(&mut self, _components: &ForecastComponents) {
        self.components_charts += 1;
    }
}

fn controller(provider: StaticProvider, engine: Arc<dyn ForecastEngine>) -> DashboardController {
    let loader = DataLoader::new(
        Box::new(provider),
        Arc::new(FixedClock::new(today())),
        TickerList::default_list(),
        d(2015, 1, 1),
    );
    DashboardController::new(loader, Box::new(engine), 5)
}

fn selection(ticker: &str, days: u32) -> SelectionState {
    SelectionState::new(
        ticker,
        YearsOfPrediction::new(3).unwrap(),
        ForecastHorizon::new(days).unwrap(),
    )
}

#[test]
fn insufficient_series_never_reach_the_engine() {
    for n in [0, 1] {
        let spy = Arc::new(SpyEngine::new());
        let c = controller(
            StaticProvider::new().with_bars("GOOG", bars(n)),
            spy.clone(),
        );
        let page = c.render(&selection("GOOG", 30));
        assert_eq!(page.state, DashboardState::Insufficient);
        assert!(page.forecast.is_none());
        assert_eq!(spy.calls(), 0, "{n} rows reached the engine");
    }
}

#[test]
fn forecastable_calls_engine_once_with_horizon() {
    let spy = Arc::new(SpyEngine::new());
    let c = controller(StaticProvider::new().with_bars("AAPL", bars(45)), spy.clone());
    let page = c.render(&selection("AAPL", 90));
    assert_eq!(page.state, DashboardState::Forecastable);
    assert_eq!(spy.calls(), 1);
    let section = page.forecast.unwrap();
    assert_eq!(section.preview.total_rows, 45 + 90);
    assert_eq!(section.plot_caption, "Forecast Plot for 3 Years");
}

#[test]
fn end_date_counts_from_today_not_from_table() {
    let spy = Arc::new(SpyEngine::new());
    let c = controller(StaticProvider::new().with_bars("MSFT", bars(30)), spy);
    let page = c.render(&selection("MSFT", 30));
    let section = page.forecast.unwrap();
    assert_eq!(section.end_date, d(2024, 2, 9));
    assert_eq!(
        section.end_date_line(),
        "End Date of Prediction: 2024-02-09 (30 days ahead)"
    );
}

#[test]
fn raw_chart_presented_exactly_once_in_every_state() {
    let cases: Vec<(StaticProvider, Arc<dyn ForecastEngine>, DashboardState)> = vec![
        (
            StaticProvider::new().with_bars("GOOG", bars(40)),
            Arc::new(SpyEngine::new()),
            DashboardState::Forecastable,
        ),
        (
            StaticProvider::new().with_bars("GOOG", bars(1)),
            Arc::new(SpyEngine::new()),
            DashboardState::Insufficient,
        ),
        (
            StaticProvider::new().failing("GOOG", "offline"),
            Arc::new(SpyEngine::new()),
            DashboardState::Unavailable,
        ),
        (
            StaticProvider::new().with_bars("GOOG", bars(40)),
            Arc::new(FailingEngine),
            DashboardState::Unavailable,
        ),
    ];

    for (provider, engine, expected) in cases {
        let c = controller(provider, engine);
        let page = c.render(&selection("GOOG", 30));
        assert_eq!(page.state, expected);

        let mut surface = CountingSurface::default();
        present(&page, &mut surface);
        assert_eq!(surface.raw_charts, 1, "state {expected:?}");
        assert_eq!(surface.statuses.len(), 1);

        let forecastable = expected == DashboardState::Forecastable;
        assert_eq!(surface.forecast_charts, usize::from(forecastable));
        assert_eq!(surface.components_charts, usize::from(forecastable));
        assert_eq!(surface.tables, if forecastable { 2 } else { 1 });
        assert_eq!(surface.statuses[0].is_error(), !forecastable);
        if forecastable {
            assert_eq!(
                surface.captions,
                vec!["Forecast Plot for 3 Years", "Forecast Components"]
            );
            assert_eq!(surface.texts.len(), 1);
        }
    }
}

#[test]
fn forecaster_failure_keeps_raw_section() {
    let c = controller(
        StaticProvider::new().with_bars("GME", bars(20)),
        Arc::new(FailingEngine),
    );
    let page = c.render(&selection("GME", 30));
    assert_eq!(page.state, DashboardState::Unavailable);
    assert!(page.status.text.contains("matrix exploded"));
    assert_eq!(page.raw_chart.points.len(), 20);
    assert_eq!(page.raw_preview.rows.len(), 5);
}
