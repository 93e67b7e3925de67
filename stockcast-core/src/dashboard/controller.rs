//! DashboardController: one full load → validate → forecast cycle per call.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::display::{
    years_caption, DashboardState, DisplayModel, ForecastChart, ForecastSection, RawChart,
    StatusMessage, INSUFFICIENT_DATA, PAGE_TITLE, PROCEEDING,
};
use crate::clock::Clock;
use crate::config::StockcastConfig;
use crate::data::{DataError, DataLoader, TickerList};
use crate::domain::{ForecastHorizon, PriceSeries, SelectionState, YearsOfPrediction};
use crate::forecast::{AdditiveEngine, ForecastEngine, MIN_OBSERVATIONS};
use crate::frame::{forecast_frame, series_frame, TablePreview};

pub struct DashboardController {
    loader: DataLoader,
    engine: Box<dyn ForecastEngine>,
    preview_rows: usize,
}

impl DashboardController {
    pub fn new(loader: DataLoader, engine: Box<dyn ForecastEngine>, preview_rows: usize) -> Self {
        Self {
            loader,
            engine,
            preview_rows,
        }
    }

    /// Loader and additive engine wired from configuration.
    pub fn from_config(config: &StockcastConfig, clock: Arc<dyn Clock>) -> Result<Self, DataError> {
        let loader = DataLoader::from_config(config, clock)?;
        let engine = AdditiveEngine::new(config.forecast.clone());
        Ok(Self::new(
            loader,
            Box::new(engine),
            config.dashboard.preview_rows,
        ))
    }

    pub fn loader(&self) -> &DataLoader {
        &self.loader
    }

    pub fn tickers(&self) -> &TickerList {
        self.loader.tickers()
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn today(&self) -> NaiveDate {
        self.loader.today()
    }

    /// First allow-listed ticker with the configured default years and period.
    pub fn initial_selection(&self, config: &StockcastConfig) -> SelectionState {
        SelectionState::new(
            self.tickers().first(),
            YearsOfPrediction::clamped(i64::from(config.dashboard.default_years)),
            ForecastHorizon::clamped(i64::from(config.dashboard.default_period_days)),
        )
    }

    /// Decide the whole page for `selection`. Draws nothing.
    pub fn render(&self, selection: &SelectionState) -> DisplayModel {
        let today = self.today();
        let ticker = selection.ticker.as_str();

        let series = match self.loader.load(ticker) {
            Ok(series) => series,
            Err(e) => {
                warn!(%ticker, error = %e, "dashboard unavailable: load failed");
                let empty = PriceSeries::empty(ticker);
                return self.page(
                    selection,
                    today,
                    &empty,
                    DashboardState::Unavailable,
                    StatusMessage::error(format!("Could not load {ticker}: {e}")),
                    None,
                );
            }
        };

        if series.len() < MIN_OBSERVATIONS {
            info!(%ticker, rows = series.len(), state = "insufficient", "dashboard rendered");
            return self.page(
                selection,
                today,
                &series,
                DashboardState::Insufficient,
                StatusMessage::error(INSUFFICIENT_DATA),
                None,
            );
        }

        let outcome = self
            .engine
            .forecast(&series, selection.horizon)
            .map_err(|e| format!("Forecast failed: {e}"))
            .and_then(|result| {
                let frame = forecast_frame(&result.table)
                    .map_err(|e| format!("Could not tabulate forecast: {e}"))?;
                let preview = TablePreview::tail_of(&frame, self.preview_rows)
                    .map_err(|e| format!("Could not tabulate forecast: {e}"))?;
                Ok(ForecastSection {
                    preview,
                    plot_caption: years_caption(selection.years.get()),
                    chart: ForecastChart::from_result(&result),
                    components: result.components(),
                    end_date: selection.horizon.end_date_from(today),
                    horizon_days: selection.horizon.days(),
                })
            });

        match outcome {
            Ok(section) => {
                info!(
                    %ticker,
                    rows = series.len(),
                    horizon_days = selection.horizon.days(),
                    state = "forecastable",
                    "dashboard rendered"
                );
                self.page(
                    selection,
                    today,
                    &series,
                    DashboardState::Forecastable,
                    StatusMessage::success(PROCEEDING),
                    Some(section),
                )
            }
            Err(message) => {
                warn!(%ticker, error = %message, "dashboard unavailable: forecast failed");
                self.page(
                    selection,
                    today,
                    &series,
                    DashboardState::Unavailable,
                    StatusMessage::error(message),
                    None,
                )
            }
        }
    }

    fn page(
        &self,
        selection: &SelectionState,
        today: NaiveDate,
        series: &PriceSeries,
        state: DashboardState,
        status: StatusMessage,
        forecast: Option<ForecastSection>,
    ) -> DisplayModel {
        let (raw_preview, status) = match series_frame(series)
            .and_then(|df| TablePreview::tail_of(&df, self.preview_rows))
        {
            Ok(preview) => (preview, status),
            Err(e) => (
                TablePreview::default(),
                StatusMessage::error(format!("{} (raw table unavailable: {e})", status.text)),
            ),
        };
        DisplayModel {
            title: PAGE_TITLE.to_string(),
            selection: selection.clone(),
            today,
            state,
            raw_preview,
            raw_chart: RawChart::from_series(series),
            status,
            forecast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::data::StaticProvider;
    use crate::domain::PriceBar;
    use crate::config::ForecastConfig;
    use chrono::Duration;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn bars(n: i64, start: NaiveDate) -> Vec<PriceBar> {
        (0..n)
            .map(|i| {
                let p = 50.0 + i as f64 * 0.25;
                PriceBar {
                    date: start + Duration::days(i),
                    open: p - 0.1,
                    high: p + 1.0,
                    low: p - 1.0,
                    close: p,
                    adj_close: p,
                    volume: 1_000,
                }
            })
            .collect()
    }

    fn controller(provider: StaticProvider) -> DashboardController {
        let clock = Arc::new(FixedClock::new(d(2024, 1, 10)));
        let loader = DataLoader::new(
            Box::new(provider),
            clock,
            TickerList::default_list(),
            d(2015, 1, 1),
        );
        let engine = AdditiveEngine::new(ForecastConfig {
            uncertainty_samples: 50,
            ..ForecastConfig::default()
        });
        DashboardController::new(loader, Box::new(engine), 5)
    }

    fn selection(ticker: &str, days: u32) -> SelectionState {
        SelectionState::new(
            ticker,
            YearsOfPrediction::default(),
            ForecastHorizon::new(days).unwrap(),
        )
    }

    #[test]
    fn forecastable_page() {
        let c = controller(StaticProvider::new().with_bars("GOOG", bars(60, d(2023, 11, 1))));
        let page = c.render(&selection("GOOG", 30));
        assert_eq!(page.state, DashboardState::Forecastable);
        assert_eq!(page.status.text, PROCEEDING);
        assert_eq!(page.raw_preview.rows.len(), 5);
        let section = page.forecast.as_ref().unwrap();
        assert_eq!(section.end_date, d(2024, 2, 9));
        assert_eq!(section.plot_caption, "Forecast Plot for 2 Years");
        assert_eq!(section.preview.rows.len(), 5);
        assert_eq!(section.preview.total_rows, 90);
    }

    #[test]
    fn single_row_is_insufficient() {
        let c = controller(StaticProvider::new().with_bars("AAPL", bars(1, d(2024, 1, 2))));
        let page = c.render(&selection("AAPL", 30));
        assert_eq!(page.state, DashboardState::Insufficient);
        assert!(page.status.is_error());
        assert_eq!(page.status.text, INSUFFICIENT_DATA);
        assert!(page.forecast.is_none());
        assert_eq!(page.raw_chart.points.len(), 1);
    }

    #[test]
    fn provider_failure_is_unavailable_with_reason() {
        let c = controller(StaticProvider::new().failing("GME", "connection reset"));
        let page = c.render(&selection("GME", 30));
        assert_eq!(page.state, DashboardState::Unavailable);
        assert!(page.status.text.contains("connection reset"));
        assert!(page.raw_chart.is_empty());
        assert!(page.forecast.is_none());
    }

    #[test]
    fn labels_show_years_and_days() {
        let c = controller(StaticProvider::new());
        let page = c.render(&selection("MSFT", 365));
        assert_eq!(page.years_label(), "Years of Prediction: 2");
        assert_eq!(page.horizon_label(), "Prediction Period: 365 days");
    }
}
