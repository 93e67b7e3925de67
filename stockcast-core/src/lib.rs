//! Stockcast core: price loading, the daily cache, forecasting and the dashboard controller.
//!
//! This crate contains everything below the drawing layer:
//! - Domain types (price bars, series, selection state, horizon)
//! - Market data providers (Yahoo Finance, CSV import, synthetic, static)
//! - Per-ticker daily cache and the `DataLoader`
//! - Additive trend + seasonality forecast model behind the `ForecastEngine` seam
//! - The dashboard controller: `render(selection) -> DisplayModel`, then `present`

pub mod clock;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod domain;
pub mod forecast;
pub mod frame;
pub mod rng;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, StockcastConfig};
pub use dashboard::{
    present, DashboardController, DashboardState, DashboardSurface, DisplayModel,
};
pub use data::{DataError, DataLoader, MarketDataProvider, TickerList};
pub use domain::{
    ForecastHorizon, PriceBar, PriceSeries, SelectionState, YearsOfPrediction,
};
pub use forecast::{AdditiveEngine, ForecastEngine, ForecastError, ForecastResult, ForecastTable};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the TUI and CLI share across a loader
    /// or engine boundary is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<PriceBar>();
        require_sync::<PriceBar>();
        require_send::<PriceSeries>();
        require_sync::<PriceSeries>();
        require_send::<SelectionState>();
        require_sync::<SelectionState>();
        require_send::<ForecastResult>();
        require_sync::<ForecastResult>();
        require_send::<DisplayModel>();
        require_sync::<DisplayModel>();
        require_send::<DataLoader>();
        require_sync::<DataLoader>();
        require_send::<AdditiveEngine>();
        require_sync::<AdditiveEngine>();
    }
}
