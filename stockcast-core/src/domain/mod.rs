//! Domain types: price bars, price series, and the dashboard selection.

pub mod bar;
pub mod selection;
pub mod series;

pub use bar::PriceBar;
pub use selection::{
    DomainError, ForecastHorizon, SelectionState, YearsOfPrediction, PERIOD_DAYS_MAX,
    PERIOD_DAYS_MIN, YEARS_MAX, YEARS_MIN,
};
pub use series::PriceSeries;
