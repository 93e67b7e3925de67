//! Forecasting: model fit, prediction table, components and the engine seam.

pub mod components;
pub mod engine;
pub mod linalg;
pub mod model;
pub mod seasonality;
pub mod table;
pub mod uncertainty;

pub use components::{DayOfYearValue, ForecastComponents, WeekdayValue};
pub use engine::{AdditiveEngine, ForecastEngine, ForecastError, ForecastResult};
pub use model::{FittedModel, MIN_OBSERVATIONS};
pub use seasonality::{Seasonality, SeasonalityKind};
pub use table::{ForecastRow, ForecastTable};
