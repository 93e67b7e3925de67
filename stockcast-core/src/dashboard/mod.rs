//! Dashboard controller, display model and the drawing seam.

pub mod controller;
pub mod display;
pub mod surface;

pub use controller::DashboardController;
pub use display::{
    BandPoint, DashboardState, DisplayModel, ForecastChart, ForecastSection, RawChart, RawPoint,
    StatusKind, StatusMessage,
};
pub use surface::{present, DashboardSurface};
