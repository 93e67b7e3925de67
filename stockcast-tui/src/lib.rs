//! Stockcast TUI: single-page stock forecast dashboard.
//!
//! Layout:
//! - Sidebar: stock select, years of prediction, prediction period, range slider
//! - Page: title, raw tail table, raw chart, status, forecast table,
//!   forecast chart, components chart, end date
//! - Hint bar and a help overlay

pub mod app;
pub mod input;
pub mod page;
pub mod theme;
pub mod ui;

pub use app::{App, Focus, Overlay, RangeWindow};
pub use page::{Page, PageBlock};
