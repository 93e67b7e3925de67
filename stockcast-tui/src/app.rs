//! Application state: single owner, main thread only.
//!
//! Every selection change reruns the controller synchronously and rebuilds
//! the page. The raw chart's visible window is view state and only redraws.

use stockcast_core::data::TickerList;
use stockcast_core::{DashboardController, DisplayModel, ForecastHorizon, SelectionState, YearsOfPrediction};

use crate::page::Page;

/// Days moved per small / large step on the period slider.
pub const DAYS_STEP: i64 = 30;
pub const DAYS_STEP_LARGE: i64 = 365;
/// Smallest window the range slider zooms in to.
pub const MIN_WINDOW: usize = 10;

/// Which sidebar control has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Ticker,
    Years,
    Days,
    RangeSlider,
}

impl Focus {
    const ALL: [Focus; 4] = [Focus::Ticker, Focus::Years, Focus::Days, Focus::RangeSlider];

    pub fn index(self) -> usize {
        match self {
            Focus::Ticker => 0,
            Focus::Years => 1,
            Focus::Days => 2,
            Focus::RangeSlider => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Ticker => "Select Stock",
            Focus::Years => "Years of Prediction",
            Focus::Days => "Prediction Period (Days)",
            Focus::RangeSlider => "Range Slider",
        }
    }

    pub fn next(self) -> Focus {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Focus {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

/// Visible slice `[start, start + len)` of the raw chart's points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeWindow {
    pub start: usize,
    pub len: usize,
    pub total: usize,
}

impl RangeWindow {
    pub fn full(total: usize) -> Self {
        Self {
            start: 0,
            len: total,
            total,
        }
    }

    pub fn is_full(&self) -> bool {
        self.start == 0 && self.len == self.total
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start.min(items.len());
        let end = self.end().min(items.len());
        &items[start..end]
    }

    /// Halve the window around its centre.
    pub fn zoom_in(&mut self) {
        let floor = MIN_WINDOW.min(self.total);
        let len = (self.len / 2).max(floor);
        let centre = self.start + self.len / 2;
        self.len = len;
        self.start = centre.saturating_sub(len / 2);
        self.clamp();
    }

    /// Double the window around its centre, up to the whole series.
    pub fn zoom_out(&mut self) {
        let len = (self.len * 2).min(self.total);
        let centre = self.start + self.len / 2;
        self.len = len;
        self.start = centre.saturating_sub(len / 2);
        self.clamp();
    }

    /// Shift by a quarter window per step; negative moves back in time.
    pub fn pan(&mut self, steps: i64) {
        let shift = (self.len / 4).max(1) as i64 * steps;
        let start = (self.start as i64 + shift).max(0) as usize;
        self.start = start;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.len = self.len.min(self.total);
        if self.start + self.len > self.total {
            self.start = self.total - self.len;
        }
    }
}

pub struct App {
    controller: DashboardController,
    pub selection: SelectionState,
    pub focus: Focus,
    pub overlay: Overlay,
    pub model: DisplayModel,
    pub page: Page,
    pub window: RangeWindow,
    pub scroll: u16,
    pub running: bool,
    pub render_count: usize,
}

impl App {
    /// Build the app and run the first cycle.
    pub fn new(controller: DashboardController, selection: SelectionState) -> Self {
        let model = controller.render(&selection);
        let page = Page::from_model(&model);
        let window = RangeWindow::full(model.raw_chart.points.len());
        Self {
            controller,
            selection,
            focus: Focus::Ticker,
            overlay: Overlay::None,
            model,
            page,
            window,
            scroll: 0,
            running: true,
            render_count: 1,
        }
    }

    pub fn controller(&self) -> &DashboardController {
        &self.controller
    }

    pub fn tickers(&self) -> &TickerList {
        self.controller.tickers()
    }

    /// Full recompute for the current selection.
    pub fn rerun(&mut self) {
        tracing::debug!(
            ticker = %self.selection.ticker,
            years = self.selection.years.get(),
            days = self.selection.horizon.days(),
            "rerun"
        );
        self.model = self.controller.render(&self.selection);
        self.page = Page::from_model(&self.model);
        self.window = RangeWindow::full(self.model.raw_chart.points.len());
        self.scroll = 0;
        self.render_count += 1;
    }

    fn apply(&mut self, next: SelectionState) {
        if next != self.selection {
            self.selection = next;
            self.rerun();
        }
    }

    pub fn cycle_ticker(&mut self, delta: i64) {
        let tickers = self.controller.tickers();
        let n = tickers.len() as i64;
        if n == 0 {
            return;
        }
        let current = tickers.position(&self.selection.ticker).unwrap_or(0) as i64;
        let idx = (current + delta).rem_euclid(n) as usize;
        let Some(ticker) = tickers.get(idx) else {
            return;
        };
        let next = SelectionState {
            ticker: ticker.to_string(),
            ..self.selection.clone()
        };
        self.apply(next);
    }

    pub fn step_years(&mut self, delta: i64) {
        let next = SelectionState {
            years: self.selection.years.step(delta),
            ..self.selection.clone()
        };
        self.apply(next);
    }

    pub fn step_days(&mut self, delta: i64) {
        let next = SelectionState {
            horizon: self.selection.horizon.step(delta),
            ..self.selection.clone()
        };
        self.apply(next);
    }

    pub fn set_years(&mut self, years: YearsOfPrediction) {
        let next = SelectionState {
            years,
            ..self.selection.clone()
        };
        self.apply(next);
    }

    pub fn set_days(&mut self, horizon: ForecastHorizon) {
        let next = SelectionState {
            horizon,
            ..self.selection.clone()
        };
        self.apply(next);
    }

    /// Move the focused control by `delta` steps.
    pub fn adjust_focused(&mut self, delta: i64, large: bool) {
        match self.focus {
            Focus::Ticker => self.cycle_ticker(delta),
            Focus::Years => self.step_years(delta),
            Focus::Days => {
                let step = if large { DAYS_STEP_LARGE } else { DAYS_STEP };
                self.step_days(delta * step);
            }
            Focus::RangeSlider => self.window.pan(delta * if large { 4 } else { 1 }),
        }
    }

    pub fn scroll_page(&mut self, delta: i32) {
        let max = self.page.blocks.len().saturating_sub(1) as i32;
        self.scroll = (self.scroll as i32 + delta).clamp(0, max) as u16;
    }

    pub fn toggle_help(&mut self) {
        self.overlay = match self.overlay {
            Overlay::Help => Overlay::None,
            Overlay::None => Overlay::Help,
        };
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
