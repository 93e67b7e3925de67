//! Top-level layout: sidebar on the left, the scrolling page on the right,
//! a one-line hint bar at the bottom, help overlay on top.

pub mod components_chart;
pub mod forecast_chart;
pub mod help;
pub mod page_view;
pub mod raw_chart;
pub mod sidebar;
pub mod status_bar;
pub mod table;

use chrono::NaiveDate;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::app::{App, Overlay};
use crate::theme;

/// Width of the sidebar column.
pub const SIDEBAR_WIDTH: u16 = 34;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &App) {
    f.render_widget(
        Block::default().style(Style::default().bg(theme::BACKGROUND)),
        f.area(),
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(rows[0]);

    sidebar::render(f, columns[0], app);
    page_view::render(f, columns[1], app);
    status_bar::render(f, rows[1], app);

    if app.overlay == Overlay::Help {
        help::render(f, centered_rect(70, 80, rows[0]));
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Chart x coordinate: days since `origin`.
pub fn day_x(date: NaiveDate, origin: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}

/// `[min, max]` of finite values with 5% padding; `[0, 1]` when empty.
pub fn padded_bounds<I: IntoIterator<Item = f64>>(values: I) -> [f64; 2] {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return [0.0, 1.0];
    }
    let pad = ((hi - lo) * 0.05).max(1e-9);
    [lo - pad, hi + pad]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_pad_and_skip_nan() {
        let b = padded_bounds([1.0, f64::NAN, 11.0]);
        assert!((b[0] - 0.5).abs() < 1e-12);
        assert!((b[1] - 11.5).abs() < 1e-12);
        assert_eq!(padded_bounds(std::iter::empty()), [0.0, 1.0]);
    }

    #[test]
    fn flat_series_gets_nonzero_span() {
        let b = padded_bounds([5.0, 5.0]);
        assert!(b[1] > b[0]);
    }
}
