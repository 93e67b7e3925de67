//! Raw price chart: opening and closing price over the visible window, with
//! a range slider underneath showing where the window sits in the history.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use stockcast_core::dashboard::display::{CLOSE_TRACE, OPEN_TRACE};
use stockcast_core::dashboard::RawChart;

use super::{day_x, padded_bounds};
use crate::app::RangeWindow;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, chart: &RawChart, window: &RangeWindow, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(format!(" {} ", chart.title))
        .title_style(theme::panel_title(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let visible = window.slice(&chart.points);
    let (Some(first), Some(last)) = (visible.first(), visible.last()) else {
        f.render_widget(
            Paragraph::new(Span::styled("No price data for this selection.", theme::muted())),
            parts[0],
        );
        return;
    };

    let origin = first.date;
    let open: Vec<(f64, f64)> = visible.iter().map(|p| (day_x(p.date, origin), p.open)).collect();
    let close: Vec<(f64, f64)> = visible.iter().map(|p| (day_x(p.date, origin), p.close)).collect();
    let y = padded_bounds(visible.iter().flat_map(|p| [p.open, p.close]));
    let x_max = day_x(last.date, origin).max(1.0);
    let mid = origin + chrono::Duration::days((x_max / 2.0) as i64);

    let datasets = vec![
        Dataset::default()
            .name(OPEN_TRACE)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::OPEN_TRACE))
            .data(&open),
        Dataset::default()
            .name(CLOSE_TRACE)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::CLOSE_TRACE))
            .data(&close),
    ];

    let widget = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled(origin.to_string(), theme::muted()),
                    Span::styled(mid.to_string(), theme::muted()),
                    Span::styled(last.date.to_string(), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Price", theme::muted()))
                .style(theme::muted())
                .bounds(y)
                .labels(vec![
                    Span::styled(format!("{:.0}", y[0]), theme::muted()),
                    Span::styled(format!("{:.0}", y[1]), theme::muted()),
                ]),
        );
    f.render_widget(widget, parts[0]);

    let bar = slider_bar(window, parts[1].width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(bar, theme::control(focused)))),
        parts[1],
    );
}

/// `├───[█████]──────┤` where the bracketed run is the visible window.
pub fn slider_bar(window: &RangeWindow, width: usize) -> String {
    if width < 3 {
        return String::new();
    }
    let inner = width - 2;
    let (lo, hi) = if window.total == 0 {
        (0, inner)
    } else {
        let lo = window.start * inner / window.total;
        let hi = (window.end() * inner).div_ceil(window.total).max(lo + 1).min(inner);
        (lo, hi)
    };
    let body: String = (0..inner)
        .map(|i| if i >= lo && i < hi { '█' } else { '─' })
        .collect();
    format!("├{body}┤")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_window_fills_bar() {
        let w = RangeWindow::full(100);
        assert_eq!(slider_bar(&w, 12), format!("├{}┤", "█".repeat(10)));
    }

    #[test]
    fn zoomed_window_marks_its_slice() {
        let mut w = RangeWindow::full(100);
        w.zoom_in();
        w.pan(10);
        let bar = slider_bar(&w, 12);
        assert_eq!(bar, format!("├{}{}┤", "─".repeat(5), "█".repeat(5)));
    }

    #[test]
    fn narrow_area_draws_nothing() {
        assert!(slider_bar(&RangeWindow::full(10), 2).is_empty());
    }
}
