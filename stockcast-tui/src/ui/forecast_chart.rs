//! Forecast chart: observed closes, fitted/predicted value and its interval.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType};
use ratatui::Frame;

use stockcast_core::dashboard::ForecastChart;

use super::{day_x, padded_bounds};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, chart: &ForecastChart) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(format!(" Forecast (history ends {}) ", chart.history_end))
        .title_style(theme::panel_title(false));

    let (Some(first), Some(last)) = (chart.band.first(), chart.band.last()) else {
        f.render_widget(block, area);
        return;
    };
    let origin = first.ds;

    let observed: Vec<(f64, f64)> = chart
        .observed
        .iter()
        .map(|(d, y)| (day_x(*d, origin), *y))
        .collect();
    let yhat: Vec<(f64, f64)> = chart.band.iter().map(|p| (day_x(p.ds, origin), p.yhat)).collect();
    let lower: Vec<(f64, f64)> = chart
        .band
        .iter()
        .map(|p| (day_x(p.ds, origin), p.yhat_lower))
        .collect();
    let upper: Vec<(f64, f64)> = chart
        .band
        .iter()
        .map(|p| (day_x(p.ds, origin), p.yhat_upper))
        .collect();

    let y = padded_bounds(
        chart
            .band
            .iter()
            .flat_map(|p| [p.yhat_lower, p.yhat_upper])
            .chain(chart.observed.iter().map(|(_, v)| *v)),
    );
    let x_max = day_x(last.ds, origin).max(1.0);
    let split = day_x(chart.history_end, origin);

    let datasets = vec![
        Dataset::default()
            .name("observed")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(theme::muted())
            .data(&observed),
        Dataset::default()
            .name("yhat_lower")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::WARNING))
            .data(&lower),
        Dataset::default()
            .name("yhat_upper")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::WARNING))
            .data(&upper),
        Dataset::default()
            .name("yhat")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::ACCENT))
            .data(&yhat),
    ];

    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled(origin.to_string(), theme::muted()),
                    Span::styled(
                        chart.history_end.to_string(),
                        if split > 0.0 { theme::neutral() } else { theme::muted() },
                    ),
                    Span::styled(last.ds.to_string(), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds(y)
                .labels(vec![
                    Span::styled(format!("{:.0}", y[0]), theme::muted()),
                    Span::styled(format!("{:.0}", (y[0] + y[1]) / 2.0), theme::muted()),
                    Span::styled(format!("{:.0}", y[1]), theme::muted()),
                ]),
        );
    f.render_widget(widget, area);
}
