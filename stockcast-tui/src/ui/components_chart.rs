//! Components chart: trend over the forecast range, then one cycle of each
//! fitted seasonality, stacked vertically.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType};
use ratatui::Frame;

use stockcast_core::forecast::ForecastComponents;

use super::{day_x, padded_bounds};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, components: &ForecastComponents) {
    let n = components.panel_count() as u32;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints((0..n).map(|_| Constraint::Ratio(1, n)).collect::<Vec<_>>())
        .split(area);

    let mut slot = rows.iter();

    if let (Some(area), Some((origin, _)), Some((last, _))) =
        (slot.next(), components.trend.first(), components.trend.last())
    {
        let data: Vec<(f64, f64)> = components
            .trend
            .iter()
            .map(|(d, v)| (day_x(*d, *origin), *v))
            .collect();
        let labels = [origin.to_string(), last.to_string()];
        panel(f, *area, "trend", &data, &labels);
    }

    if let (Some(weekly), Some(area)) = (&components.weekly, slot.next()) {
        let data: Vec<(f64, f64)> = weekly
            .iter()
            .enumerate()
            .map(|(i, w)| (i as f64, w.value))
            .collect();
        let labels: Vec<String> = weekly.iter().map(|w| w.weekday.clone()).collect();
        panel(f, *area, "weekly", &data, &labels);
    }

    if let (Some(yearly), Some(area)) = (&components.yearly, slot.next()) {
        let data: Vec<(f64, f64)> = yearly
            .iter()
            .map(|y| (f64::from(y.day_of_year), y.value))
            .collect();
        let labels = ["Jan", "Apr", "Jul", "Oct", "Dec"].map(String::from);
        panel(f, *area, "yearly", &data, &labels);
    }
}

fn panel(f: &mut Frame, area: Rect, name: &str, data: &[(f64, f64)], x_labels: &[String]) {
    let x = match (data.first(), data.last()) {
        (Some(a), Some(b)) if b.0 > a.0 => [a.0, b.0],
        (Some(a), _) => [a.0, a.0 + 1.0],
        _ => [0.0, 1.0],
    };
    let y = padded_bounds(data.iter().map(|(_, v)| *v));

    let dataset = Dataset::default()
        .name(name.to_string())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::ACCENT))
        .data(data);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(" {name} "))
        .title_style(theme::neutral());

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds(x)
                .labels(
                    x_labels
                        .iter()
                        .map(|l| Span::styled(l.clone(), theme::muted()))
                        .collect::<Vec<_>>(),
                ),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds(y)
                .labels(vec![
                    Span::styled(format!("{:.2}", y[0]), theme::muted()),
                    Span::styled(format!("{:.2}", y[1]), theme::muted()),
                ]),
        );
    f.render_widget(chart, area);
}
