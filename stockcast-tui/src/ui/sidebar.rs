//! Sidebar: stock select, years slider, period slider, range slider state.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use stockcast_core::domain::{PERIOD_DAYS_MAX, PERIOD_DAYS_MIN, YEARS_MAX, YEARS_MIN};

use crate::app::{App, Focus};
use crate::theme;

/// Track width of the slider bars in cells.
const TRACK: usize = 20;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();
    let sel = &app.selection;

    label(&mut lines, app, Focus::Ticker);
    for ticker in app.tickers().all() {
        let chosen = *ticker == sel.ticker;
        let marker = if chosen { "(•) " } else { "( ) " };
        let style = if chosen {
            theme::control(app.focus == Focus::Ticker)
        } else {
            theme::text_secondary()
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{marker}{ticker}"), style),
        ]));
    }
    lines.push(Line::from(""));

    label(&mut lines, app, Focus::Years);
    lines.push(slider_line(
        u32::from(sel.years.get()),
        u32::from(YEARS_MIN),
        u32::from(YEARS_MAX),
        app.focus == Focus::Years,
    ));
    lines.push(Line::from(""));

    label(&mut lines, app, Focus::Days);
    lines.push(slider_line(
        sel.horizon.days(),
        PERIOD_DAYS_MIN,
        PERIOD_DAYS_MAX,
        app.focus == Focus::Days,
    ));
    lines.push(Line::from(""));

    label(&mut lines, app, Focus::RangeSlider);
    let w = &app.window;
    let pct = if w.total == 0 {
        100
    } else {
        w.len * 100 / w.total
    };
    lines.push(Line::from(Span::styled(
        format!("  showing {} of {} rows ({pct}%)", w.len, w.total),
        theme::control(app.focus == Focus::RangeSlider),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled("Today: ", theme::muted()),
        Span::styled(app.model.today.to_string(), theme::text()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Data: ", theme::muted()),
        Span::styled(app.controller().loader().provider_name().to_string(), theme::text()),
        Span::styled("  Model: ", theme::muted()),
        Span::styled(app.controller().engine_name().to_string(), theme::text()),
    ]));
    lines.push(Line::from(Span::styled(
        format!("Reruns: {}", app.render_count),
        theme::muted(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(" Controls ")
        .title_style(theme::panel_title(false));
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn label(lines: &mut Vec<Line<'_>>, app: &App, focus: Focus) {
    let focused = app.focus == focus;
    let prefix = if focused { "▶ " } else { "  " };
    let style = if focused {
        theme::accent_bold()
    } else {
        theme::neutral()
    };
    lines.push(Line::from(Span::styled(
        format!("{prefix}{}:", focus.label()),
        style,
    )));
}

fn slider_line(value: u32, min: u32, max: u32, focused: bool) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(slider_track(value, min, max, TRACK), theme::control(focused)),
        Span::styled(format!(" {value}"), theme::accent()),
    ])
}

/// `[====o-----]` with the knob at `value`'s position in `[min, max]`.
pub fn slider_track(value: u32, min: u32, max: u32, width: usize) -> String {
    let width = width.max(1);
    let span = max.saturating_sub(min).max(1) as f64;
    let frac = (value.clamp(min, max) - min) as f64 / span;
    let knob = (frac * (width - 1) as f64).round() as usize;
    let track: String = (0..width)
        .map(|i| match i.cmp(&knob) {
            std::cmp::Ordering::Less => '=',
            std::cmp::Ordering::Equal => 'o',
            std::cmp::Ordering::Greater => '-',
        })
        .collect();
    format!("[{track}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_knob_positions() {
        assert_eq!(slider_track(1, 1, 5, 5), "[o----]");
        assert_eq!(slider_track(5, 1, 5, 5), "[====o]");
        assert_eq!(slider_track(3, 1, 5, 5), "[==o--]");
        assert_eq!(slider_track(99, 1, 5, 5), "[====o]");
    }
}
