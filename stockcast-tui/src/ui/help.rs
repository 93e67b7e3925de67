//! Help overlay: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Sidebar");
    key(&mut lines, "Tab / Shift+Tab", "Cycle focus: stock, years, period, range slider");
    key(&mut lines, "h / l, ← / →", "Decrease / increase the focused control");
    key(&mut lines, "j / k, ↓ / ↑", "Same as l / h");
    key(&mut lines, "PgUp / PgDn", "Large step (365 days, 4 pans)");
    key(&mut lines, "Home / End", "Jump the focused slider to its minimum / maximum");
    lines.push(Line::from(""));

    section(&mut lines, "Raw chart range slider");
    key(&mut lines, "+ / -", "Zoom in / out");
    key(&mut lines, "[ / ]", "Pan back / forward");
    key(&mut lines, "0", "Show the whole history");
    lines.push(Line::from(""));

    section(&mut lines, "Page");
    key(&mut lines, "J / K", "Scroll the page down / up");
    key(&mut lines, "r", "Reload and refit the current selection");
    key(&mut lines, "?", "Toggle this help");
    key(&mut lines, "q / Ctrl+C", "Quit");
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Changing stock, years or period reruns the whole page. Zoom and pan only redraw.",
        theme::muted(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Help ")
        .title_style(theme::panel_title(true));

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>18}  "), theme::accent()),
        Span::styled(desc.to_string(), theme::text_secondary()),
    ]));
}
