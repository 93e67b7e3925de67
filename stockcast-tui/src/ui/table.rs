//! Tail preview tables.

use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use stockcast_core::frame::TablePreview;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect, preview: &TablePreview) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(theme::muted())
        .title(Span::styled(
            format!(" last {} of {} rows ", preview.rows.len(), preview.total_rows),
            theme::muted(),
        ));

    if preview.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No rows", theme::muted())).block(block),
            area,
        );
        return;
    }

    let header = Row::new(
        preview
            .columns
            .iter()
            .map(|c| Cell::from(c.as_str()).style(theme::accent_bold())),
    );
    let rows = preview.rows.iter().map(|r| {
        Row::new(r.iter().map(|v| Cell::from(v.as_str()))).style(theme::text())
    });

    f.render_widget(
        Table::new(rows, column_widths(preview))
            .header(header)
            .column_spacing(2)
            .block(block),
        area,
    );
}

/// Each column as wide as its widest cell or header.
pub fn column_widths(preview: &TablePreview) -> Vec<Constraint> {
    preview
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let widest = preview
                .rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(|v| v.chars().count())
                .max()
                .unwrap_or(0);
            Constraint::Length(widest.max(name.chars().count()) as u16)
        })
        .collect()
}
