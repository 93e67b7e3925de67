//! The page column: blocks laid out top to bottom from the scroll offset.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, Focus};
use crate::page::PageBlock;
use crate::theme;

use super::{components_chart, forecast_chart, raw_chart, table};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut y = area.y;
    let bottom = area.y + area.height;

    for block in app.page.blocks.iter().skip(app.scroll as usize) {
        if y >= bottom {
            break;
        }
        let height = block.height().min(bottom - y);
        let rect = Rect::new(area.x, y, area.width, height);
        draw_block(f, rect, block, app);
        y += height;
    }
}

fn draw_block(f: &mut Frame, area: Rect, block: &PageBlock, app: &App) {
    match block {
        PageBlock::Title(text) => f.render_widget(
            Paragraph::new(Line::from(Span::styled(text.as_str(), theme::title()))),
            area,
        ),
        PageBlock::Subheader(text) => f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                text.as_str(),
                theme::neutral().add_modifier(Modifier::BOLD),
            ))),
            area,
        ),
        PageBlock::Caption(text) => f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                text.as_str(),
                theme::neutral().add_modifier(Modifier::ITALIC),
            ))),
            area,
        ),
        PageBlock::Text(text) => f.render_widget(
            Paragraph::new(Line::from(Span::styled(text.as_str(), theme::text()))),
            area,
        ),
        PageBlock::Status(status) => {
            let style = theme::status(status.is_error());
            let frame = Block::default().borders(Borders::ALL).border_style(style);
            f.render_widget(
                Paragraph::new(Span::styled(status.text.as_str(), style))
                    .block(frame)
                    .wrap(Wrap { trim: true }),
                area,
            );
        }
        PageBlock::Table(preview) => table::render(f, area, preview),
        PageBlock::RawChart(chart) => {
            raw_chart::render(f, area, chart, &app.window, app.focus == Focus::RangeSlider)
        }
        PageBlock::ForecastChart(chart) => forecast_chart::render(f, area, chart),
        PageBlock::Components(components) => components_chart::render(f, area, components),
    }
}
