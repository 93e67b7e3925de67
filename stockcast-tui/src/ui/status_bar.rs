//! Bottom hint bar: key hints plus the current dashboard state.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use stockcast_core::DashboardState;

use crate::app::App;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let (label, style) = match app.model.state {
        DashboardState::Forecastable => ("FORECAST", theme::positive()),
        DashboardState::Insufficient => ("INSUFFICIENT", theme::warning()),
        DashboardState::Unavailable => ("UNAVAILABLE", theme::negative()),
    };

    let line = Line::from(vec![
        Span::styled(format!(" {label} "), style),
        Span::raw(" | "),
        Span::styled(
            "Tab:focus h/l:adjust PgUp/PgDn:big step +/-:zoom [ ]:pan J/K:scroll r:rerun ?:help q:quit",
            theme::muted(),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
