//! Keyboard input dispatch: overlay first, then global keys, then the
//! focused control.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Focus, Overlay};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.overlay == Overlay::Help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.overlay = Overlay::None;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('r') => app.rerun(),
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.prev(),
        KeyCode::Char('J') => app.scroll_page(1),
        KeyCode::Char('K') => app.scroll_page(-1),
        KeyCode::Char('+') | KeyCode::Char('=') => app.window.zoom_in(),
        KeyCode::Char('-') => app.window.zoom_out(),
        KeyCode::Char('[') => app.window.pan(-1),
        KeyCode::Char(']') => app.window.pan(1),
        KeyCode::Char('0') => app.window = crate::app::RangeWindow::full(app.window.total),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('j') | KeyCode::Down => {
            app.adjust_focused(1, false)
        }
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('k') | KeyCode::Up => {
            app.adjust_focused(-1, false)
        }
        KeyCode::PageUp => app.adjust_focused(1, true),
        KeyCode::PageDown => app.adjust_focused(-1, true),
        KeyCode::Home => jump(app, false),
        KeyCode::End => jump(app, true),
        _ => {}
    }
}

/// Move the focused slider to its minimum or maximum.
fn jump(app: &mut App, to_max: bool) {
    use stockcast_core::domain::{PERIOD_DAYS_MAX, PERIOD_DAYS_MIN, YEARS_MAX, YEARS_MIN};
    use stockcast_core::{ForecastHorizon, YearsOfPrediction};

    match app.focus {
        Focus::Years => {
            let y = if to_max { YEARS_MAX } else { YEARS_MIN };
            app.set_years(YearsOfPrediction::clamped(i64::from(y)));
        }
        Focus::Days => {
            let d = if to_max { PERIOD_DAYS_MAX } else { PERIOD_DAYS_MIN };
            app.set_days(ForecastHorizon::clamped(i64::from(d)));
        }
        Focus::RangeSlider => {
            let w = &mut app.window;
            w.start = if to_max { w.total - w.len } else { 0 };
        }
        Focus::Ticker => {}
    }
}
