//! Parrot/neon palette and the styles the dashboard draws with.
//!
//! - **Accent** (electric cyan): focus, titles, the fitted line
//! - **Positive** (neon green): success status
//! - **Negative** (hot pink): error status
//! - **Warning** (neon orange): interval bounds
//! - **Neutral** (cool purple): subheaders, captions
//! - **Muted** (steel blue): axes, hints, observed points

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

/// Raw chart traces: opening price blue, closing price red.
pub const OPEN_TRACE: Color = Color::Rgb(66, 135, 245);
pub const CLOSE_TRACE: Color = Color::Rgb(235, 64, 52);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn text_secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

pub fn title() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn panel_border(focused: bool) -> Style {
    if focused {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(focused: bool) -> Style {
    if focused {
        accent_bold()
    } else {
        text_secondary()
    }
}

/// Style for a sidebar control row: reversed when it has focus.
pub fn control(focused: bool) -> Style {
    if focused {
        accent().add_modifier(Modifier::REVERSED)
    } else {
        text()
    }
}

pub fn status(is_error: bool) -> Style {
    if is_error {
        negative().add_modifier(Modifier::BOLD)
    } else {
        positive().add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_styles_differ() {
        assert_ne!(panel_border(true), panel_border(false));
        assert_eq!(panel_border(true).fg, Some(ACCENT));
        assert!(control(true).add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn status_colors() {
        assert_eq!(status(true).fg, Some(NEGATIVE));
        assert_eq!(status(false).fg, Some(POSITIVE));
    }
}
