//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;

    pub const HEADER_BG: Color = Color::Blue;
    pub const HEADER_FG: Color = Color::White;
    pub const SELECTED_BG: Color = Color::DarkGray;

    pub const CHANGE_UP: Color = Color::Green;
    pub const CHANGE_DOWN: Color = Color::Red;
    pub const ERROR: Color = Color::Red;
    pub const RECONNECT: Color = Color::Yellow;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Top status bar.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header row.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected row.
    pub fn selected() -> Style {
        Style::default()
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Non-negative 24h change.
    pub fn change_up() -> Style {
        Style::default().fg(Theme::CHANGE_UP)
    }

    /// Negative 24h change.
    pub fn change_down() -> Style {
        Style::default().fg(Theme::CHANGE_DOWN)
    }

    /// Terminal feed error.
    pub fn error() -> Style {
        Style::default().fg(Theme::ERROR).add_modifier(Modifier::BOLD)
    }

    /// Reconnecting notice.
    pub fn reconnect() -> Style {
        Style::default().fg(Theme::RECONNECT)
    }

    /// Dimmed text (help line, placeholders).
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }
}
