//! Styles derived from the configured colors.

use ratatui::style::{Color, Modifier, Style};

use crate::config::Colors;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Pet panel border and title.
    pub accent: Style,
    /// Body text.
    pub text: Style,
    /// Selected todo and field labels.
    pub highlight: Style,
    pub todo_border: Style,
    /// Help line and placeholders.
    pub muted: Style,
}

impl Theme {
    pub fn from_colors(colors: &Colors) -> Self {
        let base = Style::default().bg(colors.background.0);
        Self {
            accent: base.fg(colors.accent.0),
            text: base.fg(colors.foreground.0),
            highlight: base
                .fg(colors.highlight.0)
                .add_modifier(Modifier::BOLD),
            todo_border: base.fg(colors.todo_border.0),
            muted: Style::default().fg(Color::DarkGray),
        }
    }
}
