use crate::styles::theme;
use ratatui::prelude::*;

/// Get the border style for a focused pane or field
pub fn focused_border_style() -> Style {
    Style::default().fg(theme().border_focused)
}

/// Get the border style for an unfocused pane or field
pub fn unfocused_border_style() -> Style {
    Style::default().fg(theme().border)
}

/// Get the border style for a disabled field
pub fn disabled_border_style() -> Style {
    Style::default().fg(theme().text_muted)
}

/// Get the text style for a disabled field
pub fn disabled_text_style() -> Style {
    Style::default().fg(theme().text_muted)
}

/// Get the text style for placeholder text
pub fn input_placeholder_style() -> Style {
    Style::default().fg(theme().text_muted)
}

/// Get the text style for normal input text
pub fn input_text_style() -> Style {
    Style::default().fg(theme().text)
}
