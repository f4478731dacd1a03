//! Theme and style system for Trendwave.
//!
//! Provides consistent styling across the application with support for
//! dark, light, and color-free terminals.

use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use std::sync::RwLock;

/// List selection indicator shown next to the selected item
pub const LIST_HIGHLIGHT_SYMBOL: &str = "» ";

/// Global theme instance (supports runtime updates)
static THEME: RwLock<Theme> = RwLock::new(Theme {
    theme_type: ThemeType::Dark,
    primary: Color::Magenta,
    success: Color::Green,
    warning: Color::Yellow,
    error: Color::Red,
    text: Color::White,
    text_muted: Color::DarkGray,
    border: Color::DarkGray,
    border_focused: Color::Magenta,
    highlight_bg: Color::DarkGray,
    background: Color::Reset,
});

/// Initialize the global theme (call once at startup, or to update at runtime)
pub fn init_theme(theme_type: ThemeType) {
    let mut theme = THEME.write().unwrap();
    *theme = Theme::new(theme_type);
}

/// Get the current theme
pub fn theme() -> Theme {
    THEME.read().unwrap().clone()
}

/// Theme type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    /// Disable all UI colors (equivalent to `NO_COLOR=1`)
    NoColor,
}

impl FromStr for ThemeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "light" => ThemeType::Light,
            "nocolor" | "no-color" | "no_color" => ThemeType::NoColor,
            _ => ThemeType::Dark,
        })
    }
}

/// Color palette for the application
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme type
    pub theme_type: ThemeType,
    /// Main accent color (borders, titles, the brand magenta)
    pub primary: Color,
    /// Success states (verified, sent)
    pub success: Color,
    /// Warning states
    pub warning: Color,
    /// Error states (validation failures, rejected calls)
    pub error: Color,
    /// Normal text
    pub text: Color,
    /// Muted text (labels, hints)
    pub text_muted: Color,
    /// Unfocused borders
    pub border: Color,
    /// Focused borders
    pub border_focused: Color,
    /// Highlighted row background
    pub highlight_bg: Color,
    /// Screen background
    pub background: Color,
}

impl Theme {
    /// Create a theme for the given type
    pub fn new(theme_type: ThemeType) -> Self {
        match theme_type {
            ThemeType::Dark => Self {
                theme_type,
                primary: Color::Magenta,
                success: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
                text: Color::White,
                text_muted: Color::DarkGray,
                border: Color::DarkGray,
                border_focused: Color::Magenta,
                highlight_bg: Color::DarkGray,
                background: Color::Reset,
            },
            ThemeType::Light => Self {
                theme_type,
                primary: Color::Magenta,
                success: Color::Green,
                warning: Color::Rgb(180, 120, 0),
                error: Color::Red,
                text: Color::Black,
                text_muted: Color::Gray,
                border: Color::Gray,
                border_focused: Color::Magenta,
                highlight_bg: Color::Rgb(220, 220, 220),
                background: Color::Reset,
            },
            ThemeType::NoColor => Self {
                theme_type,
                primary: Color::Reset,
                success: Color::Reset,
                warning: Color::Reset,
                error: Color::Reset,
                text: Color::Reset,
                text_muted: Color::Reset,
                border: Color::Reset,
                border_focused: Color::Reset,
                highlight_bg: Color::Reset,
                background: Color::Reset,
            },
        }
    }

    /// Style for normal text
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Style for muted text (labels, hints)
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Style for titles and headings
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    /// Style for error text
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for success text
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Style for the screen background
    pub fn background_style(&self) -> Style {
        Style::default().bg(self.background)
    }

    /// Style for a highlighted list row
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_type_from_str() {
        assert_eq!(ThemeType::from_str("light").unwrap(), ThemeType::Light);
        assert_eq!(ThemeType::from_str("no-color").unwrap(), ThemeType::NoColor);
        assert_eq!(ThemeType::from_str("anything").unwrap(), ThemeType::Dark);
    }

    #[test]
    fn no_color_theme_uses_reset() {
        let t = Theme::new(ThemeType::NoColor);
        assert_eq!(t.primary, Color::Reset);
        assert_eq!(t.error, Color::Reset);
    }
}
