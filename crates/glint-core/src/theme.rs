//! Accent colour themes.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Accent colour used for the countdown digits and icon labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Cyan,
    Green,
    White,
    Magenta,
    Yellow,
    Red,
    Blue,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Yellow,
            ColorTheme::Yellow => ColorTheme::Red,
            ColorTheme::Red => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
            ColorTheme::White => ColorTheme::Cyan,
        }
    }

    /// Named terminal colour for text widgets.
    pub fn color(self) -> Color {
        match self {
            ColorTheme::Cyan => Color::Cyan,
            ColorTheme::Green => Color::Green,
            ColorTheme::White => Color::White,
            ColorTheme::Magenta => Color::Magenta,
            ColorTheme::Yellow => Color::Yellow,
            ColorTheme::Red => Color::Red,
            ColorTheme::Blue => Color::Blue,
        }
    }

    /// RGB components, for effects that fade the accent by opacity.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTheme::Cyan => (0, 215, 255),
            ColorTheme::Green => (95, 215, 95),
            ColorTheme::White => (230, 230, 230),
            ColorTheme::Magenta => (215, 95, 215),
            ColorTheme::Yellow => (255, 215, 95),
            ColorTheme::Red => (255, 95, 95),
            ColorTheme::Blue => (95, 135, 255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_returns_to_start() {
        let mut theme = ColorTheme::default();
        for _ in 0..7 {
            theme = theme.next();
        }
        assert_eq!(theme, ColorTheme::Cyan);
    }

    #[test]
    fn test_cycle_visits_every_theme_once() {
        let mut seen = Vec::new();
        let mut theme = ColorTheme::Cyan;
        for _ in 0..7 {
            assert!(!seen.contains(&theme));
            seen.push(theme);
            theme = theme.next();
        }
    }
}
