//! TUI styles and color themes.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the TUI.
pub struct ColorTheme {
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            primary: Color::Magenta,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            text: Color::White,
            muted: Color::DarkGray,
            border: Color::Gray,
        }
    }
}

impl ColorTheme {
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn balance_style(&self) -> Style {
        Style::default()
            .fg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    /// Digit of a reel that is still moving: dimmed and slanted.
    #[must_use]
    pub fn reel_blurred_style(&self) -> Style {
        Style::default()
            .fg(self.muted)
            .add_modifier(Modifier::DIM | Modifier::ITALIC)
    }

    #[must_use]
    pub fn reel_settled_style(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn reel_border_style(&self, animating: bool) -> Style {
        if animating {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.border)
        }
    }

    #[must_use]
    pub fn button_style(&self, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(Color::Black)
                .bg(self.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            self.muted_style()
        }
    }

    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default()
            .fg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blurred_and_settled_differ() {
        let theme = ColorTheme::default();
        assert_ne!(theme.reel_blurred_style(), theme.reel_settled_style());
        assert!(theme
            .reel_blurred_style()
            .add_modifier
            .contains(Modifier::ITALIC));
    }

    #[test]
    fn disabled_button_has_no_background() {
        let theme = ColorTheme::default();
        assert_eq!(theme.button_style(false).bg, None);
        assert_eq!(theme.button_style(true).bg, Some(Color::Magenta));
    }
}
