//! Theme and styling configuration.
//!
//! The active theme is set once at startup with [`init_theme`] and read
//! everywhere else through [`theme`].

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};

static THEME: OnceLock<Theme> = OnceLock::new();

/// Color theme for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Borders and titles of focused panels.
    pub accent: Color,
    /// Secondary text.
    pub dim: Color,
    /// Background of the highlighted row.
    pub highlight_bg: Color,
    /// Positive feedback, checked boxes.
    pub success: Color,
    /// Section headers, search matches.
    pub warning: Color,
    /// Destructive actions.
    pub danger: Color,
}

impl Theme {
    /// Default dark theme.
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            dim: Color::DarkGray,
            highlight_bg: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }

    /// Style for table headers.
    pub fn header_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for the row under the cursor.
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Install the application theme. Later calls are ignored.
pub fn init_theme(theme: Theme) {
    let _ = THEME.set(theme);
}

/// The active theme, falling back to [`Theme::dark`] if none was installed.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::dark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_falls_back_to_dark() {
        assert_eq!(theme().accent, Theme::dark().accent);
    }

    #[test]
    fn test_highlight_style_is_bold() {
        let style = Theme::dark().highlight_style();
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(style.bg, Some(Color::DarkGray));
    }
}
