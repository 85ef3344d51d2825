//! TUI color theme.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    // Primary palette
    pub oracle: Color,
    pub optimal: Color,
    pub critical: Color,

    // UI chrome
    pub border: Color,
    pub muted: Color,
    pub text: Color,
    pub text_dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            oracle: Color::Rgb(0, 212, 255),
            optimal: Color::Rgb(163, 230, 53),
            critical: Color::Rgb(255, 68, 85),
            border: Color::Gray,
            muted: Color::DarkGray,
            text: Color::White,
            text_dim: Color::Gray,
        }
    }
}

impl Theme {
    /// Border color for an input panel.
    pub fn focus_color(&self, focused: bool) -> Color {
        if focused {
            self.oracle
        } else {
            self.border
        }
    }

    /// Text color of the result region.
    pub fn result_color(&self, download_enabled: bool, empty: bool) -> Color {
        if download_enabled {
            self.text
        } else if empty {
            self.muted
        } else {
            self.critical
        }
    }
}
