//! TUI color theme.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    // Primary palette
    pub accent: Color,
    pub go: Color,
    pub caution: Color,
    pub critical: Color,

    // Card faces
    pub red_suit: Color,
    pub black_suit: Color,
    pub card_edge: Color,

    // UI chrome
    pub border: Color,
    pub muted: Color,
    pub text: Color,
    pub text_dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let critical = Color::Rgb(255, 68, 85);

        Self {
            accent: Color::Rgb(0, 212, 255),
            go: Color::Rgb(163, 230, 53),
            caution: Color::Rgb(251, 191, 36),
            critical,
            red_suit: critical,
            black_suit: Color::White,
            card_edge: Color::Gray,
            border: Color::Gray,
            muted: Color::DarkGray,
            text: Color::White,
            text_dim: Color::Gray,
        }
    }
}

impl Theme {
    pub fn suit_color(&self, red: bool) -> Color {
        if red {
            self.red_suit
        } else {
            self.black_suit
        }
    }

    /// Button color: green to start, amber while the loop is running.
    pub fn button_color(&self, auto_draw: bool) -> Color {
        if auto_draw {
            self.caution
        } else {
            self.go
        }
    }
}
