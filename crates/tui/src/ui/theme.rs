use ratatui::style::Color;

/// Palette for the whole UI. Accent and badge colors follow the web app's
/// indigo/green/red scheme.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub positive: Color,
    pub negative: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface: Color::Rgb(16, 18, 28),
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(170, 170, 170),
            dim: Color::Rgb(130, 130, 140),
            accent: Color::Rgb(129, 140, 248),
            border: Color::Rgb(60, 66, 82),
            border_focused: Color::Rgb(129, 140, 248),
            positive: Color::Rgb(74, 222, 128),
            negative: Color::Rgb(248, 113, 113),
            error: Color::Rgb(248, 113, 113),
        }
    }
}
