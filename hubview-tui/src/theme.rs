use hubview_core::config::{NamedColor, ThemeColor};
use ratatui::style::Color;

pub struct Theme {
    pub accent: Color,
    pub link: Color,
    pub error: Color,
    pub muted: Color,
    pub border: Color,
    pub hint: Color,
    pub highlight_fg: Color,
}

impl Theme {
    pub fn from_config(config: &hubview_core::config::ThemeConfig) -> Self {
        Self {
            accent: to_ratatui_color(&config.accent),
            link: to_ratatui_color(&config.link),
            error: to_ratatui_color(&config.error),
            muted: to_ratatui_color(&config.muted),
            border: to_ratatui_color(&config.border),
            hint: to_ratatui_color(&config.hint),
            highlight_fg: to_ratatui_color(&config.highlight_fg),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&hubview_core::config::ThemeConfig::default())
    }
}

fn to_ratatui_color(color: &ThemeColor) -> Color {
    match color {
        ThemeColor::Rgb(r, g, b) => Color::Rgb(*r, *g, *b),
        ThemeColor::Named(named) => match named {
            NamedColor::Black => Color::Black,
            NamedColor::Red => Color::Red,
            NamedColor::Green => Color::Green,
            NamedColor::Yellow => Color::Yellow,
            NamedColor::Blue => Color::Blue,
            NamedColor::Magenta => Color::Magenta,
            NamedColor::Cyan => Color::Cyan,
            NamedColor::White => Color::White,
            NamedColor::Gray => Color::DarkGray,
        },
    }
}
