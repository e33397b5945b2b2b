use clap::ValueEnum;
use ratatui::style::Color;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub bar_bg: Color,
    pub selection_bg: Color,
    pub good: Color,
    pub warn: Color,
    pub error: Color,
}

impl Theme {
    /// Colour of a rating in the tree column: weak, middling or strong.
    pub fn rating_color(&self, rating: Option<f64>) -> Color {
        match rating {
            None => self.muted,
            Some(r) if r < 4.0 => self.error,
            Some(r) if r < 7.0 => self.warn,
            Some(_) => self.good,
        }
    }
}

pub fn theme_of(kind: ThemeKind) -> Theme {
    match kind {
        ThemeKind::Dark => Theme {
            fg: Color::Rgb(0, 255, 157),
            muted: Color::Rgb(140, 140, 160),
            accent: Color::Rgb(95, 125, 149),
            bar_bg: Color::Rgb(26, 6, 54),
            selection_bg: Color::Rgb(61, 20, 102),
            good: Color::Rgb(130, 200, 120),
            warn: Color::Rgb(255, 200, 110),
            error: Color::Rgb(240, 110, 110),
        },
        ThemeKind::Light => Theme {
            fg: Color::Rgb(30, 30, 30),
            muted: Color::Rgb(120, 120, 120),
            accent: Color::Rgb(74, 98, 118),
            bar_bg: Color::Rgb(235, 240, 245),
            selection_bg: Color::Rgb(210, 220, 235),
            good: Color::Rgb(38, 166, 91),
            warn: Color::Rgb(255, 160, 0),
            error: Color::Rgb(200, 40, 40),
        },
    }
}
