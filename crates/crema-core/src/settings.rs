//! User-facing settings shared by the config and the renderer.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// How far one scroll step moves the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next speed.
    pub fn next(&self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Scroll distance per key press or wheel notch, in px.
    pub fn scroll_step_px(&self) -> f32 {
        match self {
            AnimationSpeed::Slow => 40.0,
            AnimationSpeed::Medium => 96.0,
            AnimationSpeed::Fast => 200.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}

/// Color palette of the page, named after roast levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoastTheme {
    Light,
    #[default]
    Medium,
    Dark,
    Espresso,
}

impl RoastTheme {
    /// Cycle to the next theme.
    pub fn next(&self) -> Self {
        match self {
            RoastTheme::Light => RoastTheme::Medium,
            RoastTheme::Medium => RoastTheme::Dark,
            RoastTheme::Dark => RoastTheme::Espresso,
            RoastTheme::Espresso => RoastTheme::Light,
        }
    }

    /// Bean fill color.
    pub fn bean(self) -> Color {
        match self {
            RoastTheme::Light => Color::Rgb(160, 110, 60),
            RoastTheme::Medium => Color::Rgb(120, 80, 45),
            RoastTheme::Dark => Color::Rgb(75, 54, 33),
            RoastTheme::Espresso => Color::Rgb(62, 43, 31),
        }
    }

    /// Headline and accent color.
    pub fn accent(self) -> Color {
        match self {
            RoastTheme::Light => Color::Rgb(230, 190, 140),
            RoastTheme::Medium => Color::Rgb(212, 163, 115),
            RoastTheme::Dark => Color::Rgb(196, 140, 90),
            RoastTheme::Espresso => Color::Rgb(235, 220, 200),
        }
    }

    /// Body text color.
    pub fn text(self) -> Color {
        match self {
            RoastTheme::Light | RoastTheme::Medium => Color::Rgb(220, 210, 195),
            RoastTheme::Dark | RoastTheme::Espresso => Color::Rgb(190, 180, 170),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoastTheme::Light => "light",
            RoastTheme::Medium => "medium",
            RoastTheme::Dark => "dark",
            RoastTheme::Espresso => "espresso",
        }
    }
}
