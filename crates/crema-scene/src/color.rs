//! Color utility functions for page rendering.

use ratatui::style::Color;

/// Page background the foreground fades into.
pub const BACKGROUND: (u8, u8, u8) = (18, 12, 8);

/// Blend `color` toward the page background by `opacity` (0.0-1.0).
pub fn fade(color: Color, opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    let (r, g, b) = match color {
        Color::Rgb(r, g, b) => (r, g, b),
        other => return other,
    };
    let mix = |fg: u8, bg: u8| (bg as f32 + (fg as f32 - bg as f32) * opacity).round() as u8;
    Color::Rgb(
        mix(r, BACKGROUND.0),
        mix(g, BACKGROUND.1),
        mix(b, BACKGROUND.2),
    )
}

/// Warm gradient for the origins backdrop: deep green at 0, roasted brown at 1.
pub fn origins_gradient(value: f32) -> Color {
    let value = value.clamp(0.0, 1.0);
    let hue = 120.0 - value * 95.0;
    hsl_to_rgb(hue, 0.45, 0.12 + value * 0.1)
}

/// HSL to RGB by hue sector; `h` in degrees, `s` and `l` in 0.0-1.0.
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let sector = h.rem_euclid(360.0) / 60.0;
    let second = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u8 {
        0 => (chroma, second, 0.0),
        1 => (second, chroma, 0.0),
        2 => (0.0, chroma, second),
        3 => (0.0, second, chroma),
        4 => (second, 0.0, chroma),
        _ => (chroma, 0.0, second),
    };
    let m = l - chroma / 2.0;
    let channel = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0) as u8;
    Color::Rgb(channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        let c = Color::Rgb(200, 100, 50);
        assert_eq!(fade(c, 1.0), c);
        assert_eq!(
            fade(c, 0.0),
            Color::Rgb(BACKGROUND.0, BACKGROUND.1, BACKGROUND.2)
        );
        assert_eq!(fade(Color::Reset, 0.3), Color::Reset);
    }

    #[test]
    fn test_hsl_grey_and_primary() {
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.5), Color::Rgb(127, 127, 127));
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Color::Rgb(0, 255, 0));
        assert_eq!(hsl_to_rgb(360.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_origins_gradient_runs_green_to_brown() {
        let Color::Rgb(r0, g0, _) = origins_gradient(0.0) else {
            panic!("expected rgb");
        };
        let Color::Rgb(r1, g1, _) = origins_gradient(1.0) else {
            panic!("expected rgb");
        };
        assert!(g0 > r0);
        assert!(r1 > g1);
    }
}
