//! Character constants for the page.

/// Bean glyphs indexed by quarter turn, so a rolling bean visibly spins.
pub const BEAN_GLYPHS: &[char] = &['◐', '◓', '◑', '◒'];

/// Glyph for a bean shrunk below half size.
pub const SMALL_BEAN: char = '•';

/// Glyph for a bean almost gone down the drain.
pub const TINY_BEAN: char = '·';

/// Characters for the origins background layer.
pub const LEAF_CHARS: &[char] = &['·', '\'', '`', ',', '.'];

/// Foreground leaf.
pub const FORE_LEAF: [&str; 3] = [r"  _/\_", r" /    \", r" \_/\_/"];

/// Coffee stream column.
pub const STREAM_CHAR: char = '┃';

/// Liquid fill inside the cup.
pub const LIQUID_CHAR: char = '▓';

/// Espresso machine, drawn centered above the cup.
pub const MACHINE: [&str; 6] = [
    " ____________ ",
    "|  ________  |",
    "| |  BREW  | |",
    "| |________| |",
    "|____    ____|",
    "     \\__/     ",
];

/// Cup outline; the liquid fills the inner rows.
pub const CUP: [&str; 4] = ["|        |_", "|        | )", "|        |/", " \\______/"];

/// Steaming-cup frame sequence, scrubbed by brew progress.
pub const STEAM_FRAMES: [[&str; 2]; 6] = [
    ["        ", "        "],
    ["   .    ", "        "],
    ["  . '   ", "   .    "],
    [" ( ) (  ", "  ' .   "],
    ["  ) ( ) ", " ( ) (  "],
    [" ( ) ( )", "  ) ( ) "],
];

/// Select the bean glyph for a rotation in degrees and a scale factor.
pub fn bean_glyph(rotation: f32, scale: f32) -> char {
    if scale < 0.3 {
        return TINY_BEAN;
    }
    if scale < 0.5 {
        return SMALL_BEAN;
    }
    let quarter = (rotation / 90.0).round().rem_euclid(4.0) as usize;
    BEAN_GLYPHS[quarter % BEAN_GLYPHS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bean_glyph_spins_with_rotation() {
        assert_eq!(bean_glyph(0.0, 1.0), '◐');
        assert_eq!(bean_glyph(90.0, 1.0), '◓');
        assert_eq!(bean_glyph(-90.0, 1.0), '◒');
        assert_eq!(bean_glyph(360.0 * 7.0 + 180.0, 1.0), '◑');
        assert_eq!(bean_glyph(45.0, 0.4), SMALL_BEAN);
        assert_eq!(bean_glyph(45.0, 0.2), TINY_BEAN);
    }
}
