use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds: page, nav/status bars, cards and popups
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    pub fg0: Color,
    pub fg1: Color,
    pub muted: Color,

    /// Logo dot, active nav item, section headings
    pub accent: Color,
    /// Tags, chips and secondary highlights
    pub secondary: Color,

    pub selection: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::gruvbox_dark()
    }
}

/// Mix `color` toward `background`; `t = 1.0` is the full color.
///
/// Only RGB colors can be mixed; others snap at the halfway point.
pub fn blend(color: Color, background: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (color, background) {
        (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
            let mix = |c: u8, base: u8| (base as f64 + (c as f64 - base as f64) * t).round() as u8;
            Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
        }
        _ if t >= 0.5 => color,
        _ => background,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        let fg = Color::Rgb(200, 100, 0);
        let bg = Color::Rgb(0, 0, 0);
        assert_eq!(blend(fg, bg, 1.0), fg);
        assert_eq!(blend(fg, bg, 0.0), bg);
        assert_eq!(blend(fg, bg, 0.5), Color::Rgb(100, 50, 0));
        assert_eq!(blend(fg, bg, 4.0), fg);
    }

    #[test]
    fn test_blend_named_colors_snap() {
        assert_eq!(blend(Color::Red, Color::Black, 0.4), Color::Black);
        assert_eq!(blend(Color::Red, Color::Black, 0.6), Color::Red);
    }
}
