//! Built-in themes and the loader that applies user overrides

mod dracula;
mod gruvbox;
mod nord;
mod one_dark;

use folio_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;

use crate::theme::Theme;

pub(crate) fn gruvbox_dark() -> Theme {
    gruvbox::dark()
}

/// Parse "#RRGGBB", "RRGGBB", "#RGB" or "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        3 => Some(Color::Rgb(
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        )),
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}

pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "gruvbox-dark" | "gruvbox" => gruvbox::dark(),
        "gruvbox-light" => gruvbox::light(),
        "nord" => nord::default(),
        "dracula" => dracula::default(),
        "one-dark" | "onedark" => one_dark::default(),
        other => {
            tracing::warn!(
                "Unknown theme '{}', falling back to gruvbox-dark (available: {})",
                other,
                available_themes().join(", ")
            );
            gruvbox::dark()
        }
    };

    apply_overrides(base, &config.colors)
}

fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots: [(&Option<String>, &mut Color); 11] = [
        (&overrides.bg0, &mut theme.bg0),
        (&overrides.bg1, &mut theme.bg1),
        (&overrides.bg2, &mut theme.bg2),
        (&overrides.fg0, &mut theme.fg0),
        (&overrides.fg1, &mut theme.fg1),
        (&overrides.accent, &mut theme.accent),
        (&overrides.selection, &mut theme.selection),
        (&overrides.error, &mut theme.error),
        (&overrides.success, &mut theme.success),
        (&overrides.warning, &mut theme.warning),
        (&overrides.info, &mut theme.info),
    ];

    for (hex, slot) in slots {
        if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }

    theme
}

pub fn available_themes() -> Vec<&'static str> {
    vec!["gruvbox-dark", "gruvbox-light", "nord", "dracula", "one-dark"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff5500"), Some(Color::Rgb(255, 85, 0)));
        assert_eq!(parse_hex_color("f50"), Some(Color::Rgb(255, 85, 0)));
        assert!(parse_hex_color("invalid").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
    }

    #[test]
    fn test_default_theme_is_gruvbox() {
        let theme = load_theme(&ThemeConfig::default());
        assert_eq!(theme.bg0, Color::Rgb(0x28, 0x28, 0x28));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = ThemeConfig {
            name: "solarized-neon".into(),
            colors: ThemeColorOverrides::default(),
        };
        assert_eq!(load_theme(&config).bg0, Color::Rgb(0x28, 0x28, 0x28));
    }

    #[test]
    fn test_overrides_apply() {
        let config = ThemeConfig {
            name: "nord".into(),
            colors: ThemeColorOverrides {
                accent: Some("#ff0000".into()),
                bg0: Some("not-a-color".into()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert_eq!(theme.accent, Color::Rgb(255, 0, 0));
        assert_eq!(theme.bg0, Color::Rgb(0x2e, 0x34, 0x40));
    }
}
