//! Theme registry and loader

mod nord;
mod one_dark;

use ratatui::style::Color;
use sidescroll_core::config::{ThemeColorOverrides, ThemeConfig};

use crate::theme::Theme;

/// Gruvbox Dark, the default theme
pub fn gruvbox_dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x28, 0x28),
        bg1: Color::Rgb(0x32, 0x30, 0x2f),
        bg2: Color::Rgb(0x45, 0x40, 0x3d),
        fg0: Color::Rgb(0xd4, 0xbe, 0x98),
        fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
        grey: Color::Rgb(0xa8, 0x99, 0x84),
        accent: Color::Rgb(0xa9, 0xb6, 0x65),
        disabled: Color::Rgb(0x7c, 0x6f, 0x64),
        warning: Color::Rgb(0xe7, 0x8a, 0x4e),
        success: Color::Rgb(0x89, 0xb4, 0x82),
    }
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Load a theme by name from config
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "nord" => nord::default(),
        "one-dark" | "onedark" => one_dark::default(),
        "gruvbox-dark" | "gruvbox" => gruvbox_dark(),
        other => {
            tracing::warn!("Unknown theme '{}', falling back to gruvbox-dark", other);
            gruvbox_dark()
        }
    };

    apply_overrides(base, &config.colors)
}

/// Apply user color overrides to a base theme
fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots: [(&Option<String>, &mut Color); 7] = [
        (&overrides.bg0, &mut theme.bg0),
        (&overrides.bg1, &mut theme.bg1),
        (&overrides.bg2, &mut theme.bg2),
        (&overrides.fg0, &mut theme.fg0),
        (&overrides.accent, &mut theme.accent),
        (&overrides.disabled, &mut theme.disabled),
        (&overrides.warning, &mut theme.warning),
    ];

    for (hex, slot) in slots {
        if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }
    theme
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("0f0"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#12"), None);
        assert_eq!(parse_hex_color("zzzzzz"), None);
        assert_eq!(parse_hex_color("#é1"), None);
        assert_eq!(parse_hex_color("ff00é"), None);
    }

    #[test]
    fn test_load_theme_with_override() {
        let mut config = ThemeConfig {
            name: "nord".to_string(),
            ..Default::default()
        };
        config.colors.accent = Some("#010203".to_string());
        let theme = load_theme(&config);
        assert_eq!(theme.accent, Color::Rgb(1, 2, 3));
        assert_eq!(theme.bg0, nord::default().bg0);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = ThemeConfig {
            name: "no-such-theme".to_string(),
            ..Default::default()
        };
        assert_eq!(load_theme(&config).bg0, gruvbox_dark().bg0);
    }
}
