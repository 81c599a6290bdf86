//! Theme registry and loader

mod dracula;
pub(crate) mod gruvbox;
mod nord;

use tracing::warn;

use crate::theme::Theme;

/// Load a theme by name, falling back to gruvbox-dark
pub fn load_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "gruvbox-dark" | "gruvbox" => gruvbox::dark(),
        "gruvbox-light" => gruvbox::light(),
        "nord" => nord::default(),
        "dracula" => dracula::default(),
        other => {
            warn!("Unknown theme '{}', using gruvbox-dark", other);
            gruvbox::dark()
        }
    }
}

pub fn available_themes() -> Vec<&'static str> {
    vec!["gruvbox-dark", "gruvbox-light", "nord", "dracula"]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_load_theme_default() {
        let theme = load_theme("gruvbox-dark");
        assert!(matches!(theme.bg0, Color::Rgb(0x28, 0x28, 0x28)));
        assert_eq!(Theme::default().bg0, theme.bg0);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let theme = load_theme("no-such-theme");
        assert!(matches!(theme.bg0, Color::Rgb(0x28, 0x28, 0x28)));
    }

    #[test]
    fn test_every_listed_theme_loads() {
        for name in available_themes() {
            let theme = load_theme(name);
            assert_ne!(theme.fg0, theme.bg0, "{}", name);
        }
        assert!(matches!(load_theme("Nord").bg0, Color::Rgb(0x2e, 0x34, 0x40)));
    }
}
