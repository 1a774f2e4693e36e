//! Theme colors
//! Defaults follow a dark gray-on-black palette with red set inputs; any color can be
//! overridden from the `[theme]` table of the config file.

use ratatui::style::Color;

use crate::config::ThemeConfig;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,           // Focused borders, open menu buttons
    pub danger: Color,           // Destructive menu items
    pub text: Color,             // Primary text
    pub text_dim: Color,         // Placeholders, hints, idle buttons
    pub inactive: Color,         // Unfocused borders
    pub menu_bg: Color,          // Dropdown background
    pub input_bg: Color,         // Weight/reps inputs
    pub selected_bg: Color,      // Highlighted menu item
    pub header: Color,           // Table headers
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(229, 231, 235),
            danger: Color::Rgb(239, 68, 68),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(107, 114, 128),
            inactive: Color::Rgb(55, 65, 81),
            menu_bg: Color::Rgb(31, 41, 55),
            input_bg: Color::Rgb(220, 38, 38),
            selected_bg: Color::Rgb(55, 65, 81),
            header: Color::Rgb(156, 163, 175),
        }
    }
}

impl Theme {
    /// Defaults with any valid overrides from config applied
    pub fn from_config(overrides: &ThemeConfig) -> Self {
        let mut theme = Self::default();

        let slots: [(&Option<String>, &mut Color); 9] = [
            (&overrides.accent, &mut theme.accent),
            (&overrides.danger, &mut theme.danger),
            (&overrides.text, &mut theme.text),
            (&overrides.text_dim, &mut theme.text_dim),
            (&overrides.inactive, &mut theme.inactive),
            (&overrides.menu_bg, &mut theme.menu_bg),
            (&overrides.input_bg, &mut theme.input_bg),
            (&overrides.selected_bg, &mut theme.selected_bg),
            (&overrides.header, &mut theme.header),
        ];

        for (value, slot) in slots {
            if let Some(value) = value {
                match Self::parse_hex_color(value) {
                    Some(color) => *slot = color,
                    None => tracing::warn!("Ignoring invalid theme color: {}", value),
                }
            }
        }

        theme
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}
