//! Theme system
//!
//! Provides:
//! - Theme struct with every colour the selector draws with
//! - Built-in presets (darkwall, catppuccin, nord, gruvbox)
//! - Hex and named colour parsing
//! - 256-color fallback

use ratatui::style::Color;
use thiserror::Error;

use crate::inventory::entry::ShortcutTone;
use crate::inventory::input::NavigationMode;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Window background
    pub background: Color,
    /// Primary text color
    pub foreground: Color,
    /// Background of highlighted rows
    pub selection_bg: Color,
    /// Text of highlighted rows
    pub selection_fg: Color,
    /// Frame, separators and title
    pub accent: Color,
    /// Hints, stats and page labels
    pub dimmed: Color,
    /// Rows that cannot be chosen
    pub disabled: Color,
    /// Category headers
    pub header: Color,
    /// Rejection reasons and over-capacity stats
    pub denial: Color,
    /// Shortcut keys colliding with reserved keys
    pub reserved_key: Color,
    /// Marks of chosen rows
    pub marked: Color,
    /// Footer in category navigation mode
    pub category_mode: Color,
    /// Transient notices
    pub notice: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::darkwall()
    }
}

impl Theme {
    /// Darkwall theme - default
    pub fn darkwall() -> Self {
        Self {
            background: Color::Rgb(13, 17, 22),       // #0d1116
            foreground: Color::Rgb(229, 234, 241),    // #e5eaf1
            selection_bg: Color::Rgb(229, 234, 241),  // #e5eaf1
            selection_fg: Color::Rgb(13, 17, 22),     // #0d1116
            accent: Color::Rgb(180, 83, 9),           // #b45309 (amber)
            dimmed: Color::Rgb(156, 163, 175),        // #9ca3af
            disabled: Color::Rgb(75, 85, 99),         // #4b5563
            header: Color::Rgb(192, 132, 252),        // #c084fc
            denial: Color::Rgb(239, 68, 68),          // #ef4444
            reserved_key: Color::Rgb(250, 204, 21),   // #facc15
            marked: Color::Rgb(34, 197, 94),          // #22c55e
            category_mode: Color::Rgb(229, 234, 241), // #e5eaf1
            notice: Color::Rgb(180, 83, 9),           // #b45309
        }
    }

    /// Catppuccin Mocha theme
    pub fn catppuccin_mocha() -> Self {
        Self {
            background: Color::Rgb(30, 30, 46),       // #1e1e2e (base)
            foreground: Color::Rgb(205, 214, 244),    // #cdd6f4 (text)
            selection_bg: Color::Rgb(69, 71, 90),     // #45475a (surface1)
            selection_fg: Color::Rgb(205, 214, 244),  // #cdd6f4 (text)
            accent: Color::Rgb(137, 180, 250),        // #89b4fa (blue)
            dimmed: Color::Rgb(166, 173, 200),        // #a6adc8 (subtext0)
            disabled: Color::Rgb(108, 112, 134),      // #6c7086 (overlay0)
            header: Color::Rgb(203, 166, 247),        // #cba6f7 (mauve)
            denial: Color::Rgb(243, 139, 168),        // #f38ba8 (red)
            reserved_key: Color::Rgb(249, 226, 175),  // #f9e2af (yellow)
            marked: Color::Rgb(166, 227, 161),        // #a6e3a1 (green)
            category_mode: Color::Rgb(250, 179, 135), // #fab387 (peach)
            notice: Color::Rgb(249, 226, 175),        // #f9e2af (yellow)
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            background: Color::Rgb(46, 52, 64),       // #2e3440 (nord0)
            foreground: Color::Rgb(236, 239, 244),    // #eceff4 (nord6)
            selection_bg: Color::Rgb(67, 76, 94),     // #434c5e (nord2)
            selection_fg: Color::Rgb(236, 239, 244),  // #eceff4 (nord6)
            accent: Color::Rgb(136, 192, 208),        // #88c0d0 (nord8)
            dimmed: Color::Rgb(216, 222, 233),        // #d8dee9 (nord4)
            disabled: Color::Rgb(76, 86, 106),        // #4c566a (nord3)
            header: Color::Rgb(180, 142, 173),        // #b48ead (nord15)
            denial: Color::Rgb(191, 97, 106),         // #bf616a (nord11)
            reserved_key: Color::Rgb(235, 203, 139),  // #ebcb8b (nord13)
            marked: Color::Rgb(163, 190, 140),        // #a3be8c (nord14)
            category_mode: Color::Rgb(208, 135, 112), // #d08770 (nord12)
            notice: Color::Rgb(235, 203, 139),        // #ebcb8b (nord13)
        }
    }

    /// Gruvbox dark theme
    pub fn gruvbox() -> Self {
        Self {
            background: Color::Rgb(40, 40, 40),       // #282828 (bg)
            foreground: Color::Rgb(235, 219, 178),    // #ebdbb2 (fg)
            selection_bg: Color::Rgb(80, 73, 69),     // #504945 (bg2)
            selection_fg: Color::Rgb(251, 241, 199),  // #fbf1c7 (fg0)
            accent: Color::Rgb(215, 153, 33),         // #d79921 (yellow)
            dimmed: Color::Rgb(168, 153, 132),        // #a89984 (gray)
            disabled: Color::Rgb(102, 92, 84),        // #665c54 (bg3)
            header: Color::Rgb(211, 134, 155),        // #d3869b (purple)
            denial: Color::Rgb(251, 73, 52),          // #fb4934 (red)
            reserved_key: Color::Rgb(250, 189, 47),   // #fabd2f (bright yellow)
            marked: Color::Rgb(184, 187, 38),         // #b8bb26 (green)
            category_mode: Color::Rgb(254, 128, 25),  // #fe8019 (orange)
            notice: Color::Rgb(250, 189, 47),         // #fabd2f
        }
    }

    /// Load theme from preset name
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "darkwall" | "default" => Some(Self::darkwall()),
            "catppuccin-mocha" | "catppuccin_mocha" | "catppuccin" => Some(Self::catppuccin_mocha()),
            "nord" => Some(Self::nord()),
            "gruvbox" | "gruvbox-dark" | "gruvbox_dark" => Some(Self::gruvbox()),
            _ => None,
        }
    }

    /// Color of a shortcut key glyph
    pub fn shortcut(&self, tone: ShortcutTone) -> Color {
        match tone {
            ShortcutTone::Dimmed => self.disabled,
            ShortcutTone::Reserved => self.reserved_key,
            ShortcutTone::Normal => self.foreground,
        }
    }

    /// Footer color for a navigation mode
    pub fn navigation(&self, mode: NavigationMode) -> Color {
        match mode {
            NavigationMode::Item => self.dimmed,
            NavigationMode::Category => self.category_mode,
        }
    }

    /// Convert to 256-color approximation for limited terminals
    pub fn to_256_color(&self) -> Self {
        Self {
            background: approximate_256(self.background),
            foreground: approximate_256(self.foreground),
            selection_bg: approximate_256(self.selection_bg),
            selection_fg: approximate_256(self.selection_fg),
            accent: approximate_256(self.accent),
            dimmed: approximate_256(self.dimmed),
            disabled: approximate_256(self.disabled),
            header: approximate_256(self.header),
            denial: approximate_256(self.denial),
            reserved_key: approximate_256(self.reserved_key),
            marked: approximate_256(self.marked),
            category_mode: approximate_256(self.category_mode),
            notice: approximate_256(self.notice),
        }
    }
}

/// Parse hex color string to Color
/// Supports: #rrggbb, #rgb, rrggbb, rgb
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim().trim_start_matches('#');

    let channel = |range: std::ops::Range<usize>| {
        s.get(range)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .ok_or(ColorError::InvalidHex)
    };

    match s.len() {
        // #rgb -> #rrggbb
        3 => Ok(Color::Rgb(channel(0..1)? * 17, channel(1..2)? * 17, channel(2..3)? * 17)),
        // #rrggbb, or #rrggbbaa with alpha ignored
        6 | 8 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        _ => Err(ColorError::InvalidLength),
    }
}

/// Parse either a hex color or a color name
pub fn parse_color(s: &str) -> Result<Color, ColorError> {
    match parse_hex_color(s) {
        Ok(color) => Ok(color),
        Err(err) => super::text::parse_color_name(s).ok_or(err),
    }
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("invalid color length (expected 3, 6, or 8 hex chars)")]
    InvalidLength,
    #[error("invalid hex character")]
    InvalidHex,
}

/// Approximate RGB color to nearest 256-color palette entry
fn approximate_256(color: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            // 6x6x6 color cube starts at index 16
            let r_idx = if r < 48 { 0 } else { (r - 35) / 40 };
            let g_idx = if g < 48 { 0 } else { (g - 35) / 40 };
            let b_idx = if b < 48 { 0 } else { (b - 35) / 40 };
            Color::Indexed(16 + 36 * r_idx + 6 * g_idx + b_idx)
        }
        c => c,
    }
}

/// Serde adapter for colors written as hex codes or names
pub mod serde_color {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_color(&s).map_err(serde::de::Error::custom)
    }

    pub fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match color {
            Color::Rgb(r, g, b) => serializer.serialize_str(&format!("#{r:02x}{g:02x}{b:02x}")),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}
