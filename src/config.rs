use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::inventory::input::Action;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub appearance: AppearanceConfig,
    pub layout: LayoutConfig,
    pub behavior: BehaviorConfig,
    pub keys: KeysConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Theme preset: "darkwall", "catppuccin-mocha", "nord", "gruvbox"
    pub theme: String,
    /// Show the item glyph in front of every row
    pub item_symbols: bool,
    /// Fall back to the 256-colour palette
    pub limited_colors: bool,
}

/// Spacing tunables of the selector layout, in terminal cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// The window snaps to the screen edge when closer than this
    pub max_win_snap_distance: usize,
    pub min_cell_gap: usize,
    pub normal_cell_gap: usize,
    /// Space between a caption and its rejection text
    pub min_denial_gap: usize,
    pub min_column_gap: usize,
    pub normal_column_gap: usize,
    /// A lone column at least this full is stretched over the window
    pub min_ratio_to_center: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// How far away items on the ground and in vehicles are listed
    pub nearby_radius: i32,
    /// Keys reserved for something else; items using them are highlighted.
    /// Character keys bound under `[keys]` are always reserved as well.
    pub reserved_keys: Vec<char>,
    /// First key handed out to items the user doesn't carry
    pub shortcut_first: char,
    /// Last key handed out to items the user doesn't carry
    pub shortcut_last: char,
}

/// Key names bound to each action
///
/// Names are single characters or one of `up`, `down`, `left`, `right`,
/// `pageup`, `pagedown`, `home`, `end`, `enter`, `esc`, `tab`, `backtab`,
/// `space`, optionally prefixed with `ctrl-`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub down: Vec<String>,
    pub up: Vec<String>,
    pub right: Vec<String>,
    pub left: Vec<String>,
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
    pub home: Vec<String>,
    pub end: Vec<String>,
    pub category_selection: Vec<String>,
    pub confirm: Vec<String>,
    pub quit: Vec<String>,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: "darkwall".to_string(),
            item_symbols: false,
            limited_colors: false,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_win_snap_distance: 4,
            min_cell_gap: 2,
            normal_cell_gap: 4,
            min_denial_gap: 2,
            min_column_gap: 2,
            normal_column_gap: 8,
            min_ratio_to_center: 0.65,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            nearby_radius: 1,
            reserved_keys: Vec::new(),
            shortcut_first: '0',
            shortcut_last: '9',
        }
    }
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            down: keys(&["down", "j"]),
            up: keys(&["up", "k"]),
            right: keys(&["right", "l"]),
            left: keys(&["left", "h"]),
            next_page: keys(&["pagedown", ">"]),
            prev_page: keys(&["pageup", "<"]),
            home: keys(&["home"]),
            end: keys(&["end"]),
            category_selection: keys(&["tab"]),
            confirm: keys(&["enter"]),
            quit: keys(&["esc", "ctrl-c"]),
        }
    }
}

impl KeysConfig {
    /// Key names bound to `action`
    pub fn bindings(&self, action: Action) -> &[String] {
        match action {
            Action::Down => &self.down,
            Action::Up => &self.up,
            Action::Right => &self.right,
            Action::Left => &self.left,
            Action::NextPage => &self.next_page,
            Action::PrevPage => &self.prev_page,
            Action::Home => &self.home,
            Action::End => &self.end,
            Action::CategorySelection => &self.category_selection,
            Action::Confirm => &self.confirm,
            Action::Quit => &self.quit,
            Action::Resize => &[],
        }
    }

    /// Plain character keys bound to any action
    pub fn character_keys(&self) -> impl Iterator<Item = char> + '_ {
        Action::ALL.iter().flat_map(move |&action| {
            self.bindings(action).iter().filter_map(|name| {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(ch),
                    _ => None,
                }
            })
        })
    }

    /// Name of the first key bound to `action`, as shown in hints
    pub fn describe(&self, action: Action) -> String {
        self.bindings(action)
            .first()
            .map(|name| name.to_string())
            .unwrap_or_else(|| "<unbound>".to_string())
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/satchel/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("satchel")
            .join("config.toml")
    }

    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// The configured theme; unknown names fall back to the default one
    pub fn resolve_theme(&self) -> Theme {
        let theme = Theme::from_preset(&self.appearance.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme '{}', using default", self.appearance.theme);
            Theme::default()
        });
        if self.appearance.limited_colors {
            theme.to_256_color()
        } else {
            theme
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.layout.normal_cell_gap, 4);
        assert_eq!(config.layout.min_ratio_to_center, 0.65);
        assert_eq!(config.behavior.shortcut_first, '0');
        assert_eq!(config.keys.describe(Action::Confirm), "enter");
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str(
            r#"
[appearance]
theme = "nord"

[layout]
normal_column_gap = 3

[keys]
confirm = ["space", "enter"]
"#,
        )
        .unwrap();
        assert_eq!(config.appearance.theme, "nord");
        assert_eq!(config.layout.normal_column_gap, 3);
        assert_eq!(config.layout.min_cell_gap, 2);
        assert_eq!(config.keys.describe(Action::Confirm), "space");
        assert_eq!(config.keys.bindings(Action::Quit), &["esc", "ctrl-c"]);
    }

    #[test]
    fn test_character_keys() {
        let mut keys: Vec<char> = KeysConfig::default().character_keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, ['<', '>', 'h', 'j', 'k', 'l']);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load("/nonexistent/satchel/config.toml").unwrap();
        assert_eq!(config.behavior.nearby_radius, 1);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let mut config = Config::default();
        config.appearance.theme = "no-such-theme".to_string();
        assert_eq!(config.resolve_theme().background, Theme::default().background);
    }
}
