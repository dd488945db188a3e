//! Crossterm key events to selector input
//!
//! Key names come from the `[keys]` config section; see
//! [`KeysConfig`](crate::config::KeysConfig) for the accepted names.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;

use crate::config::KeysConfig;
use crate::inventory::input::{Action, InputEvent};

/// A key as it can be bound in the config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    code: KeyCode,
    ctrl: bool,
}

impl KeySpec {
    fn from_event(key: &KeyEvent) -> Self {
        Self {
            code: key.code,
            ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        }
    }
}

/// Parse a key name such as `pagedown`, `ctrl-c` or `>`
pub fn parse_key(name: &str) -> Option<KeySpec> {
    let (ctrl, base) = match name.strip_prefix("ctrl-") {
        Some(rest) if !rest.is_empty() => (true, rest),
        _ => (false, name),
    };

    let code = match base.to_lowercase().as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        _ => {
            let mut chars = base.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };

    Some(KeySpec { code, ctrl })
}

/// Key bindings of every action
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<KeySpec, Action>,
}

impl Keymap {
    pub fn new(keys: &KeysConfig) -> Self {
        let mut bindings = HashMap::new();
        for action in Action::ALL {
            for name in keys.bindings(action) {
                match parse_key(name) {
                    Some(spec) => {
                        if let Some(previous) = bindings.insert(spec, action) {
                            tracing::warn!(
                                "Key '{}' bound to both {:?} and {:?}",
                                name,
                                previous,
                                action
                            );
                        }
                    }
                    None => tracing::warn!("Unknown key name '{}' for {:?}", name, action),
                }
            }
        }
        Self { bindings }
    }

    pub fn action(&self, key: &KeyEvent) -> Option<Action> {
        self.bindings.get(&KeySpec::from_event(key)).copied()
    }

    /// Selector input for a key press; releases and unbound non-character
    /// keys give nothing
    pub fn translate(&self, key: &KeyEvent) -> Option<InputEvent> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let action = self.action(key);
        let ch = match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Some(c),
            _ => None,
        };
        if action.is_none() && ch.is_none() {
            return None;
        }
        Some(InputEvent { action, ch })
    }
}
