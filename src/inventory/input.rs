//! Abstract input for the selector
//!
//! Terminal keys are mapped onto [`Action`]s by the UI layer; the selector
//! only ever sees an [`InputEvent`]: the named action (if any) plus the raw
//! character, which may double as an item shortcut.

use serde::{Deserialize, Serialize};

/// Named selector actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Next item
    Down,
    /// Previous item
    Up,
    /// Next column, or mark the selected rows in multi-select drivers
    Right,
    /// Previous column
    Left,
    /// Page down
    NextPage,
    /// Page up
    PrevPage,
    Home,
    End,
    /// Switch between item and category navigation
    CategorySelection,
    /// Confirm the selection
    Confirm,
    /// Cancel
    Quit,
    /// The screen changed size
    Resize,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::Down,
        Action::Up,
        Action::Right,
        Action::Left,
        Action::NextPage,
        Action::PrevPage,
        Action::Home,
        Action::End,
        Action::CategorySelection,
        Action::Confirm,
        Action::Quit,
    ];

    /// Help text shown next to the key
    pub fn description(&self) -> &'static str {
        match self {
            Action::Down => "Next item",
            Action::Up => "Previous item",
            Action::Right => "Next column",
            Action::Left => "Previous column",
            Action::NextPage => "Page down",
            Action::PrevPage => "Page up",
            Action::Home => "Home",
            Action::End => "End",
            Action::CategorySelection => "Switch selection mode",
            Action::Confirm => "Confirm your selection",
            Action::Quit => "Cancel",
            Action::Resize => "Resize",
        }
    }
}

/// One input event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputEvent {
    pub action: Option<Action>,
    /// The typed character, if the key was a character
    pub ch: Option<char>,
}

impl InputEvent {
    pub fn action(action: Action) -> Self {
        Self {
            action: Some(action),
            ch: None,
        }
    }

    pub fn key(ch: char) -> Self {
        Self {
            action: None,
            ch: Some(ch),
        }
    }

    /// The decimal digit typed, if any
    pub fn digit(&self) -> Option<u32> {
        self.ch.and_then(|c| c.to_digit(10))
    }
}

/// Cursor movement policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavigationMode {
    /// Row-granular movement
    #[default]
    Item,
    /// Block-granular movement over rows sharing a category
    Category,
}

impl NavigationMode {
    /// The only transition: ITEM <-> CATEGORY
    pub fn next(self) -> Self {
        match self {
            NavigationMode::Item => NavigationMode::Category,
            NavigationMode::Category => NavigationMode::Item,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NavigationMode::Item => "Item selection mode",
            NavigationMode::Category => "Category selection mode",
        }
    }
}

/// Direction of cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    pub fn is_forward(self) -> bool {
        self == ScrollDirection::Forward
    }
}
