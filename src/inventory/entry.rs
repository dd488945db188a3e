//! Column rows
//!
//! A row is either a selectable item, a category header or a blank stub
//! that keeps a header from ending a page.

use std::collections::HashSet;

use super::store::{CategoryId, ItemHandle};
use crate::catalog::ItemRecord;

/// Per-row override of the shortcut key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Shortcut {
    /// Use the key the item carries
    #[default]
    Inherit,
    /// Use this key instead
    Key(char),
    /// Show no key at all
    Suppressed,
}

/// How a shortcut key should be highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutTone {
    /// The row cannot be chosen
    Dimmed,
    /// The key is one the user reserved for something else
    Reserved,
    Normal,
}

/// A selectable item row
#[derive(Debug, Clone)]
pub struct ItemEntry {
    pub item: ItemHandle,
    pub stack_size: usize,
    pub category: CategoryId,
    pub shortcut: Shortcut,
    pub chosen_count: usize,
    enabled: bool,
}

impl ItemEntry {
    pub fn new(item: ItemHandle, stack_size: usize, category: CategoryId, enabled: bool) -> Self {
        Self {
            item,
            stack_size: stack_size.max(1),
            category,
            shortcut: Shortcut::Inherit,
            chosen_count: 0,
            enabled,
        }
    }

    /// Same row filed under another category
    pub fn recategorized(&self, category: CategoryId) -> Self {
        Self {
            category,
            ..self.clone()
        }
    }

    pub fn is_selectable(&self) -> bool {
        self.enabled
    }

    /// How many units can be chosen: the stack size, or the charges of a
    /// single charge-divided item
    pub fn available_count(&self, record: &ItemRecord) -> usize {
        match record.charges {
            Some(charges) if self.stack_size == 1 => charges,
            _ => self.stack_size,
        }
    }

    pub fn shortcut_key(&self, record: &ItemRecord) -> Option<char> {
        match self.shortcut {
            Shortcut::Inherit => record.invlet,
            Shortcut::Key(key) => Some(key),
            Shortcut::Suppressed => None,
        }
    }

    pub fn shortcut_tone(&self, record: &ItemRecord, reserved: &HashSet<char>) -> ShortcutTone {
        if !self.is_selectable() {
            ShortcutTone::Dimmed
        } else if self.shortcut_key(record).is_some_and(|key| reserved.contains(&key)) {
            ShortcutTone::Reserved
        } else {
            ShortcutTone::Normal
        }
    }
}

/// Rows are the same when they share the item and the category
impl PartialEq for ItemEntry {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item && self.category == other.category
    }
}

/// One row of a column
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Item(ItemEntry),
    Header(CategoryId),
    Blank,
}

impl Entry {
    pub fn is_item(&self) -> bool {
        matches!(self, Entry::Item(_))
    }

    pub fn is_header(&self) -> bool {
        matches!(self, Entry::Header(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Entry::Blank)
    }

    /// Only enabled items can carry the cursor
    pub fn is_selectable(&self) -> bool {
        match self {
            Entry::Item(item) => item.is_selectable(),
            _ => false,
        }
    }

    pub fn category(&self) -> Option<CategoryId> {
        match self {
            Entry::Item(item) => Some(item.category),
            Entry::Header(category) => Some(*category),
            Entry::Blank => None,
        }
    }

    pub fn as_item(&self) -> Option<&ItemEntry> {
        match self {
            Entry::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_item_mut(&mut self) -> Option<&mut ItemEntry> {
        match self {
            Entry::Item(item) => Some(item),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::category::Category;
    use crate::inventory::store::Store;

    fn setup() -> (Store, CategoryId, CategoryId) {
        let mut store = Store::new();
        let tools = store.intern_category(Category::new("TOOLS", "TOOLS", 0));
        let ammo = store.intern_category(Category::new("AMMO", "AMMO", 1));
        (store, tools, ammo)
    }

    #[test]
    fn test_available_count() {
        let (mut store, tools, ammo) = setup();
        let hammers = store.insert_item(ItemRecord::new("hammer", "TOOLS"));
        let bullets = store.insert_item(ItemRecord::new("9mm", "AMMO").with_charges(30));

        let stack = ItemEntry::new(hammers, 4, tools, true);
        assert_eq!(stack.available_count(store.item(hammers)), 4);

        let single = ItemEntry::new(bullets, 1, ammo, true);
        assert_eq!(single.available_count(store.item(bullets)), 30);

        // A stack of charge-divided items counts items, not charges
        let several = ItemEntry::new(bullets, 2, ammo, true);
        assert_eq!(several.available_count(store.item(bullets)), 2);
    }

    #[test]
    fn test_shortcut_key() {
        let (mut store, tools, _) = setup();
        let h = store.insert_item(ItemRecord::new("hammer", "TOOLS").with_invlet('a'));
        let mut entry = ItemEntry::new(h, 1, tools, true);
        assert_eq!(entry.shortcut_key(store.item(h)), Some('a'));

        entry.shortcut = Shortcut::Key('3');
        assert_eq!(entry.shortcut_key(store.item(h)), Some('3'));

        entry.shortcut = Shortcut::Suppressed;
        assert_eq!(entry.shortcut_key(store.item(h)), None);
    }

    #[test]
    fn test_shortcut_tone() {
        let (mut store, tools, _) = setup();
        let h = store.insert_item(ItemRecord::new("hammer", "TOOLS").with_invlet('a'));
        let reserved: HashSet<char> = ['a'].into_iter().collect();

        let enabled = ItemEntry::new(h, 1, tools, true);
        assert_eq!(enabled.shortcut_tone(store.item(h), &reserved), ShortcutTone::Reserved);
        assert_eq!(enabled.shortcut_tone(store.item(h), &HashSet::new()), ShortcutTone::Normal);

        let disabled = ItemEntry::new(h, 1, tools, false);
        assert_eq!(disabled.shortcut_tone(store.item(h), &reserved), ShortcutTone::Dimmed);
    }

    #[test]
    fn test_equality() {
        let (mut store, tools, ammo) = setup();
        let h = store.insert_item(ItemRecord::new("hammer", "TOOLS"));
        let mut a = ItemEntry::new(h, 1, tools, true);
        let b = ItemEntry::new(h, 3, tools, false);
        a.chosen_count = 2;
        assert_eq!(a, b);
        assert_ne!(a, a.recategorized(ammo));

        assert_eq!(Entry::Header(tools), Entry::Header(tools));
        assert_ne!(Entry::Header(tools), Entry::Header(ammo));
        assert_eq!(Entry::Blank, Entry::Blank);
        assert_ne!(Entry::Item(a), Entry::Header(tools));
    }

    #[test]
    fn test_only_items_are_selectable() {
        let (mut store, tools, _) = setup();
        let h = store.insert_item(ItemRecord::new("hammer", "TOOLS"));
        assert!(Entry::Item(ItemEntry::new(h, 1, tools, true)).is_selectable());
        assert!(!Entry::Item(ItemEntry::new(h, 1, tools, false)).is_selectable());
        assert!(!Entry::Header(tools).is_selectable());
        assert!(!Entry::Blank.is_selectable());
    }
}
