//! Review column for chosen rows
//!
//! The selection column never receives items directly. The selector tells it
//! about every change of a chosen count and it keeps a mirror row for each
//! item that is currently chosen, all filed under one pseudo-category.

use std::rc::Rc;

use super::column::{Column, ColumnKind};
use super::entry::{Entry, ItemEntry};
use super::input::ScrollDirection;
use super::preset::Preset;
use super::store::{CategoryId, Store};
use crate::config::LayoutConfig;

impl Column {
    /// Column mirroring chosen rows under `category`
    pub fn selection(
        preset: Rc<dyn Preset>,
        category: CategoryId,
        config: LayoutConfig,
        item_symbols: bool,
    ) -> Self {
        let mut column = Column::new(preset, config, item_symbols);
        column.kind = ColumnKind::Selection { category };
        column
    }

    pub fn is_selection(&self) -> bool {
        matches!(self.kind, ColumnKind::Selection { .. })
    }

    /// Track a changed chosen count; regular columns ignore this
    pub fn on_change(&mut self, entry: &ItemEntry, store: &Store) {
        let ColumnKind::Selection { category } = self.kind else {
            return;
        };
        let mirror = entry.recategorized(category);

        match self.position_of(&mirror) {
            Some(index) if mirror.chosen_count == 0 => {
                self.entries.remove(index);
                self.invalidate_paging();
            }
            Some(index) => {
                if let Some(row) = self.entry_mut(index) {
                    row.chosen_count = mirror.chosen_count;
                }
                self.expand_to_fit(&Entry::Item(mirror.clone()), store);
            }
            None if mirror.chosen_count == 0 => {}
            None => self.add_entry(mirror.clone(), store),
        }

        self.prepare_paging(store);

        match self.position_of(&mirror) {
            Some(index) => self.select(index, ScrollDirection::Forward),
            None => self.select(
                self.entries.len().saturating_sub(1),
                ScrollDirection::Backward,
            ),
        }
    }

    /// An empty selection column still shows its header
    pub(super) fn keep_placeholder(&mut self, category: CategoryId, store: &Store) {
        if self.entries.is_empty() {
            let header = Entry::Header(category);
            self.expand_to_fit(&header, store);
            self.entries.push(header);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemRecord;
    use crate::inventory::category::Category;
    use crate::inventory::preset::SelectionPreset;

    fn setup() -> (Store, Column, CategoryId) {
        let mut store = Store::new();
        let category = store.insert_category(Category::new("SELECTED", "ITEMS TO DROP", 0));
        let mut column = Column::selection(
            Rc::new(SelectionPreset::default()),
            category,
            LayoutConfig::default(),
            false,
        );
        column.prepare_paging(&store);
        (store, column, category)
    }

    #[test]
    fn test_placeholder_header() {
        let (store, mut column, category) = setup();
        assert_eq!(column.entries(), &[Entry::Header(category)]);
        assert!(!column.activatable());
        assert!(!column.allows_selecting());

        column.clear(&store);
        assert_eq!(column.entries().len(), 1);
    }

    #[test]
    fn test_mirrors_chosen_rows() {
        let (mut store, mut column, category) = setup();
        let tools = store.intern_category(Category::new("TOOLS", "TOOLS", 0));
        let nail = store.insert_item(ItemRecord::new("nail", "TOOLS"));
        let saw = store.insert_item(ItemRecord::new("saw", "TOOLS"));

        let mut entry = ItemEntry::new(nail, 5, tools, true);
        entry.chosen_count = 2;
        column.on_change(&entry, &store);
        assert_eq!(column.entries().len(), 2);
        let mirror = column.selected().cloned().unwrap();
        assert_eq!(mirror.category, category);
        assert_eq!(mirror.chosen_count, 2);

        entry.chosen_count = 4;
        column.on_change(&entry, &store);
        assert_eq!(column.entries().len(), 2);
        assert_eq!(column.selected().map(|e| e.chosen_count), Some(4));

        let mut other = ItemEntry::new(saw, 1, tools, true);
        other.chosen_count = 1;
        column.on_change(&other, &store);
        assert_eq!(column.selected().map(|e| e.item), Some(saw));

        entry.chosen_count = 0;
        column.on_change(&entry, &store);
        assert_eq!(column.entries().len(), 2);
        assert_eq!(column.selected().map(|e| e.item), Some(saw));

        other.chosen_count = 0;
        column.on_change(&other, &store);
        assert_eq!(column.entries(), &[Entry::Header(category)]);
    }

    #[test]
    fn test_regular_column_ignores_changes() {
        let mut store = Store::new();
        let tools = store.intern_category(Category::new("TOOLS", "TOOLS", 0));
        let nail = store.insert_item(ItemRecord::new("nail", "TOOLS"));
        let mut column = crate::inventory::column::tests::column();

        let mut entry = ItemEntry::new(nail, 1, tools, true);
        entry.chosen_count = 1;
        column.on_change(&entry, &store);
        assert!(column.is_empty());
    }
}
