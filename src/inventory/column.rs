//! Paginated columns
//!
//! A column is an ordered list of rows grouped by category, cut into pages
//! of a fixed height. Every page starts with a category header (or continues
//! the category the previous page ended with), and a header never ends a
//! page: a blank row takes its slot and the header moves to the next page.
//!
//! Provides:
//! - Row insertion in category rank order, removal, wholesale moves
//! - Pagination with synthesized headers and blanks
//! - Cursor movement in item and category mode, page jumps, Home/End
//! - Width negotiation through [`CellLayout`]

use std::cmp::Ordering;
use std::rc::Rc;

use super::cell::CellLayout;
use super::entry::{Entry, ItemEntry, Shortcut};
use super::input::{Action, InputEvent, NavigationMode, ScrollDirection};
use super::preset::Preset;
use super::store::{CategoryId, ItemHandle, Store};
use crate::config::LayoutConfig;
use crate::ui::text::display_width;

/// What a column is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Regular,
    /// Mirrors chosen rows under a single pseudo-category
    Selection { category: CategoryId },
}

pub struct Column {
    preset: Rc<dyn Preset>,
    pub(super) entries: Vec<Entry>,
    layout: CellLayout,
    mode: NavigationMode,
    selected_index: usize,
    page_offset: usize,
    entries_per_page: usize,
    multiselect: bool,
    paging_valid: bool,
    visibility: bool,
    active: bool,
    pub(super) kind: ColumnKind,
    config: LayoutConfig,
    item_symbols: bool,
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("kind", &self.kind)
            .field("entries", &self.entries)
            .field("selected_index", &self.selected_index)
            .field("entries_per_page", &self.entries_per_page)
            .finish_non_exhaustive()
    }
}

impl Column {
    pub fn new(preset: Rc<dyn Preset>, config: LayoutConfig, item_symbols: bool) -> Self {
        let layout = CellLayout::new(preset.cells().len());
        Self {
            preset,
            entries: Vec::new(),
            layout,
            mode: NavigationMode::Item,
            selected_index: 0,
            page_offset: 0,
            entries_per_page: usize::MAX,
            multiselect: false,
            paging_valid: false,
            visibility: true,
            active: false,
            kind: ColumnKind::Regular,
            config,
            item_symbols,
        }
    }

    pub fn preset(&self) -> &dyn Preset {
        self.preset.as_ref()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn layout(&self) -> &CellLayout {
        &self.layout
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: NavigationMode) {
        self.mode = mode;
    }

    pub fn is_multiselect(&self) -> bool {
        self.multiselect
    }

    pub fn set_multiselect(&mut self, multiselect: bool) {
        self.multiselect = multiselect;
    }

    pub fn set_visibility(&mut self, visibility: bool) {
        self.visibility = visibility;
    }

    pub fn visible(&self) -> bool {
        !self.entries.is_empty() && self.visibility
    }

    /// Whether the cursor may enter this column
    pub fn activatable(&self) -> bool {
        let selectable = self.entries.iter().any(Entry::is_selectable);
        match self.kind {
            ColumnKind::Regular => selectable,
            ColumnKind::Selection { .. } => selectable && self.pages_count() > 1,
        }
    }

    /// Whether rows of this column can be chosen
    pub fn allows_selecting(&self) -> bool {
        matches!(self.kind, ColumnKind::Regular)
    }

    pub fn is_paging_valid(&self) -> bool {
        self.paging_valid
    }

    pub fn invalidate_paging(&mut self) {
        self.paging_valid = false;
    }

    // Geometry

    pub fn width(&self) -> usize {
        self.layout.width()
    }

    pub fn height(&self) -> usize {
        self.entries.len().min(self.entries_per_page)
    }

    pub fn entries_per_page(&self) -> usize {
        self.entries_per_page
    }

    pub fn set_height(&mut self, height: usize) {
        if self.entries_per_page == height {
            return;
        }
        if height == 0 {
            tracing::warn!("Unable to assign zero height");
            return;
        }
        self.entries_per_page = height;
        self.paging_valid = false;
    }

    /// Force the column to exactly `width` cells
    pub fn set_width(&mut self, width: usize, store: &Store) {
        self.reset_width(store);
        self.layout.fit(width, &self.config);
    }

    /// Re-measure every row from scratch
    pub fn reset_width(&mut self, store: &Store) {
        self.layout.clear();
        let entries = std::mem::take(&mut self.entries);
        for entry in &entries {
            self.expand_to_fit(entry, store);
        }
        self.entries = entries;
    }

    /// Widen cells so that `entry` fits
    pub fn expand_to_fit(&mut self, entry: &Entry, store: &Store) {
        if entry.is_blank() {
            return;
        }
        let denial = self.entry_denial(entry, store);
        let count = if denial.is_empty() {
            self.layout.len()
        } else {
            1
        };

        for index in 0..count {
            let width = self.entry_cell_width(entry, index, store);
            let reveal = entry.is_item() && !self.preset.is_stub_cell(entry, index, store);
            self.layout.grow(index, width, reveal, &self.config);
        }

        if !denial.is_empty() {
            self.layout.reserve(
                self.entry_cell_width(entry, 0, store)
                    + self.config.min_denial_gap
                    + display_width(&denial),
            );
        }
    }

    /// Cells reserved in front of the caption
    pub fn entry_indent(&self, entry: &Entry) -> usize {
        if !entry.is_item() {
            return 0;
        }
        let mut indent = 2;
        if self.item_symbols {
            indent += 2;
        }
        if self.allows_selecting() && self.multiselect {
            indent += 2;
        }
        indent
    }

    pub fn shows_item_symbols(&self) -> bool {
        self.item_symbols
    }

    /// Width of a cell's text, the caption counting its indentation
    pub fn entry_cell_width(&self, entry: &Entry, index: usize, store: &Store) -> usize {
        let width = self.preset.cell_width(entry, index, store);
        if index == 0 {
            width + self.entry_indent(entry)
        } else {
            width
        }
    }

    /// Why the row can't be chosen, empty when it can
    pub fn entry_denial(&self, entry: &Entry, store: &Store) -> String {
        match entry {
            Entry::Item(item) => self.preset.denial(store.item(item.item)),
            _ => String::new(),
        }
    }

    // Membership

    /// Insert a row after the last one of the same or a lower ranked category
    pub fn add_entry(&mut self, entry: ItemEntry, store: &Store) {
        if self.position_of(&entry).is_some() {
            tracing::warn!("Tried to add a duplicate entry");
            return;
        }
        let rank = store.sort_rank(entry.category);
        let position = self
            .entries
            .iter()
            .rposition(|cur| match cur.category() {
                Some(category) => category == entry.category || store.sort_rank(category) <= rank,
                None => false,
            })
            .map_or(0, |i| i + 1);

        let entry = Entry::Item(entry);
        self.expand_to_fit(&entry, store);
        self.entries.insert(position, entry);
        self.paging_valid = false;
    }

    pub fn remove_entry(&mut self, entry: &ItemEntry) {
        match self.position_of(entry) {
            Some(index) => {
                self.entries.remove(index);
                self.paging_valid = false;
            }
            None => tracing::warn!("Tried to remove a non-existing entry"),
        }
    }

    /// Index of the row equal to `entry`
    pub fn position_of(&self, entry: &ItemEntry) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.as_item().is_some_and(|item| item == entry))
    }

    /// Remove every item row, leaving the column cleared
    pub fn take_items(&mut self, store: &Store) -> Vec<ItemEntry> {
        let items = std::mem::take(&mut self.entries)
            .into_iter()
            .filter_map(|e| match e {
                Entry::Item(item) => Some(item),
                _ => None,
            })
            .collect();
        self.clear(store);
        items
    }

    pub fn clear(&mut self, store: &Store) {
        self.entries.clear();
        self.paging_valid = false;
        self.prepare_paging(store);
    }

    /// The row showing `item`, if this column has one
    pub fn find_item_mut(&mut self, item: ItemHandle) -> Option<&mut ItemEntry> {
        self.entries
            .iter_mut()
            .filter_map(Entry::as_item_mut)
            .find(|e| e.item == item)
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut ItemEntry> {
        self.entries.get_mut(index).and_then(Entry::as_item_mut)
    }

    // Pagination

    /// Rebuild headers and blanks for the current page height
    pub fn prepare_paging(&mut self, store: &Store) {
        if self.paging_valid {
            return;
        }

        self.entries.retain(Entry::is_item);

        let preset = &self.preset;
        let mut from = 0;
        while from < self.entries.len() {
            let category = self.entries[from].category();
            let to = from
                + self.entries[from..]
                    .iter()
                    .take_while(|e| e.category() == category)
                    .count();
            self.entries[from..to].sort_by(|lhs, rhs| compare_rows(preset.as_ref(), lhs, rhs, store));
            from = to;
        }

        let per_page = self.entries_per_page;
        if per_page >= 2 {
            let mut current: Option<CategoryId> = None;
            let mut index = 0;
            while index < self.entries.len() {
                let category = self.entries[index].category();
                if category == current && index % per_page != 0 {
                    index += 1;
                    continue;
                }
                current = category;
                let insertion = match category {
                    Some(category) if index % per_page != per_page - 1 => Entry::Header(category),
                    _ => Entry::Blank,
                };
                self.expand_to_fit(&insertion, store);
                self.entries.insert(index, insertion);
                index += 1;
            }
        }

        if let ColumnKind::Selection { category } = self.kind {
            self.keep_placeholder(category, store);
        }

        self.paging_valid = true;
        self.select(0, ScrollDirection::Forward);
    }

    pub fn page_of(&self, index: usize) -> usize {
        index / self.entries_per_page
    }

    pub fn page_index(&self) -> usize {
        self.page_of(self.page_offset)
    }

    pub fn page_offset(&self) -> usize {
        self.page_offset
    }

    pub fn pages_count(&self) -> usize {
        self.entries.len().div_ceil(self.entries_per_page)
    }

    /// Rows of the current page with their indices
    pub fn page_entries(&self) -> impl Iterator<Item = (usize, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .skip(self.page_offset)
            .take(self.entries_per_page)
    }

    // Navigation

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// The item under the cursor
    pub fn selected(&self) -> Option<&ItemEntry> {
        self.entries.get(self.selected_index).and_then(Entry::as_item)
    }

    pub fn select(&mut self, index: usize, direction: ScrollDirection) {
        if index >= self.entries.len() {
            return;
        }
        let index = if self.entries[index].is_selectable() {
            index
        } else {
            self.next_selectable(index, direction)
        };
        self.selected_index = index;
        self.page_offset = index - index % self.entries_per_page;
    }

    /// Next selectable row after `index`, wrapping around; `index` itself
    /// when nothing else is selectable
    pub fn next_selectable(&self, index: usize, direction: ScrollDirection) -> usize {
        let len = self.entries.len();
        if len == 0 {
            return index;
        }
        let mut next = index;
        loop {
            next = match direction {
                ScrollDirection::Forward => (next + 1) % len,
                ScrollDirection::Backward => (next + len - 1) % len,
            };
            if next == index || self.entries.get(next).is_some_and(Entry::is_selectable) {
                return next;
            }
        }
    }

    /// One row in item mode, one category block in category mode
    pub fn move_selection(&mut self, direction: ScrollDirection) {
        let mut index = self.selected_index;
        loop {
            index = self.next_selectable(index, direction);
            if index == self.selected_index || !self.is_selected_by_category(index) {
                break;
            }
        }
        self.select(index, direction);
    }

    /// To the edge of the page, or over it when already there
    pub fn move_selection_page(&mut self, direction: ScrollDirection) {
        let page = self.page_index();
        let mut index = self.selected_index;
        loop {
            let next = self.next_selectable(index, direction);
            let flipped = next == self.selected_index
                || (next > self.selected_index) != direction.is_forward();
            if flipped && self.page_of(next) == page {
                break;
            }
            index = next;
            if self.page_of(self.next_selectable(index, direction)) != page {
                break;
            }
        }
        self.select(index, direction);
    }

    pub fn on_input(&mut self, input: &InputEvent) {
        if self.is_empty() || !self.active {
            return;
        }
        match input.action {
            Some(Action::Down) => self.move_selection(ScrollDirection::Forward),
            Some(Action::Up) => self.move_selection(ScrollDirection::Backward),
            Some(Action::NextPage) => self.move_selection_page(ScrollDirection::Forward),
            Some(Action::PrevPage) => self.move_selection_page(ScrollDirection::Backward),
            Some(Action::Home) => self.select(0, ScrollDirection::Forward),
            Some(Action::End) => self.select(self.entries.len() - 1, ScrollDirection::Backward),
            _ => {}
        }
    }

    /// Highlighted: under the cursor, or in its category block when
    /// several rows can be selected at once
    pub fn is_selected(&self, index: usize) -> bool {
        (index == self.selected_index && self.selected().is_some())
            || (self.multiselect && self.is_selected_by_category(index))
    }

    /// Part of the cursor's category block on the current page
    pub fn is_selected_by_category(&self, index: usize) -> bool {
        let Some(entry) = self.entries.get(index) else {
            return false;
        };
        entry.is_item()
            && self.mode == NavigationMode::Category
            && self.selected().map(|s| s.category) == entry.category()
            && self.page_of(index) == self.page_index()
    }

    /// Indices of every highlighted row
    pub fn all_selected(&self) -> Vec<usize> {
        if !self.allows_selecting() {
            return Vec::new();
        }
        (0..self.entries.len())
            .filter(|&i| self.is_selected(i))
            .collect()
    }

    // Shortcuts

    pub fn find_by_key(&self, key: char, store: &Store) -> Option<usize> {
        self.entries.iter().position(|e| {
            e.as_item()
                .is_some_and(|item| item.shortcut_key(store.item(item.item)) == Some(key))
        })
    }

    /// Give sequential keys to selectable items the user doesn't carry
    ///
    /// Returns the next unused key code; once past `last`, rows lose their
    /// key instead.
    pub fn reassign_shortcuts(&mut self, store: &Store, mut next: u32, last: u32) -> u32 {
        for item in self.entries.iter_mut().filter_map(Entry::as_item_mut) {
            if !item.is_selectable() || store.item(item.item).location.is_possessed() {
                continue;
            }
            item.shortcut = match char::from_u32(next).filter(|_| next <= last) {
                Some(key) => {
                    next += 1;
                    Shortcut::Key(key)
                }
                None => Shortcut::Suppressed,
            };
        }
        next
    }
}

/// Disabled rows go last, the rest follow the preset order
fn compare_rows(preset: &dyn Preset, lhs: &Entry, rhs: &Entry, store: &Store) -> Ordering {
    match (lhs.as_item(), rhs.as_item()) {
        (Some(l), Some(r)) => r
            .is_selectable()
            .cmp(&l.is_selectable())
            .then_with(|| preset.sort_compare(store.item(l.item), store.item(r.item))),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::{ItemRecord, Location};
    use crate::inventory::category::{Category, Offset};
    use crate::inventory::preset::DefaultPreset;

    pub(crate) fn column() -> Column {
        Column::new(Rc::new(DefaultPreset::new()), LayoutConfig::default(), false)
    }

    /// Items named by `spec`: one (name, category rank) pair per row
    fn filled(spec: &[(&str, i32)], page: usize) -> (Store, Column) {
        let mut store = Store::new();
        let mut col = column();
        for (name, rank) in spec {
            let id = format!("cat{rank}");
            let category = store.intern_category(Category::new(&id, &id, *rank));
            let item = store.insert_item(ItemRecord::new(*name, id));
            col.add_entry(ItemEntry::new(item, 1, category, true), &store);
        }
        col.set_height(page);
        col.prepare_paging(&store);
        (store, col)
    }

    fn describe(col: &Column, store: &Store) -> Vec<String> {
        col.entries()
            .iter()
            .map(|e| match e {
                Entry::Item(item) => store.item(item.item).name.clone(),
                Entry::Header(c) => format!("[{}]", store.category(*c).name),
                Entry::Blank => "_".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_paging_scenario() {
        let (store, col) = filled(&[("A", 1), ("B", 1), ("C", 2), ("D", 2), ("E", 2)], 3);
        assert_eq!(
            describe(&col, &store),
            ["[cat1]", "A", "B", "[cat2]", "C", "D", "[cat2]", "E"]
        );
        assert_eq!(col.pages_count(), 3);
    }

    #[test]
    fn test_header_deferred_past_last_slot() {
        let (store, col) = filled(&[("A", 1), ("B", 2), ("C", 2)], 3);
        // cat2 would start in the last slot of page 1
        assert_eq!(describe(&col, &store), ["[cat1]", "A", "_", "[cat2]", "B", "C"]);
    }

    #[test]
    fn test_no_orphan_headers() {
        let sequences: [&[i32]; 5] = [
            &[1, 1, 1, 1, 1, 1, 1],
            &[1, 2, 3, 4, 5, 6],
            &[1, 2, 2, 3, 3, 3, 4],
            &[1, 1, 2, 3, 3, 4, 4, 4, 5],
            &[5, 1, 3, 1, 5, 2],
        ];
        for ranks in sequences {
            let names: Vec<String> = (0..ranks.len()).map(|i| format!("item{i}")).collect();
            let spec: Vec<(&str, i32)> = names
                .iter()
                .map(String::as_str)
                .zip(ranks.iter().copied())
                .collect();
            for page in 2..=6 {
                let (store, col) = filled(&spec, page);
                for (i, entry) in col.entries().iter().enumerate() {
                    if i % page == page - 1 {
                        assert!(!entry.is_header(), "{ranks:?} page {page}: {:?}", describe(&col, &store));
                    }
                    if i % page == 0 {
                        assert!(!entry.is_blank());
                    }
                }
                let items = col.entries().iter().filter(|e| e.is_item()).count();
                assert_eq!(items, ranks.len());
            }
        }
    }

    #[test]
    fn test_add_entry_orders_by_rank() {
        let (store, col) = filled(&[("low", 1), ("high", 9), ("mid", 5), ("low2", 1)], 100);
        assert_eq!(
            describe(&col, &store),
            ["[cat1]", "low", "low2", "[cat5]", "mid", "[cat9]", "high"]
        );
    }

    #[test]
    fn test_sort_within_category() {
        let mut store = Store::new();
        let mut col = column();
        let cat = store.intern_category(Category::new("c", "c", 0));
        for (name, enabled) in [("b", true), ("z", false), ("a", true)] {
            let item = store.insert_item(ItemRecord::new(name, "c"));
            col.add_entry(ItemEntry::new(item, 1, cat, enabled), &store);
        }
        col.prepare_paging(&store);
        assert_eq!(describe(&col, &store), ["[c]", "a", "b", "z"]);
        assert_eq!(col.selected_index(), 1);
    }

    #[test]
    fn test_duplicate_and_missing_entries() {
        let (mut store, mut col) = filled(&[("A", 1)], 10);
        let entry = col.entries()[1].as_item().cloned().unwrap();
        col.add_entry(entry.clone(), &store);
        assert_eq!(col.entries().len(), 2);

        col.remove_entry(&entry);
        col.remove_entry(&entry);
        assert_eq!(col.entries().len(), 1);

        let other = store.insert_item(ItemRecord::new("x", "cat1"));
        col.remove_entry(&ItemEntry::new(other, 1, entry.category, true));
        assert!(!col.is_paging_valid());
    }

    #[test]
    fn test_zero_height_ignored() {
        let (_, mut col) = filled(&[("A", 1)], 4);
        col.set_height(0);
        assert_eq!(col.entries_per_page(), 4);
        assert!(col.is_paging_valid());
    }

    #[test]
    fn test_next_selectable_terminates() {
        let mut store = Store::new();
        let mut col = column();
        let cat = store.intern_category(Category::new("c", "c", 0));
        for (name, enabled) in [("a", false), ("b", true), ("c", false)] {
            let item = store.insert_item(ItemRecord::new(name, "c"));
            col.add_entry(ItemEntry::new(item, 1, cat, enabled), &store);
        }
        col.prepare_paging(&store);
        for start in 0..col.entries().len() {
            for direction in [ScrollDirection::Forward, ScrollDirection::Backward] {
                let next = col.next_selectable(start, direction);
                assert!(col.entries()[next].is_selectable());
            }
        }

        let empty = column();
        assert_eq!(empty.next_selectable(3, ScrollDirection::Forward), 3);
    }

    #[test]
    fn test_item_mode_wraps() {
        let (store, mut col) = filled(&[("A", 1), ("B", 1), ("C", 2)], 10);
        col.set_active(true);
        assert_eq!(col.selected().map(|e| store.item(e.item).name.as_str()), Some("A"));
        col.move_selection(ScrollDirection::Forward);
        col.move_selection(ScrollDirection::Forward);
        assert_eq!(col.selected().map(|e| store.item(e.item).name.as_str()), Some("C"));
        col.move_selection(ScrollDirection::Forward);
        assert_eq!(col.selected().map(|e| store.item(e.item).name.as_str()), Some("A"));
        col.move_selection(ScrollDirection::Backward);
        assert_eq!(col.selected().map(|e| store.item(e.item).name.as_str()), Some("C"));
    }

    #[test]
    fn test_category_mode_skips_block() {
        let (store, mut col) = filled(&[("A", 1), ("B", 1), ("C", 2), ("D", 2), ("E", 3)], 20);
        col.set_mode(NavigationMode::Category);
        let start = col.selected().map(|e| e.category);

        col.move_selection(ScrollDirection::Forward);
        let landed = col.selected().map(|e| e.category);
        assert_ne!(landed, start);
        assert_eq!(col.selected().map(|e| store.item(e.item).name.as_str()), Some("C"));

        col.move_selection(ScrollDirection::Forward);
        col.move_selection(ScrollDirection::Forward);
        assert_eq!(col.selected().map(|e| e.category), start);
    }

    #[test]
    fn test_category_mode_single_category_stays() {
        let (_, mut col) = filled(&[("A", 1), ("B", 1)], 10);
        col.set_mode(NavigationMode::Category);
        let start = col.selected_index();
        col.move_selection(ScrollDirection::Forward);
        assert_eq!(col.selected_index(), start);
    }

    #[test]
    fn test_multiselect_category_block() {
        let (_, mut col) = filled(&[("A", 1), ("B", 1), ("C", 2)], 10);
        col.set_multiselect(true);
        assert_eq!(col.all_selected(), vec![1]);
        col.set_mode(NavigationMode::Category);
        assert_eq!(col.all_selected(), vec![1, 2]);
    }

    #[test]
    fn test_page_jumps() {
        let spec: Vec<(String, i32)> = (0..10).map(|i| (format!("i{i}"), 1)).collect();
        let spec: Vec<(&str, i32)> = spec.iter().map(|(n, r)| (n.as_str(), *r)).collect();
        let (_, mut col) = filled(&spec, 4);
        // [h i0 i1 i2] [h i3 i4 i5] [h i6 i7 i8] [h i9]
        assert_eq!(col.selected_index(), 1);

        col.move_selection_page(ScrollDirection::Forward);
        assert_eq!(col.selected_index(), 3);
        assert_eq!(col.page_index(), 0);

        col.move_selection_page(ScrollDirection::Forward);
        assert_eq!(col.selected_index(), 5);
        assert_eq!(col.page_index(), 1);

        col.move_selection_page(ScrollDirection::Backward);
        assert_eq!(col.page_index(), 0);
        assert_eq!(col.selected_index(), 3);
    }

    #[test]
    fn test_home_end_need_active_column() {
        let (_, mut col) = filled(&[("A", 1), ("B", 1), ("C", 1)], 10);
        col.on_input(&InputEvent::action(Action::End));
        assert_eq!(col.selected_index(), 1);

        col.set_active(true);
        col.on_input(&InputEvent::action(Action::End));
        assert_eq!(col.selected_index(), 3);
        col.on_input(&InputEvent::action(Action::Home));
        assert_eq!(col.selected_index(), 1);
    }

    #[test]
    fn test_denial_reserves_width() {
        let mut store = Store::new();
        let mut col = column();
        let cat = store.intern_category(Category::new("c", "c", 0));
        let item = store.insert_item(ItemRecord::new("rock", "c").with_denial("too heavy to lift"));
        col.add_entry(ItemEntry::new(item, 1, cat, false), &store);
        let config = LayoutConfig::default();
        assert_eq!(col.width(), 2 + 4 + config.min_denial_gap + 17);
    }

    #[test]
    fn test_set_width_is_exact() {
        let (store, mut col) = filled(&[("hammer", 1), ("nail", 1)], 10);
        col.set_width(30, &store);
        assert_eq!(col.width(), 30);
        col.set_width(8, &store);
        assert_eq!(col.width(), 8);
    }

    #[test]
    fn test_indent() {
        let mut store = Store::new();
        let cat = store.intern_category(Category::new("c", "c", 0));
        let item = store.insert_item(ItemRecord::new("a", "c"));
        let entry = Entry::Item(ItemEntry::new(item, 1, cat, true));

        let mut col = Column::new(Rc::new(DefaultPreset::new()), LayoutConfig::default(), true);
        assert_eq!(col.entry_indent(&entry), 4);
        col.set_multiselect(true);
        assert_eq!(col.entry_indent(&entry), 6);
        assert_eq!(col.entry_indent(&Entry::Header(cat)), 0);
    }

    #[test]
    fn test_reassign_shortcuts() {
        let mut store = Store::new();
        let mut col = column();
        let cat = store.intern_category(Category::new("c", "c", 0));
        let ground = Location::Ground {
            offset: Offset::new(1, 0),
            terrain: "dirt".into(),
        };
        let mut handles = Vec::new();
        for name in ["a", "b", "c"] {
            let item = store.insert_item(ItemRecord::new(name, "c").with_location(ground.clone()));
            col.add_entry(ItemEntry::new(item, 1, cat, true), &store);
            handles.push(item);
        }
        let carried = store.insert_item(ItemRecord::new("d", "c").with_invlet('q'));
        col.add_entry(ItemEntry::new(carried, 1, cat, true), &store);

        let next = col.reassign_shortcuts(&store, '1' as u32, '2' as u32);
        assert_eq!(next, '3' as u32);
        assert_eq!(col.find_by_key('1', &store), col.position_of(&ItemEntry::new(handles[0], 1, cat, true)));
        assert!(col.find_by_key('2', &store).is_some());
        assert!(col.find_by_key('3', &store).is_none());
        assert!(col.find_by_key('q', &store).is_some());
    }
}
