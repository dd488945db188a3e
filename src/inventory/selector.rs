//! Multi-column selector
//!
//! The selector owns every item and category it shows and spreads the rows
//! over up to four columns: carried items, items nearby, worn and wielded
//! gear, and (for multi-select drivers) a review column of chosen rows.
//!
//! Provides:
//! - Ingestion from a [`Catalog`], with stacking and naturalized categories
//! - Two-pass layout: columns first, then the window, then columns again
//! - Column consolidation when the window is too narrow
//! - Input routing, active column tracking, navigation mode
//! - Header, footer and carried weight/volume stats

use ratatui::layout::Rect;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

use super::category::Category;
use super::column::Column;
use super::entry::{Entry, ItemEntry};
use super::input::{Action, InputEvent, NavigationMode, ScrollDirection};
use super::preset::{Preset, SelectionPreset};
use super::store::{CategoryId, ItemHandle, Store};
use crate::catalog::{restack, Carrier, Catalog, ItemRecord, Location};
use crate::config::{Config, LayoutConfig};
use crate::ui::text::display_width;

pub const OWN_INV_COLUMN: usize = 0;
pub const MAP_COLUMN: usize = 1;
pub const OWN_GEAR_COLUMN: usize = 2;
pub const SELECTION_COLUMN: usize = 3;

/// Horizontal cells the window spends outside the columns
const NC_WIDTH: usize = 2;

/// Everything the selector takes from the user configuration
#[derive(Debug, Clone)]
pub struct SelectorSettings {
    pub layout: LayoutConfig,
    pub item_symbols: bool,
    pub reserved_keys: HashSet<char>,
    pub shortcut_first: char,
    pub shortcut_last: char,
    /// Key shown in hints for each action
    pub key_names: HashMap<Action, String>,
}

impl From<&Config> for SelectorSettings {
    fn from(config: &Config) -> Self {
        Self {
            layout: config.layout.clone(),
            item_symbols: config.appearance.item_symbols,
            reserved_keys: config
                .behavior
                .reserved_keys
                .iter()
                .copied()
                .chain(config.keys.character_keys())
                .collect(),
            shortcut_first: config.behavior.shortcut_first,
            shortcut_last: config.behavior.shortcut_last,
            key_names: Action::ALL
                .iter()
                .map(|&action| (action, config.keys.describe(action)))
                .collect(),
        }
    }
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl SelectorSettings {
    pub fn key_name(&self, action: Action) -> &str {
        self.key_names
            .get(&action)
            .map(String::as_str)
            .unwrap_or("<unbound>")
    }
}

pub struct Selector {
    store: Store,
    preset: Rc<dyn Preset>,
    columns: Vec<Column>,
    /// Stands in for out-of-range column lookups
    dummy: Column,
    active_column_index: usize,
    mode: NavigationMode,
    settings: SelectorSettings,
    title: String,
    hint: String,
    carrier: Option<Carrier>,
    /// Stats show the load left after chosen rows are gone
    preview_chosen: bool,
    notice: Option<String>,
    layout_valid: bool,
    screen: (usize, usize),
    area: Rect,
    border: usize,
}

impl Selector {
    pub fn new(preset: Rc<dyn Preset>, settings: SelectorSettings) -> Self {
        let column = || Column::new(Rc::clone(&preset), settings.layout.clone(), settings.item_symbols);
        let mut selector = Self {
            store: Store::new(),
            preset: Rc::clone(&preset),
            columns: Vec::new(),
            dummy: column(),
            active_column_index: 0,
            mode: NavigationMode::Item,
            settings: settings.clone(),
            title: String::new(),
            hint: String::new(),
            carrier: None,
            preview_chosen: false,
            notice: None,
            layout_valid: false,
            screen: (0, 0),
            area: Rect::default(),
            border: 0,
        };
        for _ in [OWN_INV_COLUMN, MAP_COLUMN, OWN_GEAR_COLUMN] {
            selector.append_column(column());
        }
        selector
    }

    /// Selector whose rows can be chosen in bulk, with a review column
    /// titled `selection_title`
    pub fn multiselect(
        preset: Rc<dyn Preset>,
        settings: SelectorSettings,
        selection_title: &str,
    ) -> Self {
        let mut selector = Self::new(preset, settings);
        for column in &mut selector.columns {
            column.set_multiselect(true);
        }
        let category = selector
            .store
            .insert_category(Category::new("SELECTION_COLUMN", selection_title, 0));
        let mut column = Column::selection(
            Rc::new(SelectionPreset::default()),
            category,
            selector.settings.layout.clone(),
            selector.settings.item_symbols,
        );
        column.prepare_paging(&selector.store);
        selector.append_column(column);
        selector
    }

    fn append_column(&mut self, mut column: Column) {
        column.set_mode(self.mode);
        if self.columns.is_empty() {
            column.set_active(true);
        }
        self.columns.push(column);
    }

    // Accessors

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn settings(&self) -> &SelectorSettings {
        &self.settings
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.layout_valid = false;
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn set_hint(&mut self, hint: impl Into<String>) {
        self.hint = hint.into();
        self.layout_valid = false;
    }

    pub fn set_carrier(&mut self, carrier: Option<Carrier>) {
        self.carrier = carrier;
        self.layout_valid = false;
    }

    pub fn set_preview_chosen(&mut self, preview: bool) {
        self.preview_chosen = preview;
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> &Column {
        match self.columns.get(index) {
            Some(column) => column,
            None => {
                tracing::warn!("Invalid column index {}", index);
                &self.dummy
            }
        }
    }

    pub fn column_mut(&mut self, index: usize) -> &mut Column {
        match self.columns.get_mut(index) {
            Some(column) => column,
            None => {
                tracing::warn!("Invalid column index {}", index);
                &mut self.dummy
            }
        }
    }

    pub fn active_column_index(&self) -> usize {
        self.active_column_index
    }

    pub fn active_column(&self) -> &Column {
        self.column(self.active_column_index)
    }

    fn selection_column_index(&self) -> Option<usize> {
        self.columns.iter().position(Column::is_selection)
    }

    /// Nothing was ingested
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn has_available_choices(&self) -> bool {
        self.store
            .items()
            .any(|(_, item)| self.preset.denial(item).is_empty())
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn show_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn invalidate_layout(&mut self) {
        self.layout_valid = false;
    }

    pub fn is_layout_valid(&self) -> bool {
        self.layout_valid
    }

    /// Window position and size on the screen
    pub fn area(&self) -> Rect {
        self.area
    }

    /// 1 when the window is framed
    pub fn border(&self) -> usize {
        self.border
    }

    // Ingestion

    /// Add one row; items the preset hides are skipped
    pub fn add_item(
        &mut self,
        column: usize,
        record: ItemRecord,
        stack_size: usize,
        category: Option<CategoryId>,
    ) -> Option<ItemHandle> {
        if column >= self.columns.len() {
            tracing::warn!("Invalid column index {}", column);
            return None;
        }
        if !self.preset.is_shown(&record) {
            return None;
        }
        let category = match category {
            Some(category) => category,
            None => self.natural_category(&record),
        };
        let enabled = self.preset.denial(&record).is_empty();
        let handle = self.store.insert_item(record);
        let entry = ItemEntry::new(handle, stack_size, category, enabled);

        let store = &self.store;
        self.columns[column].add_entry(entry.clone(), store);
        if let Some(index) = self.columns.iter().position(Column::is_selection) {
            self.columns[index].expand_to_fit(&Entry::Item(entry), store);
        }

        self.layout_valid = false;
        Some(handle)
    }

    /// Add stacks lying on one spot
    ///
    /// With a `custom` category, every stack goes under that category
    /// naturalized for the spot; otherwise stacks keep their own category.
    pub fn add_items(
        &mut self,
        column: usize,
        stacks: &[Vec<&ItemRecord>],
        custom: Option<&Category>,
    ) {
        let mut category = None;
        for stack in stacks {
            let Some(record) = merge_stack(stack) else {
                continue;
            };
            if let Some(custom) = custom {
                if category.is_none() && self.preset.is_shown(&record) {
                    category = Some(self.store.naturalize(custom, record.location.offset()));
                }
            }
            let stack_size = record.count;
            self.add_item(column, record, stack_size, category);
        }
    }

    /// Wielded and worn items go to the gear column, the rest of what the
    /// user carries to the inventory column
    pub fn add_character_items(&mut self, catalog: &Catalog) {
        let weapon_held = self
            .store
            .intern_category(Category::new("WEAPON HELD", "WEAPON HELD", -200));
        let items_worn = self
            .store
            .intern_category(Category::new("ITEMS WORN", "ITEMS WORN", -100));

        for item in catalog.wielded() {
            self.add_item(OWN_GEAR_COLUMN, item.clone(), item.count, Some(weapon_held));
        }
        for item in catalog.worn() {
            self.add_item(OWN_GEAR_COLUMN, item.clone(), item.count, Some(items_worn));
        }
        let stacks = restack(catalog.carried());
        self.add_items(OWN_INV_COLUMN, &stacks, None);
    }

    /// Items on the ground and in vehicle cargo within `radius`, closest
    /// spots first
    pub fn add_nearby_items(&mut self, catalog: &Catalog, radius: i32) {
        if radius < 0 {
            return;
        }

        let mut spots: BTreeMap<(i32, i32, i32), Vec<&ItemRecord>> = BTreeMap::new();
        for item in catalog.nearby(radius) {
            let offset = item.location.offset();
            spots
                .entry((offset.distance(), offset.y, offset.x))
                .or_default()
                .push(item);
        }

        for items in spots.values() {
            let mut ground: Vec<(String, Vec<&ItemRecord>)> = Vec::new();
            let mut cargo: Vec<(String, Vec<&ItemRecord>)> = Vec::new();
            for &item in items {
                match &item.location {
                    Location::Ground { terrain, .. } => group_by_name(&mut ground, terrain, item),
                    Location::Vehicle { part, .. } => group_by_name(&mut cargo, part, item),
                    _ => {}
                }
            }

            for (groups, rank) in [(ground, 100), (cargo, 200)] {
                for (name, group) in groups {
                    let name = name.to_uppercase();
                    let category = Category::new(&name, &name, rank);
                    let stacks = restack(group);
                    self.add_items(MAP_COLUMN, &stacks, Some(&category));
                }
            }
        }
    }

    /// Everything from a catalog: categories, carrier, own and nearby items
    pub fn add_catalog(&mut self, catalog: &Catalog, radius: i32) {
        self.register_catalog(catalog);
        self.add_character_items(catalog);
        self.add_nearby_items(catalog, radius);
        tracing::info!("Selector holds {} items", self.store.items().count());
    }

    /// List only what the user wields, wears or carries
    pub fn add_character_catalog(&mut self, catalog: &Catalog) {
        self.register_catalog(catalog);
        self.add_character_items(catalog);
        tracing::info!("Selector holds {} items", self.store.items().count());
    }

    fn register_catalog(&mut self, catalog: &Catalog) {
        for category in &catalog.categories {
            self.store.intern_category(category.clone());
        }
        self.set_carrier(catalog.carrier);
    }

    fn natural_category(&mut self, record: &ItemRecord) -> CategoryId {
        match self.store.find_category(&record.category) {
            Some(id) => id,
            None => {
                tracing::debug!("Unregistered category '{}'", record.category);
                self.store
                    .intern_category(Category::new(&record.category, &record.category, 0))
            }
        }
    }

    // Layout

    fn visible_columns(&self) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|&i| self.columns[i].visible())
            .collect()
    }

    fn columns_width(&self, indices: &[usize]) -> usize {
        indices.iter().map(|&i| self.columns[i].width()).sum()
    }

    /// Share of `client_width` the visible columns need
    pub fn occupancy_ratio(&self, client_width: usize) -> f64 {
        if client_width == 0 {
            return f64::INFINITY;
        }
        let visible = self.visible_columns();
        let gaps = self.settings.layout.min_column_gap * visible.len().saturating_sub(1);
        (self.columns_width(&visible) + gaps) as f64 / client_width as f64
    }

    pub fn are_columns_centered(&self, client_width: usize) -> bool {
        self.occupancy_ratio(client_width) >= self.settings.layout.min_ratio_to_center
    }

    pub fn is_overflown(&self, client_width: usize) -> bool {
        self.occupancy_ratio(client_width) > 1.0
    }

    /// Fold the gear and nearby columns into the inventory column while the
    /// columns don't fit
    fn rearrange_columns(&mut self, client_width: usize) {
        if let Some(index) = self.selection_column_index() {
            let overflown = self.is_overflown(client_width);
            self.columns[index].set_visibility(!overflown);
        }
        for from in [OWN_GEAR_COLUMN, MAP_COLUMN] {
            if !self.column(from).is_empty() && self.is_overflown(client_width) {
                self.move_entries(from, OWN_INV_COLUMN);
            }
        }
    }

    /// Move every item row of one column into another
    pub fn move_entries(&mut self, from: usize, to: usize) {
        if from == to || from >= self.columns.len() || to >= self.columns.len() {
            tracing::warn!("Invalid column move {} -> {}", from, to);
            return;
        }
        tracing::debug!("Moving entries of column {} into column {}", from, to);
        let store = &self.store;
        let items = self.columns[from].take_items(store);
        for item in items {
            self.columns[to].add_entry(item, store);
        }
        self.columns[to].prepare_paging(store);
        self.layout_valid = false;
    }

    /// Paginate and size every column for a client area
    pub fn prepare_layout(&mut self, client_width: usize, client_height: usize) {
        let store = &self.store;
        for column in &mut self.columns {
            column.set_height(client_height);
            column.prepare_paging(store);
        }

        self.rearrange_columns(client_width);

        let visible = self.visible_columns();
        if visible.len() == 1 && self.are_columns_centered(client_width) {
            self.columns[visible[0]].set_width(client_width, &self.store);
        }

        let store = &self.store;
        let mut next = self.settings.shortcut_first as u32;
        let last = self.settings.shortcut_last as u32;
        for column in &mut self.columns {
            column.prepare_paging(store);
            next = column.reassign_shortcuts(store, next, last);
        }

        self.refresh_active_column();
    }

    /// Lay everything out for a screen of the given size
    ///
    /// Columns are sized against the whole screen first; the window is then
    /// fitted around them (snapping to the screen edge when close) and the
    /// columns are sized once more for the final client area.
    pub fn update(&mut self, screen_width: u16, screen_height: u16) {
        let screen = (screen_width as usize, screen_height as usize);
        if self.layout_valid && self.screen == screen {
            return;
        }
        self.screen = screen;
        let (max_width, max_height) = screen;

        let snap_distance = self.settings.layout.max_win_snap_distance;
        let snap = |cur: usize, max: usize| {
            if cur + 2 * snap_distance >= max {
                max
            } else {
                cur
            }
        };
        let nc_height = self.header_height() + 3;

        let store = &self.store;
        for column in &mut self.columns {
            column.reset_width(store);
        }

        self.prepare_layout(max_width, max_height);
        let width = snap(self.layout_width() + NC_WIDTH, max_width);
        let height = snap(self.layout_height() + nc_height, max_height);
        self.resize_window(width.min(max_width), height.min(max_height));

        let client_width = (self.area.width as usize).saturating_sub(NC_WIDTH + 2 * self.border);
        let client_height = (self.area.height as usize)
            .saturating_sub(nc_height + 2 * self.border)
            .max(1);
        self.prepare_layout(client_width, client_height);

        tracing::debug!(
            "Layout {}x{} in a {}x{} window",
            client_width,
            client_height,
            self.area.width,
            self.area.height
        );
        self.layout_valid = true;
    }

    fn resize_window(&mut self, width: usize, height: usize) {
        let (max_width, max_height) = self.screen;
        self.border = usize::from(width < max_width || height < max_height);

        let frame = 2 * self.border;
        let w = if width + frame <= max_width { width + frame } else { width };
        let h = if height + frame <= max_height { height + frame } else { height };
        let x = max_width.saturating_sub(w) / 2;
        let y = max_height.saturating_sub(h) / 2;

        self.area = Rect::new(to_u16(x), to_u16(y), to_u16(w), to_u16(h));
    }

    /// Width the content needs
    pub fn layout_width(&self) -> usize {
        let visible = self.visible_columns();
        let gaps = self.settings.layout.min_column_gap * visible.len().saturating_sub(1);
        let hud = self.header_min_width().max(self.footer_min_width());
        (self.columns_width(&visible) + gaps).max(hud)
    }

    /// Height of the tallest visible column
    pub fn layout_height(&self) -> usize {
        self.visible_columns()
            .iter()
            .map(|&i| self.columns[i].height())
            .max()
            .unwrap_or(1)
    }

    /// Columns to draw with their x offset inside the window
    ///
    /// Centered columns share all free space; otherwise the gap is capped at
    /// the normal column gap. The remainder of an even split goes in front of
    /// the last column.
    pub fn column_placement(&self) -> Vec<(usize, usize)> {
        let visible = self.visible_columns();
        let count = visible.len() as isize;
        let client_width = (self.area.width as usize).saturating_sub(2 * (self.border + 1));
        let centered = self.are_columns_centered(client_width);

        let free = client_width as isize - self.columns_width(&visible) as isize;
        let max_gap = if count > 1 { free / (count - 1) } else { free };
        let gap = if centered {
            max_gap
        } else {
            max_gap.min(self.settings.layout.normal_column_gap as isize)
        };
        let rounding = if centered && count > 1 { free % (count - 1) } else { 0 };

        let mut x = (self.border + 1) as isize;
        let mut placement = Vec::with_capacity(visible.len());
        for (n, &index) in visible.iter().enumerate() {
            if n + 1 == visible.len() {
                x += rounding;
            }
            placement.push((index, x.max(0) as usize));
            x += self.columns[index].width() as isize + gap;
        }
        placement
    }

    // Header and footer

    pub fn display_stats(&self) -> bool {
        self.carrier.is_some()
    }

    pub fn header_height(&self) -> usize {
        if self.display_stats() || !self.hint.is_empty() {
            2
        } else {
            1
        }
    }

    fn header_min_width(&self) -> usize {
        let titles = display_width(&self.title).max(display_width(&self.hint));
        let stats = self
            .stats()
            .iter()
            .map(|line| display_width(line))
            .max()
            .unwrap_or(0);
        titles + stats + if stats != 0 { 3 } else { 0 }
    }

    fn footer_min_width(&self) -> usize {
        [NavigationMode::Item, NavigationMode::Category]
            .into_iter()
            .map(|mode| display_width(&self.footer(mode)))
            .max()
            .unwrap_or(0)
    }

    pub fn footer(&self, mode: NavigationMode) -> String {
        if self.has_available_choices() {
            format!(
                "{}; {} switches mode, {} confirms.",
                mode.name(),
                self.settings.key_name(Action::CategorySelection),
                self.settings.key_name(Action::Confirm)
            )
        } else {
            "There are no available choices.".to_string()
        }
    }

    /// Carried weight and volume against capacity, aligned on the values
    pub fn stats(&self) -> Vec<String> {
        let Some(carrier) = self.carrier else {
            return Vec::new();
        };
        let (weight, volume) = self.carried_load();
        let stats = [
            stat("Weight (kg):", weight, carrier.weight_capacity),
            stat("Volume (L):", volume, carrier.volume_capacity),
        ];

        let mut lines: Vec<String> = stats.iter().map(|s| format!("{} ", s[0])).collect();
        for cell in 1..4 {
            let widest = stats.iter().map(|s| display_width(&s[cell])).max().unwrap_or(0);
            for (line, stat) in lines.iter_mut().zip(&stats) {
                line.push_str(&" ".repeat(widest - display_width(&stat[cell])));
                line.push_str(&stat[cell]);
            }
        }
        lines
    }

    /// Weight and volume of everything the user possesses
    fn carried_load(&self) -> (f64, f64) {
        let mut load = (0.0, 0.0);
        for column in self.columns.iter().filter(|c| !c.is_selection()) {
            for entry in column.entries().iter().filter_map(Entry::as_item) {
                let record = self.store.item(entry.item);
                if !record.location.is_possessed() {
                    continue;
                }
                let mut units = record.units();
                if self.preview_chosen {
                    units = units.saturating_sub(entry.chosen_count);
                }
                let (weight, volume) = record.load_of(units);
                load.0 += weight;
                load.1 += volume;
            }
        }
        load
    }

    // Input

    pub fn on_input(&mut self, input: &InputEvent) {
        match input.action {
            Some(Action::CategorySelection) => self.toggle_navigation_mode(),
            Some(Action::Left) => self.toggle_active_column(ScrollDirection::Backward),
            Some(Action::Right) => self.toggle_active_column(ScrollDirection::Forward),
            Some(Action::Resize) => self.invalidate_layout(),
            _ => {
                for column in &mut self.columns {
                    column.on_input(input);
                }
                self.refresh_active_column();
            }
        }
    }

    /// Propagate a changed chosen count to every column
    pub fn on_change(&mut self, entry: &ItemEntry) {
        let store = &self.store;
        for column in &mut self.columns {
            column.on_change(entry, store);
        }
        self.refresh_active_column();
    }

    pub fn toggle_navigation_mode(&mut self) {
        self.mode = self.mode.next();
        for column in &mut self.columns {
            column.set_mode(self.mode);
        }
    }

    pub fn toggle_active_column(&mut self, direction: ScrollDirection) {
        let len = self.columns.len();
        if len == 0 {
            return;
        }
        let mut index = self.active_column_index;
        loop {
            index = match direction {
                ScrollDirection::Forward => (index + 1) % len,
                ScrollDirection::Backward => (index + len - 1) % len,
            };
            if index == self.active_column_index || self.columns[index].activatable() {
                break;
            }
        }
        self.set_active_column(index);
    }

    pub fn set_active_column(&mut self, index: usize) {
        if index < self.columns.len()
            && index != self.active_column_index
            && self.columns[index].activatable()
        {
            self.column_mut(self.active_column_index).set_active(false);
            self.active_column_index = index;
            self.columns[index].set_active(true);
        }
    }

    /// Leave a column that can no longer be active
    pub fn refresh_active_column(&mut self) {
        if !self.active_column().activatable() {
            self.toggle_active_column(ScrollDirection::Forward);
        }
    }

    // Lookups

    /// Selectable item bound to a shortcut key
    pub fn find_by_key(&self, key: char) -> Option<ItemHandle> {
        self.columns.iter().find_map(|column| {
            column
                .find_by_key(key, &self.store)
                .map(|index| &column.entries()[index])
        })
        .filter(|entry| entry.is_selectable())
        .and_then(Entry::as_item)
        .map(|entry| entry.item)
    }

    /// Selectable item under the cursor of the active column
    pub fn active_selected(&self) -> Option<ItemHandle> {
        self.active_column()
            .selected()
            .filter(|entry| entry.is_selectable())
            .map(|entry| entry.item)
    }

    /// Items highlighted in the active column
    pub fn active_all_selected(&self) -> Vec<ItemHandle> {
        let column = self.active_column();
        column
            .all_selected()
            .into_iter()
            .filter_map(|index| column.entries()[index].as_item())
            .map(|entry| entry.item)
            .collect()
    }

    /// The row showing `item` outside the review column
    pub fn entry(&self, item: ItemHandle) -> Option<&ItemEntry> {
        self.columns
            .iter()
            .filter(|c| !c.is_selection())
            .flat_map(|c| c.entries().iter().filter_map(Entry::as_item))
            .find(|entry| entry.item == item)
    }

    pub fn chosen_count(&self, item: ItemHandle) -> usize {
        self.entry(item).map_or(0, |entry| entry.chosen_count)
    }

    /// How much of `item` can be chosen
    pub fn available_count(&self, item: ItemHandle) -> usize {
        self.entry(item)
            .map_or(0, |entry| entry.available_count(self.store.item(item)))
    }

    /// Set the chosen count of `item` and let the columns react
    pub fn set_chosen(&mut self, item: ItemHandle, count: usize) -> bool {
        let changed = self
            .columns
            .iter_mut()
            .filter(|c| !c.is_selection())
            .find_map(|c| c.find_item_mut(item))
            .map(|entry| {
                entry.chosen_count = count;
                entry.clone()
            });
        match changed {
            Some(entry) => {
                self.on_change(&entry);
                true
            }
            None => {
                tracing::warn!("No row shows item {}", item.index());
                false
            }
        }
    }
}

/// One record standing for a whole stack
fn merge_stack(stack: &[&ItemRecord]) -> Option<ItemRecord> {
    let (first, rest) = stack.split_first()?;
    let mut record = (*first).clone();
    record.count += rest.iter().map(|r| r.count).sum::<usize>();
    Some(record)
}

fn group_by_name<'a>(groups: &mut Vec<(String, Vec<&'a ItemRecord>)>, name: &str, item: &'a ItemRecord) {
    match groups.iter_mut().find(|(n, _)| n == name) {
        Some((_, group)) => group.push(item),
        None => groups.push((name.to_string(), vec![item])),
    }
}

/// Caption, value, separator and capacity cells of a stat line
fn stat(caption: &str, value: f64, capacity: f64) -> [String; 4] {
    let color = if value > capacity { "red" } else { "gray" };
    [
        caption.to_string(),
        format!("<color_{color}>{value:.1}</color>"),
        "/".to_string(),
        format!("<color_gray>{capacity:.1}</color>"),
    ]
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
