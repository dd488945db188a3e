//! Presentation presets
//!
//! A preset decides which items a selector shows, in what order, which of
//! them can be chosen, and what text goes into each named cell of a row.
//! Cell 0 is always the caption; further cells are appended by title.

use ratatui::style::Color;
use std::cmp::Ordering;

use super::entry::{Entry, ItemEntry};
use super::store::Store;
use crate::catalog::{ItemRecord, Location};
use crate::ui::text::display_width;

/// Produces the text of one cell for an item
pub type CellFn = Box<dyn Fn(&ItemRecord) -> String>;

/// A named cell
pub struct CellDef {
    pub title: String,
    /// Text meaning "nothing to show here"
    pub stub: String,
    /// `None` for the caption cell
    func: Option<CellFn>,
}

impl std::fmt::Debug for CellDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellDef")
            .field("title", &self.title)
            .field("stub", &self.stub)
            .finish_non_exhaustive()
    }
}

/// Ordered set of cells, starting with the caption
#[derive(Debug)]
pub struct CellDefs {
    cells: Vec<CellDef>,
}

impl Default for CellDefs {
    fn default() -> Self {
        Self {
            cells: vec![CellDef {
                title: String::new(),
                stub: String::new(),
                func: None,
            }],
        }
    }
}

impl CellDefs {
    /// Append a cell; a title that is already taken is rejected
    pub fn append(
        &mut self,
        title: impl Into<String>,
        stub: impl Into<String>,
        func: impl Fn(&ItemRecord) -> String + 'static,
    ) -> bool {
        let title = title.into();
        if self.cells.iter().any(|c| c.title == title) {
            tracing::warn!("Tried to append a duplicate cell \"{}\": ignored", title);
            return false;
        }
        self.cells.push(CellDef {
            title,
            stub: stub.into(),
            func: Some(Box::new(func)),
        });
        true
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CellDef> {
        self.cells.get(index)
    }
}

/// How a selector presents items
pub trait Preset {
    fn cells(&self) -> &CellDefs;

    /// Items failing this are left out entirely
    fn is_shown(&self, _item: &ItemRecord) -> bool {
        true
    }

    /// Why the item can't be chosen; empty when it can
    fn denial(&self, item: &ItemRecord) -> String {
        item.denial.clone().unwrap_or_default()
    }

    /// Order of items within one category
    fn sort_compare(&self, lhs: &ItemRecord, rhs: &ItemRecord) -> Ordering {
        lhs.name.cmp(&rhs.name)
    }

    fn caption(&self, entry: &ItemEntry, item: &ItemRecord) -> String {
        if entry.stack_size > 1 {
            format!("{} {}", entry.stack_size, item.display_name())
        } else {
            item.display_name()
        }
    }

    fn color(&self, item: &ItemRecord) -> Color {
        item.color
    }

    /// Text of cell `index` for a row
    fn cell_text(&self, entry: &Entry, index: usize, store: &Store) -> String {
        let Some(cell) = self.cells().get(index) else {
            tracing::warn!("Invalid cell index {}", index);
            return String::new();
        };
        match entry {
            Entry::Blank => String::new(),
            Entry::Item(item) => {
                let record = store.item(item.item);
                match &cell.func {
                    Some(func) => func(record),
                    None => self.caption(item, record),
                }
            }
            Entry::Header(category) if index == 0 => store.category(*category).name.clone(),
            Entry::Header(_) => cell.title.clone(),
        }
    }

    fn cell_width(&self, entry: &Entry, index: usize, store: &Store) -> usize {
        display_width(&self.cell_text(entry, index, store))
    }

    /// Whether an item row has nothing meaningful in cell `index`
    fn is_stub_cell(&self, entry: &Entry, index: usize, store: &Store) -> bool {
        if !entry.is_item() {
            return false;
        }
        let text = self.cell_text(entry, index, store);
        text.is_empty() || self.cells().get(index).is_some_and(|c| c.stub == text)
    }
}

/// Caption-only preset, extensible with more cells
#[derive(Debug, Default)]
pub struct DefaultPreset {
    cells: CellDefs,
}

impl DefaultPreset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_cell(
        &mut self,
        title: impl Into<String>,
        stub: impl Into<String>,
        func: impl Fn(&ItemRecord) -> String + 'static,
    ) -> bool {
        self.cells.append(title, stub, func)
    }

    pub fn with_cell(
        mut self,
        title: impl Into<String>,
        stub: impl Into<String>,
        func: impl Fn(&ItemRecord) -> String + 'static,
    ) -> Self {
        self.append_cell(title, stub, func);
        self
    }
}

impl Preset for DefaultPreset {
    fn cells(&self) -> &CellDefs {
        &self.cells
    }
}

/// Preset of the column that reviews chosen rows
#[derive(Debug, Default)]
pub struct SelectionPreset {
    cells: CellDefs,
}

impl Preset for SelectionPreset {
    fn cells(&self) -> &CellDefs {
        &self.cells
    }

    fn caption(&self, entry: &ItemEntry, item: &ItemRecord) -> String {
        let available = entry.available_count(item);
        let name = item.display_name();
        if entry.chosen_count > 0 && entry.chosen_count < available {
            format!("{} of {} {}", entry.chosen_count, available, name)
        } else if available != 1 {
            format!("{} {}", available, name)
        } else {
            name
        }
    }

    fn color(&self, item: &ItemRecord) -> Color {
        match item.location {
            Location::Wielded => Color::LightBlue,
            Location::Worn => Color::Cyan,
            _ => item.color,
        }
    }
}
