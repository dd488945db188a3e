//! Interaction loops
//!
//! Each driver owns a [`Selector`] and runs render → read one event → react
//! until it has a result. Nothing survives past `execute` except the chosen
//! counts the driver left on the rows, so a driver can be run again.

use anyhow::Result;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::input::{Action, InputEvent};
use super::preset::{DefaultPreset, Preset};
use super::selector::{Selector, SelectorSettings};
use super::store::ItemHandle;
use crate::catalog::Catalog;

/// Terminal side of a driver loop
pub trait Frontend {
    /// Screen size in cells
    fn size(&mut self) -> Result<(u16, u16)>;
    fn draw(&mut self, selector: &Selector) -> Result<()>;
    /// Block until the next event
    fn next_event(&mut self) -> Result<InputEvent>;
}

/// Render and wait for an event the driver has to handle
///
/// Resizes only trigger a new layout and any key dismisses a notice.
fn read_input(selector: &mut Selector, frontend: &mut dyn Frontend) -> Result<InputEvent> {
    loop {
        let (width, height) = frontend.size()?;
        selector.update(width, height);
        frontend.draw(selector)?;

        let input = frontend.next_event()?;
        if input.action == Some(Action::Resize) {
            selector.invalidate_layout();
            continue;
        }
        if selector.notice().is_some() {
            selector.dismiss_notice();
            continue;
        }
        return Ok(input);
    }
}

/// Pick a single item
pub struct PickSelector {
    selector: Selector,
}

impl PickSelector {
    pub fn new(preset: Rc<dyn Preset>, settings: SelectorSettings) -> Self {
        Self {
            selector: Selector::new(preset, settings),
        }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut Selector {
        &mut self.selector
    }

    /// The picked item, `None` when the user quits
    pub fn execute(&mut self, frontend: &mut dyn Frontend) -> Result<Option<ItemHandle>> {
        loop {
            let input = read_input(&mut self.selector, frontend)?;

            if let Some(item) = input.ch.and_then(|ch| self.selector.find_by_key(ch)) {
                return Ok(Some(item));
            }
            match input.action {
                Some(Action::Quit) => return Ok(None),
                Some(Action::Confirm) => match self.selector.active_selected() {
                    Some(item) => return Ok(Some(item)),
                    None => self.selector.show_notice("There are no available choices."),
                },
                _ => self.selector.on_input(&input),
            }
        }
    }
}

/// Pick two items to compare
pub struct CompareSelector {
    selector: Selector,
    compared: Vec<ItemHandle>,
}

impl CompareSelector {
    pub fn new(settings: SelectorSettings) -> Self {
        Self {
            selector: Selector::multiselect(
                Rc::new(DefaultPreset::new()),
                settings,
                "ITEMS TO COMPARE",
            ),
            compared: Vec::new(),
        }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut Selector {
        &mut self.selector
    }

    /// The last marked item and the one marked before it, `None` when the
    /// user quits. Both lose their mark.
    pub fn execute(
        &mut self,
        frontend: &mut dyn Frontend,
    ) -> Result<Option<(ItemHandle, ItemHandle)>> {
        loop {
            let input = read_input(&mut self.selector, frontend)?;

            if let Some(item) = input.ch.and_then(|ch| self.selector.find_by_key(ch)) {
                self.toggle(item);
            } else {
                match input.action {
                    Some(Action::Right) => {
                        let selection = self.selector.active_all_selected();
                        let single = selection.len() == 1;
                        for item in selection {
                            if single || self.selector.chosen_count(item) == 0 {
                                self.toggle(item);
                                if self.compared.len() == 2 {
                                    break;
                                }
                            }
                        }
                    }
                    Some(Action::Confirm) => {
                        let notice = format!(
                            "You need two items for comparison.  Use {} to select them.",
                            self.selector.settings().key_name(Action::Right)
                        );
                        self.selector.show_notice(notice);
                    }
                    Some(Action::Quit) => {
                        self.reset();
                        return Ok(None);
                    }
                    _ => self.selector.on_input(&input),
                }
            }

            if let [earlier, latest] = self.compared[..] {
                self.reset();
                return Ok(Some((latest, earlier)));
            }
        }
    }

    /// Mark or unmark an item
    pub fn toggle(&mut self, item: ItemHandle) {
        match self.compared.iter().position(|&c| c == item) {
            Some(index) => {
                self.compared.remove(index);
                self.selector.set_chosen(item, 0);
            }
            None => {
                self.compared.push(item);
                self.selector.set_chosen(item, 1);
            }
        }
    }

    pub fn compared(&self) -> &[ItemHandle] {
        &self.compared
    }

    fn reset(&mut self) {
        for item in std::mem::take(&mut self.compared) {
            self.selector.set_chosen(item, 0);
        }
    }
}

/// Choose items and quantities to drop
pub struct DropSelector {
    selector: Selector,
    dropping: BTreeMap<ItemHandle, usize>,
}

/// Largest pending count that can take one more digit
const MAX_PENDING: usize = (u32::MAX / 10 - 10) as usize;

impl DropSelector {
    pub fn new(preset: Rc<dyn Preset>, settings: SelectorSettings) -> Self {
        let mut selector = Selector::multiselect(preset, settings, "ITEMS TO DROP");
        selector.set_preview_chosen(true);
        Self {
            selector,
            dropping: BTreeMap::new(),
        }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut Selector {
        &mut self.selector
    }

    /// List the user's own items; nothing nearby can be dropped
    pub fn add_catalog(&mut self, catalog: &Catalog) {
        self.selector.add_character_catalog(catalog);
    }

    /// Items and quantities to drop, empty when the user quits
    pub fn execute(&mut self, frontend: &mut dyn Frontend) -> Result<Vec<(ItemHandle, usize)>> {
        let mut count = 0;
        loop {
            let input = read_input(&mut self.selector, frontend)?;

            if let Some(digit) = input.digit() {
                count = count.min(MAX_PENDING) * 10 + digit as usize;
                continue;
            }
            if let Some(item) = input.ch.and_then(|ch| self.selector.find_by_key(ch)) {
                self.set_drop_count(item, count);
                count = 0;
                continue;
            }
            match input.action {
                Some(Action::Right) => {
                    for item in self.selector.active_all_selected() {
                        self.set_drop_count(item, count);
                    }
                    count = 0;
                }
                Some(Action::Confirm) => {
                    if !self.dropping.is_empty() {
                        return Ok(self.dropping.iter().map(|(&i, &n)| (i, n)).collect());
                    }
                    let notice = format!(
                        "No items were selected.  Use {} to select them.",
                        self.selector.settings().key_name(Action::Right)
                    );
                    self.selector.show_notice(notice);
                }
                Some(Action::Quit) => return Ok(Vec::new()),
                _ => {
                    self.selector.on_input(&input);
                    count = 0;
                }
            }
        }
    }

    /// Drop `count` of an item, all of it for 0
    ///
    /// A zero count on an item already being dropped takes it back.
    pub fn set_drop_count(&mut self, item: ItemHandle, count: usize) {
        let chosen = if count == 0 && self.dropping.contains_key(&item) {
            self.dropping.remove(&item);
            0
        } else {
            let available = self.selector.available_count(item);
            let chosen = if count == 0 { available } else { count.min(available) };
            self.dropping.insert(item, chosen);
            chosen
        };
        self.selector.set_chosen(item, chosen);
    }

    pub fn dropping(&self) -> &BTreeMap<ItemHandle, usize> {
        &self.dropping
    }
}
