//! Item catalog
//!
//! The catalog is the outside world as far as the selector is concerned:
//! what the user carries, wears and wields, and what lies around them on
//! the ground or in vehicle cargo. It is read from a TOML document:
//!
//! ```toml
//! [carrier]
//! weight_capacity = 40.0
//! volume_capacity = 25.0
//!
//! [[categories]]
//! id = "TOOLS"
//! name = "TOOLS"
//! sort_rank = 10
//!
//! [[items]]
//! name = "hammer"
//! category = "TOOLS"
//! invlet = "a"
//! weight = 0.7
//!
//! [[items]]
//! name = "rock"
//! category = "TOOLS"
//! count = 3
//! location = { kind = "ground", offset = { x = 1, y = 0 }, terrain = "dirt" }
//! ```

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::inventory::category::{Category, Offset};
use crate::ui::theme::serde_color;

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("item \"{item}\" refers to unknown category \"{category}\"")]
    UnknownCategory { item: String, category: String },
    #[error("category \"{0}\" is defined more than once")]
    DuplicateCategory(String),
}

/// Where an item currently is
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    /// Carried in the user's pockets and containers
    #[default]
    Inventory,
    /// Worn by the user
    Worn,
    /// Held in the user's hands
    Wielded,
    /// Lying on a map tile
    Ground {
        #[serde(default)]
        offset: Offset,
        terrain: String,
    },
    /// Stored in a vehicle cargo part
    Vehicle {
        #[serde(default)]
        offset: Offset,
        part: String,
    },
}

impl Location {
    /// Whether the user already possesses items at this location
    pub fn is_possessed(&self) -> bool {
        matches!(self, Location::Inventory | Location::Worn | Location::Wielded)
    }

    pub fn offset(&self) -> Offset {
        match self {
            Location::Ground { offset, .. } | Location::Vehicle { offset, .. } => *offset,
            _ => Offset::ZERO,
        }
    }
}

/// A single catalog item (or an identical stack of them)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub category: String,
    /// Number of identical items this record stands for
    #[serde(default = "default_count")]
    pub count: usize,
    /// Charges for items that are divided by charge (ammo, liquids)
    #[serde(default)]
    pub charges: Option<usize>,
    #[serde(default = "default_symbol")]
    pub symbol: char,
    #[serde(default = "default_color", with = "serde_color")]
    pub color: Color,
    /// Inventory letter the user assigned
    #[serde(default)]
    pub invlet: Option<char>,
    /// Weight of one unit in kilograms
    #[serde(default)]
    pub weight: f64,
    /// Volume of one unit in litres
    #[serde(default)]
    pub volume: f64,
    /// Why this item cannot be chosen, if it cannot
    #[serde(default)]
    pub denial: Option<String>,
    #[serde(default)]
    pub location: Location,
}

fn default_count() -> usize {
    1
}

fn default_symbol() -> char {
    '?'
}

fn default_color() -> Color {
    Color::Gray
}

impl ItemRecord {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            count: 1,
            charges: None,
            symbol: default_symbol(),
            color: default_color(),
            invlet: None,
            weight: 0.0,
            volume: 0.0,
            denial: None,
            location: Location::Inventory,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_charges(mut self, charges: usize) -> Self {
        self.charges = Some(charges);
        self
    }

    pub fn with_invlet(mut self, invlet: char) -> Self {
        self.invlet = Some(invlet);
        self
    }

    pub fn with_denial(mut self, denial: impl Into<String>) -> Self {
        self.denial = Some(denial.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn with_weight(mut self, weight: f64, volume: f64) -> Self {
        self.weight = weight;
        self.volume = volume;
        self
    }

    /// Name as shown in a row, charges included
    pub fn display_name(&self) -> String {
        match self.charges {
            Some(charges) => format!("{} ({})", self.name, charges),
            None => self.name.clone(),
        }
    }

    /// Whether two records can share a single row
    pub fn stacks_with(&self, other: &ItemRecord) -> bool {
        self.name == other.name
            && self.category == other.category
            && self.charges.is_none()
            && other.charges.is_none()
            && self.denial == other.denial
            && self.location == other.location
    }

    /// Weight and volume of `units` units (charges for charge-divided items)
    pub fn load_of(&self, units: usize) -> (f64, f64) {
        (self.weight * units as f64, self.volume * units as f64)
    }

    /// Units the record holds in total
    pub fn units(&self) -> usize {
        self.charges.unwrap_or(self.count)
    }
}

/// What the user can carry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    pub weight_capacity: f64,
    pub volume_capacity: f64,
}

/// Catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub carrier: Option<Carrier>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

impl Catalog {
    /// Load and validate a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::parse(&content)?;
        tracing::info!(
            "Loaded {} items in {} categories from {}",
            catalog.items.len(),
            catalog.categories.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse and validate catalog text
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut ids = HashSet::new();
        for category in &self.categories {
            if !ids.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }
        for item in &self.items {
            if !ids.contains(item.category.as_str()) {
                return Err(CatalogError::UnknownCategory {
                    item: item.name.clone(),
                    category: item.category.clone(),
                });
            }
        }
        Ok(())
    }

    /// Items the user holds in hand
    pub fn wielded(&self) -> impl Iterator<Item = &ItemRecord> {
        self.items.iter().filter(|i| i.location == Location::Wielded)
    }

    /// Items the user wears
    pub fn worn(&self) -> impl Iterator<Item = &ItemRecord> {
        self.items.iter().filter(|i| i.location == Location::Worn)
    }

    /// Items carried in the inventory proper
    pub fn carried(&self) -> impl Iterator<Item = &ItemRecord> {
        self.items.iter().filter(|i| i.location == Location::Inventory)
    }

    /// Items lying around within `radius`, not yet grouped
    pub fn nearby(&self, radius: i32) -> impl Iterator<Item = &ItemRecord> {
        self.items.iter().filter(move |i| {
            !i.location.is_possessed() && i.location.offset().distance() <= radius
        })
    }
}

/// Merge identical records into stacks, keeping first-seen order
pub fn restack<'a>(items: impl IntoIterator<Item = &'a ItemRecord>) -> Vec<Vec<&'a ItemRecord>> {
    let mut stacks: Vec<Vec<&ItemRecord>> = Vec::new();
    for item in items {
        match stacks.iter_mut().find(|s| s.last().is_some_and(|last| item.stacks_with(last))) {
            Some(stack) => stack.push(item),
            None => stacks.push(vec![item]),
        }
    }
    stacks
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
[carrier]
weight_capacity = 40.0
volume_capacity = 25.0

[[categories]]
id = "TOOLS"
name = "TOOLS"
sort_rank = 10

[[categories]]
id = "AMMO"
name = "AMMO"
sort_rank = 20

[[items]]
name = "hammer"
category = "TOOLS"
invlet = "a"
color = "#ff0000"

[[items]]
name = "9mm"
category = "AMMO"
charges = 30

[[items]]
name = "rock"
category = "TOOLS"
count = 3
location = { kind = "ground", offset = { x = 1, y = 0 }, terrain = "dirt" }

[[items]]
name = "jacket"
category = "TOOLS"
location = { kind = "worn" }
"##;

    #[test]
    fn test_parse_sample() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        assert_eq!(catalog.categories.len(), 2);
        assert_eq!(catalog.items.len(), 4);
        assert_eq!(catalog.items[0].invlet, Some('a'));
        assert_eq!(catalog.items[0].color, Color::Rgb(255, 0, 0));
        assert_eq!(catalog.items[1].display_name(), "9mm (30)");
        assert_eq!(catalog.carried().count(), 2);
        assert_eq!(catalog.worn().count(), 1);
        assert_eq!(catalog.nearby(1).count(), 1);
        assert_eq!(catalog.nearby(0).count(), 0);
    }

    #[test]
    fn test_unknown_category() {
        let text = r#"
[[items]]
name = "widget"
category = "NOPE"
"#;
        assert!(matches!(
            Catalog::parse(text),
            Err(CatalogError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_duplicate_category() {
        let text = r#"
[[categories]]
id = "A"
name = "A"

[[categories]]
id = "A"
name = "B"
"#;
        assert!(matches!(
            Catalog::parse(text),
            Err(CatalogError::DuplicateCategory(_))
        ));
    }

    #[test]
    fn test_restack() {
        let rock = ItemRecord::new("rock", "MISC");
        let stick = ItemRecord::new("stick", "MISC");
        let items = vec![rock.clone(), stick.clone(), rock.clone()];
        let stacks = restack(&items);
        assert_eq!(stacks.len(), 2);
        assert_eq!(stacks[0].len(), 2);
        assert_eq!(stacks[1][0].name, "stick");
    }

    #[test]
    fn test_charged_items_do_not_stack() {
        let ammo = ItemRecord::new("9mm", "AMMO").with_charges(10);
        assert!(!ammo.stacks_with(&ammo.clone()));
    }
}
