//! Multi-column paginated item selector
//!
//! Items are ingested into a [`Selector`], which spreads them over columns of
//! category-grouped rows. The drivers in [`driver`] run the interaction loop
//! against any [`Frontend`].

pub mod category;
pub mod cell;
pub mod column;
pub mod driver;
pub mod entry;
pub mod input;
pub mod preset;
pub mod selection_column;
pub mod selector;
pub mod store;

pub use category::{Category, Offset};
pub use driver::{CompareSelector, DropSelector, Frontend, PickSelector};
pub use entry::{Entry, ItemEntry};
pub use input::{Action, InputEvent, NavigationMode};
pub use preset::{DefaultPreset, Preset, SelectionPreset};
pub use selector::{Selector, SelectorSettings};
pub use store::{CategoryId, ItemHandle, Store};
