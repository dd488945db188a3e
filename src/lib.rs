//! satchel - terminal inventory selector
//!
//! A multi-column, paginated item picker with single-pick, compare and
//! drop-with-quantity drivers.

pub mod catalog;
pub mod config;
pub mod inventory;
pub mod ui;

pub use catalog::{Catalog, CatalogError, ItemRecord};
pub use config::Config;
