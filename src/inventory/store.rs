//! Selector-owned storage
//!
//! Every item record and category a selector shows lives here. Columns and
//! entries refer to them through the copyable `ItemHandle` and `CategoryId`
//! indices, so moving rows between columns or clearing a column never leaves
//! anything dangling.

use super::category::{Category, Offset};
use crate::catalog::ItemRecord;

/// Index of an item record in a [`Store`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemHandle(usize);

impl ItemHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Index of a category in a [`Store`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(usize);

/// Arena of items and categories
#[derive(Debug, Default)]
pub struct Store {
    items: Vec<ItemRecord>,
    categories: Vec<Category>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a copy of an item record
    pub fn insert_item(&mut self, item: ItemRecord) -> ItemHandle {
        self.items.push(item);
        ItemHandle(self.items.len() - 1)
    }

    pub fn item(&self, handle: ItemHandle) -> &ItemRecord {
        &self.items[handle.0]
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemHandle, &ItemRecord)> {
        self.items.iter().enumerate().map(|(i, item)| (ItemHandle(i), item))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn category(&self, id: CategoryId) -> &Category {
        &self.categories[id.0]
    }

    pub fn find_category(&self, id: &str) -> Option<CategoryId> {
        self.categories.iter().position(|c| c.id == id).map(CategoryId)
    }

    /// Register a category, reusing an existing one with the same id
    pub fn intern_category(&mut self, category: Category) -> CategoryId {
        if let Some(existing) = self.find_category(&category.id) {
            return existing;
        }
        self.categories.push(category);
        CategoryId(self.categories.len() - 1)
    }

    /// Register a category that must not be shared with anything else
    pub fn insert_category(&mut self, category: Category) -> CategoryId {
        self.categories.push(category);
        CategoryId(self.categories.len() - 1)
    }

    /// Category for items of `base` found at `offset`
    ///
    /// Derived categories are memoized by id, so every spot at the same
    /// direction and distance shares one instance.
    pub fn naturalize(&mut self, base: &Category, offset: Offset) -> CategoryId {
        match base.naturalized(offset) {
            Some(derived) => self.intern_category(derived),
            None => self.intern_category(base.clone()),
        }
    }

    /// Sort rank used to order columns by category
    pub fn sort_rank(&self, id: CategoryId) -> i32 {
        self.category(id).sort_rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedupes_by_id() {
        let mut store = Store::new();
        let a = store.intern_category(Category::new("TOOLS", "TOOLS", 1));
        let b = store.intern_category(Category::new("TOOLS", "other name", 5));
        assert_eq!(a, b);
        assert_eq!(store.category(a).name, "TOOLS");
    }

    #[test]
    fn test_insert_category_is_distinct() {
        let mut store = Store::new();
        let a = store.intern_category(Category::new("X", "X", 0));
        let b = store.insert_category(Category::new("X", "X", 0));
        assert_ne!(a, b);
    }

    #[test]
    fn test_naturalize_memoizes() {
        let mut store = Store::new();
        let base = Category::new("DIRT", "DIRT", 100);
        let a = store.naturalize(&base, Offset::new(1, 0));
        let b = store.naturalize(&base, Offset::new(1, 0));
        let c = store.naturalize(&base, Offset::new(0, 1));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(store.category(a).id, "DIRT_1E");
        assert_eq!(store.sort_rank(a), 101);

        let here = store.naturalize(&base, Offset::ZERO);
        assert_eq!(store.category(here), &base);
    }

    #[test]
    fn test_items() {
        let mut store = Store::new();
        assert!(store.is_empty());
        let h = store.insert_item(ItemRecord::new("hammer", "TOOLS"));
        assert_eq!(store.item(h).name, "hammer");
        assert_eq!(store.items().count(), 1);
    }
}
