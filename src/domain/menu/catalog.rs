use serde::{Deserialize, Serialize};

use super::errors::CatalogError;
use super::item::{ItemResolver, MenuItem};
use super::value_objects::MenuItemId;

// ============================================================================
// Catalog - ordered, index-addressable menu
// ============================================================================
//
// Insertion order is preserved. Names are not unique; lookup by name
// returns the last match. Deleting an item leaves references to it in
// composites and orders dangling; they resolve to `None`.
//
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item.
    pub fn create(&mut self, item: MenuItem) {
        tracing::debug!(
            item_id = %item.id(),
            name = %item.name(),
            price = %item.resolve_price(),
            "Menu item created"
        );
        self.items.push(item);
    }

    /// Remove the item at `index`, returning it.
    pub fn delete_at(&mut self, index: usize) -> Result<MenuItem, CatalogError> {
        self.check_index(index)?;
        let removed = self.items.remove(index);

        tracing::debug!(
            index = index,
            item_id = %removed.id(),
            name = %removed.name(),
            "Menu item deleted"
        );

        Ok(removed)
    }

    /// Overwrite the item at `index`, returning the one it replaced.
    ///
    /// The replacement keeps its own id. References to the replaced item
    /// stop resolving, exactly as if it had been deleted.
    pub fn replace_at(&mut self, index: usize, item: MenuItem) -> Result<MenuItem, CatalogError> {
        self.check_index(index)?;
        let replaced = std::mem::replace(&mut self.items[index], item);

        tracing::debug!(
            index = index,
            old_item_id = %replaced.id(),
            new_item_id = %self.items[index].id(),
            "Menu item replaced"
        );

        Ok(replaced)
    }

    pub fn get_at(&self, index: usize) -> Result<&MenuItem, CatalogError> {
        self.items.get(index).ok_or(CatalogError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    pub fn get_at_mut(&mut self, index: usize) -> Result<&mut MenuItem, CatalogError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(CatalogError::IndexOutOfRange { index, len })
    }

    /// Last item whose name equals `name` exactly.
    pub fn get_by_name(&self, name: &str) -> Option<&MenuItem> {
        self.items.iter().rev().find(|item| item.name() == name)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<(), CatalogError> {
        if index >= self.items.len() {
            return Err(CatalogError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

impl ItemResolver for Catalog {
    fn resolve(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id() == id)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
