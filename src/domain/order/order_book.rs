use serde::{Deserialize, Serialize};

use crate::domain::menu::{ItemResolver, MenuItem, MenuItemId, Price};
use super::errors::OrderBookError;
use super::value_objects::Order;

// ============================================================================
// Order Book - insertion-ordered Order -> menu item references
// ============================================================================
//
// Re-inserting an order equal to an existing key overwrites its item list
// and keeps the key's original position.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct OrderEntry {
    order: Order,
    items: Vec<MenuItemId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    entries: Vec<OrderEntry>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns `true` only when the order was new.
    pub fn create(&mut self, order: Order, items: Vec<MenuItemId>) -> bool {
        match self.entries.iter_mut().find(|entry| entry.order == order) {
            Some(existing) => {
                tracing::debug!(
                    order_id = order.order_id(),
                    items = items.len(),
                    "Order already present, overwriting items"
                );
                existing.items = items;
                false
            }
            None => {
                tracing::debug!(
                    order_id = order.order_id(),
                    table = order.table(),
                    items = items.len(),
                    "Order created"
                );
                self.entries.push(OrderEntry { order, items });
                true
            }
        }
    }

    /// Sum of the stored prices of the order's items. References that no
    /// longer resolve contribute nothing.
    pub fn compute_total<R>(&self, order: &Order, resolver: &R) -> Result<Price, OrderBookError>
    where
        R: ItemResolver + ?Sized,
    {
        let items = self
            .resolve_items(order, resolver)
            .ok_or(OrderBookError::NotFound(order.order_id()))?;

        Ok(items.iter().map(|item| item.resolve_price()).sum())
    }

    /// Remove the order if present. Returns whether anything was removed.
    pub fn delete(&mut self, order: &Order) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.order != order);
        let removed = self.entries.len() != before;

        if removed {
            tracing::debug!(order_id = order.order_id(), "Order deleted");
        }

        removed
    }

    /// Updating an order by position has never been supported: this accepts
    /// the inputs, changes nothing, and reports success.
    pub fn edit(
        &mut self,
        index: usize,
        order: &Order,
        items: &[MenuItemId],
    ) -> Result<(), OrderBookError> {
        tracing::debug!(
            index = index,
            order_id = order.order_id(),
            items = items.len(),
            "Order edit requested; editing orders is not supported"
        );
        Ok(())
    }

    pub fn get_by_position(&self, index: usize) -> Result<&Order, OrderBookError> {
        self.entries
            .get(index)
            .map(|entry| &entry.order)
            .ok_or(OrderBookError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    pub fn get_items(&self, order: &Order) -> Option<&[MenuItemId]> {
        self.entries
            .iter()
            .find(|entry| &entry.order == order)
            .map(|entry| entry.items.as_slice())
    }

    /// The order's items that are still in the catalog, in list order.
    pub fn resolve_items<'a, R>(&self, order: &Order, resolver: &'a R) -> Option<Vec<&'a MenuItem>>
    where
        R: ItemResolver + ?Sized,
    {
        let ids = self.get_items(order)?;
        let items = ids
            .iter()
            .filter_map(|id| {
                let item = resolver.resolve(*id);
                if item.is_none() {
                    tracing::warn!(
                        order_id = order.order_id(),
                        item_id = %id,
                        "Order references a menu item no longer in catalog"
                    );
                }
                item
            })
            .collect();

        Some(items)
    }

    /// One past the highest order id in the book, starting at 1.
    /// `None` once `i32::MAX` is taken.
    pub fn next_order_id(&self) -> Option<i32> {
        self.orders()
            .map(Order::order_id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.entries.iter().map(|entry| &entry.order)
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
