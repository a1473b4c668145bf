use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::billing::{BillError, BillFormatter, BillSink};
use crate::metrics::Metrics;
use super::menu::draft::split_names;
use super::menu::{Catalog, CatalogError, MenuItem, MenuItemDraft, MenuItemId, Price};
use super::order::{Order, OrderBook, OrderBookError};

// ============================================================================
// Restaurant Aggregate - catalog + order book, the unit of persistence
// ============================================================================
//
// Everything the presentation layer does goes through here. Observers are
// called inline after an order is created, with no payload; they re-query
// the restaurant themselves once the call has returned. Observers and
// metrics are process-local and never persisted.
//
// ============================================================================

/// Handle returned by [`Restaurant::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
struct Observers {
    next_id: u64,
    callbacks: Vec<(ObserverId, Box<dyn Fn()>)>,
}

impl Observers {
    fn notify(&self) {
        for (_, callback) in &self.callbacks {
            callback();
        }
    }
}

#[derive(Default, Serialize, Deserialize)]
pub struct Restaurant {
    catalog: Catalog,
    orders: OrderBook,

    #[serde(skip)]
    observers: Observers,

    #[serde(skip)]
    metrics: Option<Arc<Metrics>>,
}

impl Restaurant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.set_metrics(metrics);
        self
    }

    pub fn set_metrics(&mut self, metrics: Arc<Metrics>) {
        metrics.open_orders.set(self.orders.size() as i64);
        self.metrics = Some(metrics);
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn orders(&self) -> &OrderBook {
        &self.orders
    }

    // ------------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------------

    pub fn subscribe(&mut self, callback: impl Fn() + 'static) -> ObserverId {
        let id = ObserverId(self.observers.next_id);
        self.observers.next_id += 1;
        self.observers.callbacks.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.callbacks.len();
        self.observers.callbacks.retain(|(observer, _)| *observer != id);
        self.observers.callbacks.len() != before
    }

    // ------------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------------

    pub fn create_menu_item(&mut self, item: MenuItem) -> MenuItemId {
        let id = item.id();
        self.catalog.create(item);
        if let Some(metrics) = &self.metrics {
            metrics.menu_items_created.inc();
        }
        id
    }

    /// Build a leaf or composite from the admin form and append it.
    pub fn create_menu_item_from_draft(
        &mut self,
        draft: &MenuItemDraft,
    ) -> Result<MenuItemId, CatalogError> {
        let item = draft.build(&self.catalog)?;
        Ok(self.create_menu_item(item))
    }

    pub fn delete_menu_item(&mut self, index: usize) -> Result<MenuItem, CatalogError> {
        let removed = self.catalog.delete_at(index)?;
        if let Some(metrics) = &self.metrics {
            metrics.menu_items_deleted.inc();
        }
        Ok(removed)
    }

    pub fn edit_menu_item(&mut self, index: usize, item: MenuItem) -> Result<(), CatalogError> {
        self.catalog.replace_at(index, item)?;
        Ok(())
    }

    /// Rebuild the item at `index` from the admin form.
    pub fn edit_menu_item_from_draft(
        &mut self,
        index: usize,
        draft: &MenuItemDraft,
    ) -> Result<(), CatalogError> {
        let item = draft.build(&self.catalog)?;
        self.catalog.replace_at(index, item)?;
        Ok(())
    }

    pub fn menu_item_at(&self, index: usize) -> Result<&MenuItem, CatalogError> {
        self.catalog.get_at(index)
    }

    pub fn menu_item_by_name(&self, name: &str) -> Option<&MenuItem> {
        self.catalog.get_by_name(name)
    }

    pub fn menu_item_count(&self) -> usize {
        self.catalog.size()
    }

    pub fn describe_ingredients(&self, item: &MenuItem) -> String {
        item.describe_ingredients(&self.catalog)
    }

    /// Ids for a `"A, B"` list of item names. Names with no catalog match
    /// are dropped.
    pub fn resolve_item_names(&self, names: &str) -> Vec<MenuItemId> {
        split_names(names)
            .iter()
            .filter_map(|name| {
                let item = self.catalog.get_by_name(name);
                if item.is_none() {
                    tracing::debug!(name = %name, "Ignoring unknown menu item name");
                }
                item.map(MenuItem::id)
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------------

    pub fn create_order(&mut self, order: Order, items: Vec<MenuItemId>) {
        tracing::info!(
            order_id = order.order_id(),
            table = order.table(),
            items = items.len(),
            "Order placed"
        );

        let inserted = self.orders.create(order, items);

        if let Some(metrics) = &self.metrics {
            if inserted {
                metrics.orders_created.inc();
            }
            metrics.open_orders.set(self.orders.size() as i64);
        }

        self.observers.notify();
    }

    pub fn create_order_from_names(&mut self, order: Order, names: &str) {
        let items = self.resolve_item_names(names);
        self.create_order(order, items);
    }

    /// Always succeeds without changing anything; see [`OrderBook::edit`].
    pub fn edit_order(
        &mut self,
        index: usize,
        order: &Order,
        items: &[MenuItemId],
    ) -> Result<(), OrderBookError> {
        self.orders.edit(index, order, items)
    }

    pub fn delete_order(&mut self, order: &Order) -> bool {
        let removed = self.orders.delete(order);
        if removed {
            if let Some(metrics) = &self.metrics {
                metrics.orders_deleted.inc();
                metrics.open_orders.set(self.orders.size() as i64);
            }
        }
        removed
    }

    pub fn order_at(&self, index: usize) -> Result<&Order, OrderBookError> {
        self.orders.get_by_position(index)
    }

    pub fn order_items(&self, order: &Order) -> Option<Vec<&MenuItem>> {
        self.orders.resolve_items(order, &self.catalog)
    }

    pub fn order_count(&self) -> usize {
        self.orders.size()
    }

    pub fn compute_order_price(&self, order: &Order) -> Result<Price, OrderBookError> {
        self.orders.compute_total(order, &self.catalog)
    }

    // ------------------------------------------------------------------------
    // Billing
    // ------------------------------------------------------------------------

    pub fn bill_text(&self, order: &Order) -> Result<String, BillError> {
        let items = self
            .order_items(order)
            .ok_or(BillError::OrderNotFound(order.order_id()))?;
        Ok(BillFormatter::format(order, &items))
    }

    /// Render the order's bill and hand it to `sink` under `id`.
    ///
    /// Write failures are logged and returned; nothing else is affected.
    pub fn generate_bill<S>(&self, order: &Order, id: i32, sink: &S) -> Result<(), BillError>
    where
        S: BillSink + ?Sized,
    {
        let bill = self.bill_text(order)?;
        let result = sink.write_bill(id, &bill);

        if let Some(metrics) = &self.metrics {
            metrics.record_bill(result.is_ok());
        }

        match &result {
            Ok(()) => tracing::info!(order_id = order.order_id(), bill_id = id, "Bill generated"),
            Err(e) => tracing::error!(
                order_id = order.order_id(),
                bill_id = id,
                error = %e,
                "Failed to write bill"
            ),
        }

        result
    }
}

impl fmt::Debug for Restaurant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Restaurant")
            .field("catalog", &self.catalog)
            .field("orders", &self.orders)
            .field("observers", &self.observers.callbacks.len())
            .finish()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct MemorySink {
        bills: RefCell<Vec<(i32, String)>>,
    }

    impl BillSink for MemorySink {
        fn write_bill(&self, id: i32, bill: &str) -> Result<(), BillError> {
            self.bills.borrow_mut().push((id, bill.to_string()));
            Ok(())
        }
    }

    struct FailingSink;

    impl BillSink for FailingSink {
        fn write_bill(&self, id: i32, _bill: &str) -> Result<(), BillError> {
            Err(BillError::Io {
                path: format!("bill{id}.txt").into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    fn stocked() -> Restaurant {
        let mut restaurant = Restaurant::new();
        restaurant.create_menu_item(MenuItem::base("Soup", 2.50));
        restaurant.create_menu_item(MenuItem::base("Pasta", 3.00));
        restaurant.create_menu_item(MenuItem::base("Tea", 1.25));
        restaurant
    }

    #[test]
    fn test_observers_notified_after_order_creation() {
        let mut restaurant = stocked();
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        restaurant.subscribe(move || seen.set(seen.get() + 1));

        restaurant.create_order(Order::placed_now(1, 1), vec![]);
        restaurant.create_order(Order::placed_now(2, 1), vec![]);

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_unsubscribed_observer_is_not_called() {
        let mut restaurant = stocked();
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let id = restaurant.subscribe(move || seen.set(seen.get() + 1));

        assert!(restaurant.unsubscribe(id));
        assert!(!restaurant.unsubscribe(id));
        restaurant.create_order(Order::placed_now(1, 1), vec![]);

        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_other_mutations_do_not_notify() {
        let mut restaurant = stocked();
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        restaurant.subscribe(move || seen.set(seen.get() + 1));

        let order = Order::placed_now(1, 1);
        restaurant.create_menu_item(MenuItem::base("Cake", 4.0));
        restaurant.edit_order(0, &order, &[]).unwrap();
        restaurant.delete_order(&order);

        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_order_from_names_drops_unknown() {
        let mut restaurant = stocked();
        let order = Order::placed_now(1, 5);

        restaurant.create_order_from_names(order.clone(), "Soup, Pizza, Tea");

        let names: Vec<&str> = restaurant
            .order_items(&order)
            .unwrap()
            .into_iter()
            .map(MenuItem::name)
            .collect();
        assert_eq!(names, vec!["Soup", "Tea"]);
        assert_eq!(restaurant.compute_order_price(&order), Ok(Price(3.75)));
    }

    #[test]
    fn test_compute_price_and_bill_agree() {
        let mut restaurant = stocked();
        let order = Order::placed_now(1, 5);
        restaurant.create_order_from_names(order.clone(), "Soup, Pasta, Tea");

        let total = restaurant.compute_order_price(&order).unwrap();
        let bill = restaurant.bill_text(&order).unwrap();

        assert_eq!(total, Price(6.75));
        assert!(bill.ends_with("Total cost: 6.75"));
    }

    #[test]
    fn test_generate_bill_uses_sink() {
        let mut restaurant = stocked();
        let order = Order::placed_now(8, 2);
        restaurant.create_order_from_names(order.clone(), "Tea");
        let sink = MemorySink::default();

        restaurant.generate_bill(&order, order.order_id(), &sink).unwrap();

        let bills = sink.bills.borrow();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].0, 8);
        assert!(bills[0].1.starts_with("BILL\nOrder ID: 8\n"));
        assert!(bills[0].1.contains("\nTea 1.25\n"));
    }

    #[test]
    fn test_generate_bill_failure_is_reported() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let mut restaurant = stocked().with_metrics(metrics.clone());
        let order = Order::placed_now(1, 1);
        restaurant.create_order(order.clone(), vec![]);

        let err = restaurant.generate_bill(&order, 1, &FailingSink).unwrap_err();

        assert!(matches!(err, BillError::Io { .. }));
        assert_eq!(metrics.bill_write_failures.get(), 1);
        assert_eq!(restaurant.order_count(), 1);
    }

    #[test]
    fn test_bill_for_unknown_order() {
        let restaurant = stocked();
        let err = restaurant.bill_text(&Order::placed_now(3, 1)).unwrap_err();
        assert!(matches!(err, BillError::OrderNotFound(3)));
    }

    #[test]
    fn test_draft_round_trip_through_catalog() {
        let mut restaurant = stocked();
        let draft = MenuItemDraft::parse("Lunch", 0.0, "Soup, Tea");

        restaurant.create_menu_item_from_draft(&draft).unwrap();

        let lunch = restaurant.menu_item_by_name("Lunch").unwrap();
        assert_eq!(lunch.resolve_price(), Price(3.75));
        assert_eq!(restaurant.describe_ingredients(lunch), "Soup, Tea, ");
    }

    #[test]
    fn test_edit_menu_item_keeps_composite_price_stale() {
        let mut restaurant = stocked();
        restaurant
            .create_menu_item_from_draft(&MenuItemDraft::parse("Lunch", 0.0, "Soup, Tea"))
            .unwrap();

        restaurant
            .edit_menu_item_from_draft(0, &MenuItemDraft::parse("Soup", 9.0, "Soup"))
            .unwrap();

        let lunch = restaurant.menu_item_by_name("Lunch").unwrap();
        assert_eq!(lunch.resolve_price(), Price(3.75));
        assert_eq!(restaurant.menu_item_at(0).unwrap().resolve_price(), Price(9.0));
    }

    #[test]
    fn test_edit_item_from_its_own_name_has_no_cycle() {
        let mut restaurant = Restaurant::new();
        restaurant.create_menu_item(MenuItem::base("Soup", 2.0));
        restaurant.create_menu_item(MenuItem::base("Bread", 1.0));

        restaurant
            .edit_menu_item_from_draft(0, &MenuItemDraft::parse("Soup", 0.0, "Soup, Bread"))
            .unwrap();

        let soup = restaurant.menu_item_at(0).unwrap();
        assert!(soup.is_composite());
        assert!(!soup.children().contains(&soup.id()));
        assert_eq!(soup.resolve_price(), Price(3.0));
        assert_eq!(restaurant.describe_ingredients(soup), "Bread, ");
    }

    #[test]
    fn test_edited_item_no_longer_billed_under_old_reference() {
        let mut restaurant = stocked();
        let order = Order::placed_now(2, 3);
        restaurant.create_order_from_names(order.clone(), "Soup, Tea");

        restaurant
            .edit_menu_item(0, MenuItem::base("Soup", 9.0))
            .unwrap();

        assert_eq!(restaurant.compute_order_price(&order), Ok(Price(1.25)));
    }

    #[test]
    fn test_bill_skips_deleted_item() {
        let mut restaurant = stocked();
        let order = Order::placed_now(4, 2);
        restaurant.create_order_from_names(order.clone(), "Soup, Pasta, Tea");

        restaurant.delete_menu_item(1).unwrap();
        let bill = restaurant.bill_text(&order).unwrap();

        let item_lines: Vec<&str> = bill.lines().skip(4).collect();
        assert_eq!(item_lines, vec!["Soup 2.5", "Tea 1.25", "Total cost: 3.75"]);
        assert!(!bill.contains("Pasta"));
        assert_eq!(restaurant.compute_order_price(&order), Ok(Price(3.75)));
    }

    #[test]
    fn test_overwriting_order_is_not_counted_as_new() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let mut restaurant = stocked().with_metrics(metrics.clone());
        let order = Order::placed_now(1, 1);

        restaurant.create_order_from_names(order.clone(), "Soup");
        restaurant.create_order_from_names(order.clone(), "Tea");

        assert_eq!(metrics.orders_created.get(), 1);
        assert_eq!(metrics.open_orders.get(), 1);
        assert_eq!(restaurant.compute_order_price(&order), Ok(Price(1.25)));
    }

    #[test]
    fn test_metrics_track_mutations() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let mut restaurant = stocked().with_metrics(metrics.clone());
        let order = Order::placed_now(1, 1);

        restaurant.create_menu_item(MenuItem::base("Cake", 4.0));
        restaurant.delete_menu_item(0).unwrap();
        restaurant.create_order(order.clone(), vec![]);
        assert_eq!(metrics.open_orders.get(), 1);
        restaurant.delete_order(&order);

        assert_eq!(metrics.menu_items_created.get(), 1);
        assert_eq!(metrics.menu_items_deleted.get(), 1);
        assert_eq!(metrics.orders_created.get(), 1);
        assert_eq!(metrics.orders_deleted.get(), 1);
        assert_eq!(metrics.open_orders.get(), 0);
    }
}
