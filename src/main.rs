use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use restaurant_billing::utils::Cursor;
use restaurant_billing::{
    AppConfig, FileBillSink, FileStore, MenuItemDraft, Metrics, Order, RestaurantStore,
};

fn main() -> anyhow::Result<()> {
    // Default to INFO, override with RUST_LOG
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,restaurant_billing=debug")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        data_file = %config.data_file.display(),
        bill_dir = %config.bill_dir.display(),
        "Starting restaurant"
    );

    let metrics = Arc::new(Metrics::new()?);
    let store = FileStore::new(&config.data_file).with_metrics(metrics.clone());
    let sink = FileBillSink::new(&config.bill_dir);

    // === 1. Restore saved state (or start empty) ===
    let mut restaurant = store.load().with_metrics(metrics.clone());

    let order_view_stale = Rc::new(Cell::new(false));
    let flag = order_view_stale.clone();
    restaurant.subscribe(move || flag.set(true));

    // === 2. Stock the menu on first run ===
    if restaurant.menu_item_count() == 0 {
        for (name, price) in [("Soup", 2.50), ("Pasta", 3.00), ("Tea", 1.25)] {
            restaurant.create_menu_item_from_draft(&MenuItemDraft::parse(name, price, name))?;
        }
        restaurant.create_menu_item_from_draft(&MenuItemDraft::parse(
            "Daily Menu",
            0.0,
            "Soup, Pasta, Tea",
        ))?;
    }

    let mut item_cursor = Cursor::new("item");
    let catalog = restaurant.catalog();
    let mut shown = item_cursor.current(catalog.size(), |i| catalog.get_at(i));
    while let Ok(item) = shown {
        tracing::debug!(
            name = %item.name(),
            price = %item.resolve_price(),
            ingredients = %item.describe_ingredients(catalog),
            "Menu item"
        );
        shown = item_cursor.next(catalog.size(), |i| catalog.get_at(i));
    }

    // === 3. Place an order and bill it ===
    let next_id = restaurant
        .orders()
        .next_order_id()
        .ok_or_else(|| anyhow::anyhow!("No order ids left after {}", i32::MAX))?;
    let order = Order::placed_now(next_id, 4);
    restaurant.create_order_from_names(order.clone(), "Soup, Daily Menu, Tea");

    if order_view_stale.replace(false) {
        tracing::info!(orders = restaurant.order_count(), "Order list refreshed");
    }

    match restaurant.compute_order_price(&order) {
        Ok(total) => tracing::info!(order_id = order.order_id(), total = %total, "Order cost"),
        Err(e) => tracing::warn!(error = %e, "Could not price order"),
    }

    // Bill write failures are reported, not fatal
    if let Err(e) = restaurant.generate_bill(&order, order.order_id(), &sink) {
        tracing::warn!(error = %e, "Bill not written");
    }

    // === 4. Save on exit ===
    store.save(&restaurant)?;

    let exposition = metrics.render()?;
    tracing::debug!(metrics = %exposition, "Session metrics");
    tracing::info!("Restaurant closed");

    Ok(())
}
