use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus counters for restaurant activity
// ============================================================================
//
// Tracks:
// - Catalog and order mutations
// - Bills written and failed writes
// - State loads that fell back to an empty restaurant
//
// Nothing is served over the network; `render` produces the text
// exposition format for whoever wants to print or ship it.
// ============================================================================

pub struct Metrics {
    registry: Registry,

    // Catalog Metrics
    pub menu_items_created: IntCounter,
    pub menu_items_deleted: IntCounter,

    // Order Metrics
    pub orders_created: IntCounter,
    pub orders_deleted: IntCounter,
    pub open_orders: IntGauge,

    // Billing Metrics
    pub bills_generated: IntCounter,
    pub bill_write_failures: IntCounter,

    // Persistence Metrics
    pub state_load_fallbacks: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let menu_items_created = IntCounter::new(
            "menu_items_created_total",
            "Total menu items added to the catalog",
        )?;
        registry.register(Box::new(menu_items_created.clone()))?;

        let menu_items_deleted = IntCounter::new(
            "menu_items_deleted_total",
            "Total menu items removed from the catalog",
        )?;
        registry.register(Box::new(menu_items_deleted.clone()))?;

        let orders_created = IntCounter::new("orders_created_total", "Total orders placed")?;
        registry.register(Box::new(orders_created.clone()))?;

        let orders_deleted = IntCounter::new("orders_deleted_total", "Total orders removed")?;
        registry.register(Box::new(orders_deleted.clone()))?;

        let open_orders = IntGauge::new("open_orders", "Orders currently in the order book")?;
        registry.register(Box::new(open_orders.clone()))?;

        let bills_generated = IntCounter::new(
            "bills_generated_total",
            "Total bills successfully written",
        )?;
        registry.register(Box::new(bills_generated.clone()))?;

        let bill_write_failures = IntCounter::new(
            "bill_write_failures_total",
            "Total bills that could not be written",
        )?;
        registry.register(Box::new(bill_write_failures.clone()))?;

        let state_load_fallbacks = IntCounter::new(
            "state_load_fallbacks_total",
            "Loads that started from an empty restaurant instead of saved state",
        )?;
        registry.register(Box::new(state_load_fallbacks.clone()))?;

        Ok(Self {
            registry,
            menu_items_created,
            menu_items_deleted,
            orders_created,
            orders_deleted,
            open_orders,
            bills_generated,
            bill_write_failures,
            state_load_fallbacks,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record a bill write outcome
    pub fn record_bill(&self, success: bool) {
        if success {
            self.bills_generated.inc();
        } else {
            self.bill_write_failures.inc();
        }
    }

    /// Prometheus text exposition of every registered metric
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("orders_created", &self.orders_created.get())
            .field("open_orders", &self.open_orders.get())
            .field("bills_generated", &self.bills_generated.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert_eq!(metrics.registry().gather().len(), 8);
    }

    #[test]
    fn test_record_bill() {
        let metrics = Metrics::new().unwrap();
        metrics.record_bill(true);
        metrics.record_bill(true);
        metrics.record_bill(false);

        assert_eq!(metrics.bills_generated.get(), 2);
        assert_eq!(metrics.bill_write_failures.get(), 1);
    }

    #[test]
    fn test_render_text_format() {
        let metrics = Metrics::new().unwrap();
        metrics.orders_created.inc();
        metrics.open_orders.set(1);

        let text = metrics.render().unwrap();
        assert!(text.contains("orders_created_total 1"));
        assert!(text.contains("open_orders 1"));
        assert!(text.contains("# HELP bills_generated_total"));
    }
}
