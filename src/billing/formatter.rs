use crate::domain::menu::{MenuItem, Price};
use crate::domain::order::Order;

/// Renders an order and its items as a plain-text bill.
///
/// ```text
/// BILL
/// Order ID: 1
/// Date: 2024-03-15 19:00:00 UTC
/// Table number: 4
/// Soup 2.5
/// Total cost: 2.5
/// ```
pub struct BillFormatter;

impl BillFormatter {
    pub fn format(order: &Order, items: &[&MenuItem]) -> String {
        let mut lines = vec![
            "BILL".to_string(),
            format!("Order ID: {}", order.order_id()),
            format!("Date: {}", order.date()),
            format!("Table number: {}", order.table()),
        ];

        lines.extend(
            items
                .iter()
                .map(|item| format!("{} {}", item.name(), item.resolve_price())),
        );

        let total: Price = items.iter().map(|item| item.resolve_price()).sum();
        lines.push(format!("Total cost: {}", total));

        lines.join("\n")
    }
}
