use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Value Objects
// ============================================================================

/// Identity under which menu items are grouped for pricing and billing.
///
/// Two orders are equal only when id, timestamp (to the nanosecond) and
/// table all match. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    order_id: i32,
    date: DateTime<Utc>,
    table: i32,
}

impl Order {
    pub fn new(order_id: i32, date: DateTime<Utc>, table: i32) -> Self {
        Self {
            order_id,
            date,
            table,
        }
    }

    /// Order stamped with the current time.
    pub fn placed_now(order_id: i32, table: i32) -> Self {
        Self::new(order_id, Utc::now(), table)
    }

    pub fn order_id(&self) -> i32 {
        self.order_id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn table(&self) -> i32 {
        self.table
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
