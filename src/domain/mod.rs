// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// - menu: menu items, prices and the catalog
// - order: orders and the order book
// - restaurant: the aggregate the presentation layer talks to
//
// Nothing here does I/O; bills and saved state leave through the
// billing and persistence modules.
//
// ============================================================================

pub mod menu;
pub mod order;
pub mod restaurant;

pub use restaurant::{ObserverId, Restaurant};
