// ============================================================================
// Restaurant Billing
// ============================================================================
//
// Menu catalog, orders placed against it, derived prices and itemized
// bills. Presentation, bill files and saved state sit outside the domain
// and talk to it through `Restaurant`.
//
// ============================================================================

pub mod billing;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod persistence;
pub mod utils;

pub use billing::{BillError, BillFormatter, BillSink, FileBillSink};
pub use config::AppConfig;
pub use domain::menu::{Catalog, CatalogError, ItemResolver, MenuItem, MenuItemDraft, MenuItemId, Price};
pub use domain::order::{Order, OrderBook, OrderBookError};
pub use domain::{ObserverId, Restaurant};
pub use metrics::Metrics;
pub use persistence::{FileStore, PersistenceError, RestaurantStore};
