// ============================================================================
// Order Domain - orders and the items placed against them
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod order_book;

pub use value_objects::*;
pub use errors::*;
pub use order_book::*;
