// ============================================================================
// Menu Domain - items, prices and the catalog
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod item;
pub mod catalog;
pub mod draft;

pub use value_objects::*;
pub use errors::*;
pub use item::*;
pub use catalog::*;
pub use draft::*;
