// ============================================================================
// Catalog Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogError {
    #[error("Menu item index {index} out of range for catalog of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Menu item not found: {0}")]
    NotFound(String),
}
