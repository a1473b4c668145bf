// ============================================================================
// Order Book Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OrderBookError {
    #[error("Order index {index} out of range for {len} orders")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Order not found: {0}")]
    NotFound(i32),
}
