// ============================================================================
// Billing - bill text and where it is written
// ============================================================================

mod formatter;
mod sink;

use std::path::PathBuf;

pub use formatter::BillFormatter;
pub use sink::{BillSink, FileBillSink};

#[derive(Debug, thiserror::Error)]
pub enum BillError {
    #[error("Failed to write bill to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot bill unknown order: {0}")]
    OrderNotFound(i32),
}
