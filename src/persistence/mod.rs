// ============================================================================
// Persistence - save and restore the whole restaurant
// ============================================================================
//
// The saved form is an opaque blob (JSON bytes). Loading never fails: a
// missing, empty or corrupt blob starts a fresh, empty restaurant.
//
// ============================================================================

mod store;

pub use store::{FileStore, RestaurantStore};

use crate::domain::Restaurant;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("I/O error on saved state: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize restaurant: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub fn save(restaurant: &Restaurant) -> Result<Vec<u8>, PersistenceError> {
    Ok(serde_json::to_vec(restaurant)?)
}

/// Restore a restaurant, falling back to an empty one on any decode error.
pub fn load(blob: &[u8]) -> Restaurant {
    try_load(blob).unwrap_or_else(|e| {
        tracing::warn!(error = %e, bytes = blob.len(), "Saved state unreadable, starting fresh");
        Restaurant::new()
    })
}

pub fn try_load(blob: &[u8]) -> Result<Restaurant, PersistenceError> {
    Ok(serde_json::from_slice(blob)?)
}
