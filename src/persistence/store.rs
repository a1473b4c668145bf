use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{save, try_load, PersistenceError};
use crate::domain::Restaurant;
use crate::metrics::Metrics;

/// Somewhere the restaurant lives between process runs.
pub trait RestaurantStore {
    /// Saved state, or a fresh restaurant if there is none to read.
    fn load(&self) -> Restaurant;

    fn save(&self, restaurant: &Restaurant) -> Result<(), PersistenceError>;
}

/// Single-file store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    metrics: Option<Arc<Metrics>>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    fn fresh(&self) -> Restaurant {
        if let Some(metrics) = &self.metrics {
            metrics.state_load_fallbacks.inc();
        }
        Restaurant::new()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RestaurantStore for FileStore {
    fn load(&self) -> Restaurant {
        match fs::read(&self.path) {
            Ok(blob) => match try_load(&blob) {
                Ok(restaurant) => {
                    tracing::info!(
                        path = %self.path.display(),
                        menu_items = restaurant.menu_item_count(),
                        orders = restaurant.order_count(),
                        "Restaurant state loaded"
                    );
                    restaurant
                }
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Saved state unreadable, starting fresh"
                    );
                    self.fresh()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No saved state, starting fresh");
                Restaurant::new()
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Could not read saved state, starting fresh"
                );
                self.fresh()
            }
        }
    }

    fn save(&self, restaurant: &Restaurant) -> Result<(), PersistenceError> {
        let blob = save(restaurant)?;
        fs::write(&self.path, blob)?;

        tracing::info!(
            path = %self.path.display(),
            menu_items = restaurant.menu_item_count(),
            orders = restaurant.order_count(),
            "Restaurant state saved"
        );
        Ok(())
    }
}
