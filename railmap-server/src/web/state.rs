//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedDatasets;

/// Shared application state.
///
/// Holds the datasets loaded at startup. Nothing in it is mutated after
/// construction apart from the payload cache.
#[derive(Clone)]
pub struct AppState {
    /// Rail and station datasets with their payload cache
    pub datasets: Arc<CachedDatasets>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(datasets: CachedDatasets) -> Self {
        Self {
            datasets: Arc::new(datasets),
        }
    }
}
