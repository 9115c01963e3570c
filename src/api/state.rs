use std::sync::Arc;

use crate::services::{Recommender, WatchStore};

/// Shared application state
///
/// Cloned into every connection task; all clones point at the same store.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Arc<WatchStore>,
    pub recommender: Recommender,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Recommender::default())
    }
}

impl AppState {
    /// Creates state around an empty watch store
    pub fn new(recommender: Recommender) -> Self {
        Self {
            store: Arc::new(WatchStore::new()),
            recommender,
        }
    }
}
