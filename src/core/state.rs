//! Shared application state for the axum router.

use std::sync::Arc;

use crate::gallery::ImageStore;

/// Application state handed to every handler.
///
/// Cheaply cloneable; the store is shared behind an `Arc` so concurrent
/// requests operate on the same persisted list.
#[derive(Clone)]
pub struct AppState {
    store: Arc<ImageStore>,
}

impl AppState {
    pub fn new(store: Arc<ImageStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }
}
