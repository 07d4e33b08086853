//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::CatalogStore;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Data access layer shared by every request.
    pub store: Arc<dyn CatalogStore>,
}

impl AppState {
    /// Wraps a store for injection into the router.
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}
