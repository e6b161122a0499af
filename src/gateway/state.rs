use std::sync::Arc;

use crate::orders::OrderStore;

/// Gateway application state (shared)
#[derive(Clone)]
pub struct AppState {
    /// Order store handle
    pub store: Arc<dyn OrderStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }
}
