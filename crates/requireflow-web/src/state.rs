//! Application state.

use requireflow_core::Workspace;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub ws: Arc<Workspace>,
}

impl AppState {
    pub fn new(ws: Workspace) -> Self {
        Self { ws: Arc::new(ws) }
    }
}
