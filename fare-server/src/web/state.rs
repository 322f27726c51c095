//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedPlanner;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Fare planner with its result cache
    pub planner: Arc<CachedPlanner>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: CachedPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }
}
