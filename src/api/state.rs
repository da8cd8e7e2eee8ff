//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::dashboard::Dashboard;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Fetch-and-render pipeline
    pub dashboard: Arc<Dashboard>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dashboard: Arc<Dashboard>) -> Self {
        Self {
            dashboard,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
