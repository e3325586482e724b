//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::client::RentalApi;
use crate::config::ApiConfig;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Backend the handlers read from
    pub api: Arc<dyn RentalApi>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(api: Arc<dyn RentalApi>, config: ApiConfig) -> Self {
        Self {
            api,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
