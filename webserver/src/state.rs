//! Webserver state shared by every handler

use std::sync::Arc;
use std::time::Instant;

use crate::traits::CatalogService;

/// Core webserver state
pub struct WebServerState<C: CatalogService> {
    pub catalog: Arc<C>,
    pub server_start_time: Instant,
}

impl<C: CatalogService> WebServerState<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            server_start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }
}

impl<C: CatalogService> Clone for WebServerState<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            server_start_time: self.server_start_time,
        }
    }
}
