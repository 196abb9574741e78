//! Store configuration.

use std::time::Duration;

use showroom_catalog::catalog::ImageFallbacks;

/// Configuration for a [`CatalogStore`](crate::CatalogStore).
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Upper bound on one load, fetch included. `None` waits indefinitely.
    pub load_timeout: Option<Duration>,
    /// Image rewriting applied while normalizing.
    pub fallbacks: ImageFallbacks,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }

    pub fn with_fallbacks(mut self, fallbacks: ImageFallbacks) -> Self {
        self.fallbacks = fallbacks;
        self
    }
}
