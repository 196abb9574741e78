//! Timing and counts for catalog loads.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Measures one catalog load.
#[derive(Debug, Clone)]
pub struct LoadTimer {
    source: String,
    started: Instant,
    started_at: DateTime<Utc>,
}

impl LoadTimer {
    /// Start timing a load from `source`.
    pub fn start(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Finish a successful load.
    pub fn succeeded(self, products: usize, ar_products: usize, skipped: usize) -> LoadMetrics {
        LoadMetrics {
            duration_ms: self.elapsed().as_millis() as u64,
            source: self.source,
            started_at: self.started_at,
            products,
            ar_products,
            skipped,
            error: None,
        }
    }

    /// Finish a failed load.
    pub fn failed(self, error: impl Into<String>) -> LoadMetrics {
        LoadMetrics {
            duration_ms: self.elapsed().as_millis() as u64,
            source: self.source,
            started_at: self.started_at,
            products: 0,
            ar_products: 0,
            skipped: 0,
            error: Some(error.into()),
        }
    }
}

/// Summary of one catalog load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadMetrics {
    pub source: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// Products in the published catalog.
    pub products: usize,
    pub ar_products: usize,
    /// Raw records dropped during normalization.
    pub skipped: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoadMetrics {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Emit the metrics as a single log event.
    pub fn log(&self) {
        match &self.error {
            None => info!(
                source = %self.source,
                products = self.products,
                ar_products = self.ar_products,
                skipped = self.skipped,
                duration_ms = self.duration_ms,
                "catalog loaded"
            ),
            Some(e) => error!(
                source = %self.source,
                duration_ms = self.duration_ms,
                error = %e,
                "catalog load failed, serving empty catalog"
            ),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.source.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_metrics() {
        let timer = LoadTimer::start("public/data/products.json");
        let metrics = timer.succeeded(12, 3, 1);
        assert!(metrics.is_success());
        assert_eq!(metrics.products, 12);
        assert_eq!(metrics.ar_products, 3);
        assert_eq!(metrics.skipped, 1);

        let json: serde_json::Value = serde_json::from_str(&metrics.to_json()).unwrap();
        assert_eq!(json["source"], "public/data/products.json");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failed_metrics() {
        let metrics = LoadTimer::start("https://shop.example/products.json").failed("HTTP error: 500");
        assert!(!metrics.is_success());
        assert_eq!(metrics.products, 0);
        assert_eq!(metrics.error.as_deref(), Some("HTTP error: 500"));
    }
}
