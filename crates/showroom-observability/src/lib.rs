//! Logging setup and load timing for the Showroom catalog.
//!
//! This crate provides:
//! - `LogConfig` / `init_logging` - Tracing subscriber installation
//! - `LoadTimer` / `LoadMetrics` - Timing and counts for one catalog load

mod logging;
mod metrics;

pub use logging::*;
pub use metrics::*;
