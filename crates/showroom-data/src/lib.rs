//! Catalog document fetching with timeouts and retries.
//!
//! This crate provides:
//! - `CatalogSource` - Where the catalog document lives (URL or file)
//! - `FetchClient` - HTTP and file reads with timeout/retry
//! - `CatalogFetcher` - The seam the catalog store loads through
//! - `TimeoutConfig` - Connect and total timeouts
//! - `RetryPolicy` - Retry strategies

mod client;
mod fetcher;
mod retry;
mod source;
mod timeout;

pub use client::*;
pub use fetcher::*;
pub use retry::*;
pub use source::*;
pub use timeout::*;
