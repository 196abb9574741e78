//! Load-once catalog store with load-await accessors.
//!
//! `CatalogStore` owns the catalog lifecycle: one load on first use, an
//! explicit `reload`, and a readiness signal every accessor waits on. Loads
//! never fail from the caller's point of view; a fetch or parse failure is
//! logged and publishes an empty catalog.
//!
//! ```rust,ignore
//! let fetcher = SourceFetcher::new(CatalogSource::parse(url), FetchPolicy::default())?;
//! let store = CatalogStore::new(Arc::new(fetcher), StoreConfig::default());
//!
//! // Waits for the load started by the first call.
//! let chairs = store.products_by_category("furniture").await;
//! ```

mod config;
mod error;
mod state;
mod store;

pub use config::StoreConfig;
pub use state::{LoadOutcome, LoadState, Snapshot};
pub use store::CatalogStore;
