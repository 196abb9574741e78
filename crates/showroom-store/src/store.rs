//! The catalog store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use showroom_catalog::catalog::{
    normalize, Catalog, CatalogDocument, CatalogMetadata, PriceBounds, Product,
};
use showroom_catalog::discovery::{CatalogSummary, ProductGrid, ProductQuiz, QuizBuilder};
use showroom_catalog::search::{self, KeywordSearch, ScoredProduct, SearchOptions, SearchResults};
use showroom_catalog::{CatalogError, ProductId};
use showroom_data::CatalogFetcher;
use showroom_observability::{LoadMetrics, LoadTimer};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::state::{LoadOutcome, LoadState, Snapshot};

/// Shared, lazily loaded product catalog.
///
/// Cheap to clone; clones share the same catalog and load. The first
/// accessor call (or [`init`](Self::init)) starts the load in a background
/// task; every accessor waits until a catalog is published. A failed load
/// publishes an empty catalog, so waiting always ends.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<Inner>,
}

struct Inner {
    fetcher: Arc<dyn CatalogFetcher>,
    config: StoreConfig,
    state: watch::Sender<LoadState>,
    started: AtomicBool,
    /// Serializes loads so publishes happen in call order.
    loading: Mutex<()>,
}

impl CatalogStore {
    pub fn new(fetcher: Arc<dyn CatalogFetcher>, config: StoreConfig) -> Self {
        let (state, _) = watch::channel(LoadState::Pending);
        Self {
            inner: Arc::new(Inner {
                fetcher,
                config,
                state,
                started: AtomicBool::new(false),
                loading: Mutex::new(()),
            }),
        }
    }

    /// Start the initial load if nobody has, then wait for a catalog.
    ///
    /// Only the first call loads. Must be called within a Tokio runtime.
    pub async fn init(&self) -> Arc<Catalog> {
        if !self.inner.started.swap(true, Ordering::SeqCst) {
            self.spawn_load();
        }
        self.wait_ready().await
    }

    /// Fetch and normalize again, then swap the new catalog in.
    ///
    /// Readers keep seeing the previous catalog until the new one is
    /// complete. A failed reload publishes an empty catalog. The load runs
    /// in its own task, so dropping this future does not abandon it.
    pub async fn reload(&self) -> Arc<Catalog> {
        self.inner.started.store(true, Ordering::SeqCst);
        match self.spawn_load().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "catalog reload task failed");
                self.wait_ready().await
            }
        }
    }

    fn spawn_load(&self) -> JoinHandle<Arc<Catalog>> {
        let inner = self.inner.clone();
        tokio::spawn(async move {
            let guard = PublishGuard(&inner);
            let catalog = inner.load().await;
            drop(guard);
            catalog
        })
    }

    /// Whether a catalog has been published.
    pub fn is_ready(&self) -> bool {
        self.inner.state.borrow().is_ready()
    }

    /// How the most recent load went.
    pub fn last_outcome(&self) -> LoadOutcome {
        LoadOutcome::from_state(&self.inner.state.borrow())
    }

    /// Timing and counts of the most recent load.
    pub fn last_metrics(&self) -> Option<LoadMetrics> {
        self.inner
            .state
            .borrow()
            .snapshot()
            .map(|snapshot| snapshot.metrics.clone())
    }

    /// A receiver that observes every publish.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.inner.state.subscribe()
    }

    /// The current catalog, loading it first if needed.
    pub async fn catalog(&self) -> Arc<Catalog> {
        let published = self
            .inner
            .state
            .borrow()
            .snapshot()
            .map(|snapshot| snapshot.catalog.clone());
        match published {
            Some(catalog) => catalog,
            None => self.init().await,
        }
    }

    async fn wait_ready(&self) -> Arc<Catalog> {
        let mut rx = self.inner.state.subscribe();
        let catalog = match rx.wait_for(LoadState::is_ready).await {
            Ok(state) => state
                .snapshot()
                .map(|snapshot| snapshot.catalog.clone())
                .unwrap_or_default(),
            // The sender lives as long as `inner`, which we hold.
            Err(_) => Arc::new(Catalog::empty()),
        };
        catalog
    }

    // Accessors

    pub async fn all_products(&self) -> Vec<Product> {
        self.catalog().await.products().to_vec()
    }

    /// Products from the AR collection.
    pub async fn ar_products(&self) -> Vec<Product> {
        self.catalog().await.ar_products().cloned().collect()
    }

    /// Look up one product. Ids present in both collections resolve to the
    /// AR record.
    pub async fn product(&self, id: &ProductId) -> Option<Product> {
        self.catalog().await.get(id).cloned()
    }

    pub async fn products_by_category(&self, category: &str) -> Vec<Product> {
        self.catalog().await.by_category(category).cloned().collect()
    }

    pub async fn categories(&self) -> Vec<String> {
        self.catalog().await.categories()
    }

    pub async fn ar_categories(&self) -> Vec<String> {
        self.catalog().await.ar_categories()
    }

    pub async fn brands(&self) -> Vec<String> {
        self.catalog().await.brands()
    }

    /// Lowest and highest price, zeros when the catalog is empty.
    pub async fn price_range(&self) -> PriceBounds {
        self.catalog().await.price_bounds()
    }

    pub async fn metadata(&self) -> Option<CatalogMetadata> {
        self.catalog().await.metadata().cloned()
    }

    // Queries

    /// Plain text search.
    pub async fn search(&self, query: &str) -> Vec<Product> {
        self.search_products(&SearchOptions::new().with_query(query)).await
    }

    pub async fn search_products(&self, options: &SearchOptions) -> Vec<Product> {
        search::search(self.catalog().await.products(), options)
    }

    /// Like [`search_products`](Self::search_products), with the match
    /// count before pagination.
    pub async fn search_page(&self, options: &SearchOptions) -> SearchResults<Product> {
        search::search_with_total(self.catalog().await.products(), options)
    }

    pub async fn keyword_search(&self, query: &KeywordSearch) -> Vec<ScoredProduct> {
        query.run(self.catalog().await.products())
    }

    pub async fn top_discounts(&self, limit: usize) -> Vec<Product> {
        search::top_discounts(self.catalog().await.products(), limit)
    }

    pub async fn top_in_category(&self, category: &str, limit: usize) -> Vec<Product> {
        search::top_in_category(self.catalog().await.products(), category, limit)
    }

    pub async fn top_in_price_range(&self, min: f64, max: f64, limit: usize) -> Vec<Product> {
        search::top_in_price_range(self.catalog().await.products(), min, max, limit)
    }

    // Discovery

    pub async fn summary(&self) -> CatalogSummary {
        let catalog = self.catalog().await;
        CatalogSummary::from_catalog(&catalog)
    }

    /// A grid of the given products, in the given order. Unknown ids are
    /// skipped.
    pub async fn grid(&self, title: &str, ids: &[ProductId]) -> ProductGrid {
        let catalog = self.catalog().await;
        ProductGrid::new(title, ids.iter().filter_map(|id| catalog.get(id)))
    }

    pub async fn build_quiz(&self, builder: &QuizBuilder) -> Result<ProductQuiz, CatalogError> {
        let catalog = self.catalog().await;
        builder.build(catalog.products(), &mut rand::thread_rng())
    }
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("source", &self.inner.fetcher.describe())
            .field("outcome", &self.last_outcome())
            .finish()
    }
}

impl Inner {
    /// Run one load and publish its result.
    async fn load(&self) -> Arc<Catalog> {
        let _loading = self.loading.lock().await;

        let timer = LoadTimer::start(self.fetcher.describe());
        let (catalog, metrics) = match self.fetch_catalog().await {
            Ok((catalog, skipped)) => {
                let ar = catalog.ar_products().count();
                let metrics = timer.succeeded(catalog.len(), ar, skipped);
                (catalog, metrics)
            }
            Err(e) => (Catalog::empty(), timer.failed(e.to_string())),
        };
        metrics.log();

        let catalog = Arc::new(catalog);
        self.state.send_replace(LoadState::Ready(Arc::new(Snapshot {
            catalog: catalog.clone(),
            metrics,
        })));
        catalog
    }

    /// Fetch, parse and normalize. Returns the catalog and the number of
    /// records normalization dropped.
    async fn fetch_catalog(&self) -> Result<(Catalog, usize), StoreError> {
        let bytes = match self.config.load_timeout {
            Some(limit) => tokio::time::timeout(limit, self.fetcher.fetch())
                .await
                .map_err(|_| StoreError::Timeout(limit))??,
            None => self.fetcher.fetch().await?,
        };
        debug!(bytes = bytes.len(), "parsing catalog document");

        let document = CatalogDocument::from_slice(&bytes)?;
        let records = document.record_count();
        let catalog = normalize(document, &self.config.fallbacks);
        let skipped = records.saturating_sub(catalog.len());
        Ok((catalog, skipped))
    }
}

/// Publishes an empty catalog if the load task ends without publishing,
/// e.g. on panic or runtime shutdown.
struct PublishGuard<'a>(&'a Inner);

impl Drop for PublishGuard<'_> {
    fn drop(&mut self) {
        if self.0.state.borrow().is_ready() {
            return;
        }
        warn!("catalog load ended without a result, serving empty catalog");
        let metrics = LoadTimer::start(self.0.fetcher.describe()).failed("load aborted");
        self.0.state.send_replace(LoadState::Ready(Arc::new(Snapshot {
            catalog: Arc::new(Catalog::empty()),
            metrics,
        })));
    }
}
