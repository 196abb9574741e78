//! Published load state.

use std::sync::Arc;

use showroom_catalog::catalog::Catalog;
use showroom_observability::LoadMetrics;

/// What the store's readiness channel carries.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// No load has completed yet.
    #[default]
    Pending,
    /// A catalog is published. Failed loads publish an empty one.
    Ready(Arc<Snapshot>),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub(crate) fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        match self {
            Self::Ready(snapshot) => Some(snapshot),
            Self::Pending => None,
        }
    }
}

/// A published catalog and how it was obtained.
#[derive(Debug)]
pub struct Snapshot {
    pub catalog: Arc<Catalog>,
    pub metrics: LoadMetrics,
}

/// Result of the most recent load, for loading and error states in a UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No load has completed yet.
    Pending,
    Loaded { products: usize },
    /// The load failed and the store is serving an empty catalog.
    Failed { reason: String },
}

impl LoadOutcome {
    pub(crate) fn from_state(state: &LoadState) -> Self {
        match state.snapshot() {
            None => Self::Pending,
            Some(snapshot) => match &snapshot.metrics.error {
                None => Self::Loaded {
                    products: snapshot.metrics.products,
                },
                Some(reason) => Self::Failed {
                    reason: reason.clone(),
                },
            },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
