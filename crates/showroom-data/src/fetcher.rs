//! The fetch seam the catalog store loads through.

use async_trait::async_trait;

use crate::client::{FetchClient, FetchError, FetchPolicy};
use crate::source::CatalogSource;

/// Produces the raw bytes of a catalog document.
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Fetch the whole document.
    async fn fetch(&self) -> Result<Vec<u8>, FetchError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Fetches one fixed [`CatalogSource`] through a [`FetchClient`].
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    client: FetchClient,
    source: CatalogSource,
}

impl SourceFetcher {
    pub fn new(source: CatalogSource, policy: FetchPolicy) -> Result<Self, FetchError> {
        Ok(Self {
            client: FetchClient::with_policy(policy)?,
            source,
        })
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }
}

#[async_trait]
impl CatalogFetcher for SourceFetcher {
    async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        self.client.fetch(&self.source).await
    }

    fn describe(&self) -> String {
        self.source.to_string()
    }
}

/// Serves a document already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    bytes: Vec<u8>,
}

impl StaticFetcher {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl CatalogFetcher for StaticFetcher {
    async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("<memory: {} bytes>", self.bytes.len())
    }
}
