//! Catalog fetch client.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, warn};

use crate::retry::RetryPolicy;
use crate::source::CatalogSource;
use crate::timeout::{with_timeout, TimeoutConfig};

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Request error: {0}")]
    Request(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

/// Fetch policy combining timeout and retry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Timeout configuration.
    pub timeout: TimeoutConfig,
    /// Retry policy.
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    /// Create a new fetch policy.
    pub fn new(timeout: TimeoutConfig, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }
}

/// Reads catalog documents over HTTP or from disk.
///
/// Every attempt runs under the policy's total timeout; transient failures
/// are retried per the retry policy.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    policy: FetchPolicy,
}

impl FetchClient {
    /// Create a client with no timeout and no retries.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_policy(FetchPolicy::default())
    }

    pub fn with_policy(policy: FetchPolicy) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(connect) = policy.timeout.connect {
            builder = builder.connect_timeout(connect);
        }
        let http = builder.build()?;
        Ok(Self { http, policy })
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Fetch the raw document bytes.
    pub async fn fetch(&self, source: &CatalogSource) -> Result<Vec<u8>, FetchError> {
        let started = Instant::now();
        let mut attempt = 0;
        loop {
            let result = match with_timeout(self.policy.timeout.total, self.fetch_once(source)).await {
                Ok(result) => result,
                Err(e) => Err(FetchError::Timeout(e.to_string())),
            };

            match result {
                Ok(bytes) => {
                    debug!(
                        source = %source,
                        bytes = bytes.len(),
                        attempts = attempt + 1,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "fetched catalog document"
                    );
                    return Ok(bytes);
                }
                Err(e) if self.policy.retry.should_retry(&e, attempt) => {
                    let delay = self.policy.retry.backoff.delay_for_attempt(attempt);
                    warn!(
                        source = %source,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "catalog fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, source: &CatalogSource) -> Result<Vec<u8>, FetchError> {
        match source {
            CatalogSource::Url(url) => self.fetch_url(url).await,
            CatalogSource::File(path) => read_file(path).await,
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, FetchError> {
    tokio::fs::read(path).await.map_err(|source| FetchError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::{BackoffStrategy, RetryPolicy};
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve canned HTTP responses, one per connection, in order.
    async fn serve(responses: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
        });
        (format!("http://{}/data/products.json", addr), hits)
    }

    #[tokio::test]
    async fn test_fetch_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"products": []}"#).unwrap();

        let client = FetchClient::new().unwrap();
        let bytes = client
            .fetch(&CatalogSource::File(file.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(bytes, br#"{"products": []}"#);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = FetchClient::new().unwrap();
        let err = client
            .fetch(&CatalogSource::File(dir.path().join("missing.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[tokio::test]
    async fn test_fetch_url() {
        let (url, _) = serve(vec![(200, r#"{"products": [{"id": 1}]}"#)]).await;
        let client = FetchClient::new().unwrap();
        let bytes = client.fetch(&CatalogSource::parse(&url)).await.unwrap();
        assert_eq!(bytes, br#"{"products": [{"id": 1}]}"#);
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let (url, _) = serve(vec![(404, "not found")]).await;
        let client = FetchClient::new().unwrap();
        let err = client.fetch(&CatalogSource::parse(&url)).await.unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let (url, hits) = serve(vec![(503, "busy"), (200, "{}")]).await;
        let policy = FetchPolicy::new(
            TimeoutConfig::default(),
            RetryPolicy::new(2).with_backoff(BackoffStrategy::Fixed(Duration::from_millis(5))),
        );
        let client = FetchClient::with_policy(policy).unwrap();
        let bytes = client.fetch(&CatalogSource::parse(&url)).await.unwrap();
        assert_eq!(bytes, b"{}");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_total_timeout() {
        // Accepts the connection but never answers.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/products.json", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let policy = FetchPolicy::new(
            TimeoutConfig::new(None, Some(Duration::from_millis(50))),
            RetryPolicy::none(),
        );
        let client = FetchClient::with_policy(policy).unwrap();
        let err = client.fetch(&CatalogSource::parse(&url)).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)));
    }
}
