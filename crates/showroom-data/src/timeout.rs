//! Timeout configuration for fetch operations.

use std::future::Future;
use std::time::Duration;

/// Timeout configuration for a fetch operation.
///
/// Both limits are optional. With no total timeout a fetch waits as long as
/// the transport does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout, HTTP only.
    pub connect: Option<Duration>,
    /// Total timeout per attempt.
    pub total: Option<Duration>,
}

impl TimeoutConfig {
    /// Create a new timeout configuration.
    pub fn new(connect: Option<Duration>, total: Option<Duration>) -> Self {
        Self { connect, total }
    }

    /// No limits at all.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Create from a single total timeout.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: Some(total / 4),
            total: Some(total),
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::from_total(Duration::from_millis(millis))
    }

    pub fn is_unbounded(&self) -> bool {
        self.connect.is_none() && self.total.is_none()
    }
}

/// Error when a timeout is exceeded.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Total timeout after {0:?}")]
pub struct TimeoutError(pub Duration);

/// Run `fut` under an optional total timeout.
pub async fn with_timeout<F: Future>(
    limit: Option<Duration>,
    fut: F,
) -> Result<F::Output, TimeoutError> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| TimeoutError(limit)),
        None => Ok(fut.await),
    }
}
