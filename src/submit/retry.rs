//! Bounded retry with exponential backoff for transient tracker errors
//!
//! Only errors classified transient (`Error::is_transient`) are retried;
//! validation faults and duplicate skips never reach this layer.

use crate::error::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry policy for transient remote errors.
///
/// Backoff doubles per attempt, capped at `max_backoff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum retry attempts after the initial call
    pub max_retries: u32,
    /// Backoff before the first retry
    pub initial_backoff: Duration,
    /// Backoff ceiling
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Run `operation`, retrying transient failures with backoff.
    ///
    /// Returns the first permanent error immediately, or the last transient
    /// error once retries are exhausted.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut backoff = self.initial_backoff;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(attempt, backoff = ?backoff, error = %e, "transient tracker error, retrying");
                    sleep(backoff).await;
                    backoff = (backoff * 2).min(self.max_backoff);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Run an operation once, or under `policy` when one is set
pub(crate) async fn with_policy<F, Fut, T>(
    policy: Option<RetryPolicy>,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match policy {
        Some(policy) => policy.execute(operation).await,
        None => operation().await,
    }
}
