//! Bounded-attempt retry with exponential backoff.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::traits::SinkError;

/// Retry policy for a single write.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent retry
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            base_delay: Duration::from_millis(10),
        }
    }
}

impl RetryPolicy {
    /// Backoff before `attempt` (2-based; the first attempt has no delay).
    /// The exponent is capped so the longest single wait stays bounded.
    fn delay_before(&self, attempt: u32) -> Duration {
        self.base_delay * (1u32 << (attempt - 2).min(7))
    }
}

/// Run `op` until it succeeds, fails fatally, or the attempt budget is
/// spent. Only errors with [`SinkError::is_transient`] are retried.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, SinkError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SinkError>>,
{
    let mut last: Option<SinkError> = None;

    for attempt in 1..=policy.max_attempts.max(1) {
        if attempt > 1 {
            let delay = policy.delay_before(attempt);
            tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying write");
            sleep(delay).await;
        }

        match op().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_transient() => {
                tracing::warn!(attempt, %error, "transient store error");
                last = Some(error);
            }
            Err(error) => return Err(error),
        }
    }

    Err(SinkError::RetriesExhausted {
        attempts: policy.max_attempts.max(1),
        last: last.map(|e| e.to_string()).unwrap_or_default(),
    })
}
