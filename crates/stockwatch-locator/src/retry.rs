//! Retry with exponential back-off and jitter for directory fetches.
//!
//! Only transport failures and server-side statuses are retried. A 4xx or a
//! payload that does not decode will not improve on a second attempt and is
//! returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::LocatorError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - [`LocatorError::Transport`]: connect failure, timeout, reset.
/// - [`LocatorError::Protocol`] with a 5xx or 429 status.
///
/// **Not retriable:** other protocol statuses, [`LocatorError::Decode`],
/// [`LocatorError::InvalidEndpoint`], [`LocatorError::ClientBuild`].
pub(crate) fn is_retriable(err: &LocatorError) -> bool {
    match err {
        LocatorError::Transport { .. } => true,
        LocatorError::Protocol { status, .. } => *status >= 500 || *status == 429,
        LocatorError::Decode { .. }
        | LocatorError::InvalidEndpoint { .. }
        | LocatorError::ClientBuild(_) => false,
    }
}

/// Longest pause between two directory requests.
const MAX_BACKOFF: Duration = Duration::from_secs(300);

/// Pause before retry number `retry` (1-based): the base doubled once per
/// earlier retry, capped at [`MAX_BACKOFF`], then scaled by `jitter`.
///
/// With the default `STOCKWATCH_FETCH_RETRY_BACKOFF_BASE_SECS=5` the two
/// default retries wait roughly 5 s and 10 s, well inside one poll interval.
fn backoff_delay(base_secs: u64, retry: u32, jitter: f64) -> Duration {
    let doublings = retry.saturating_sub(1).min(16);
    let nominal = Duration::from_secs(base_secs.saturating_mul(1 << doublings)).min(MAX_BACKOFF);
    nominal.mul_f64(jitter)
}

/// Calls `operation` until it succeeds, fails with a non-retriable error, or
/// has been retried `max_retries` times. The last error is returned as is.
///
/// Each pause is [`backoff_delay`] scaled by a random factor in `0.75..1.25`.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, LocatorError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LocatorError>>,
{
    let mut retry = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if retry >= max_retries || !is_retriable(&err) => return Err(err),
            Err(err) => err,
        };
        retry += 1;
        let delay = backoff_delay(backoff_base_secs, retry, 0.75 + rand::random::<f64>() * 0.5);
        tracing::warn!(
            retry,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "store directory request failed; retrying"
        );
        tokio::time::sleep(delay).await;
    }
}
