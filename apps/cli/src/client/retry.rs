//! Bounded retry with linear backoff for backend calls.
//!
//! Retry is an explicit caller decision: the executor never re-issues a
//! request on its own. Only retryable failures (timeout, transport) are
//! re-attempted; deterministic failures surface immediately.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::ClientError;

/// Attempt count applied when the caller does not configure one.
pub const DEFAULT_ATTEMPTS: u32 = 2;

/// Wait between attempts grows linearly: 600ms after the first failure,
/// 1200ms after the second, and so on. No jitter.
const BACKOFF_STEP: Duration = Duration::from_millis(600);

/// Invokes `op` up to `attempts` times, sleeping `600ms × attempt_number`
/// after each retryable failure. Intermediate failures are logged at
/// `warn`; the final one is returned. A non-retryable failure is returned
/// after the first observation, with no wait.
pub async fn with_retry<T, F, Fut>(attempts: u32, mut op: F) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_retryable() && attempt < attempts => {
                let delay = BACKOFF_STEP * attempt;
                warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "call failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
