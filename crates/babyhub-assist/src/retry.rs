//! Bounded retries for assist service calls.
//!
//! Only transport failures and 5xx responses are retried; a 4xx or an
//! undecodable body would fail the same way again.

use std::future::Future;
use std::time::Duration;

use crate::error::AssistError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
pub(crate) fn is_retriable(err: &AssistError) -> bool {
    match err {
        AssistError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        AssistError::Status { status, .. } => *status >= 500,
        AssistError::Deserialize { .. }
        | AssistError::InvalidBaseUrl(_)
        | AssistError::UnsupportedLanguage(_)
        | AssistError::UnknownTemplate(_) => false,
    }
}

/// Delay schedule between attempts: doubling from `base_ms`, never above
/// `ceiling_ms`, then scaled by a jitter factor in `0.75..1.25`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Backoff {
    base_ms: u64,
    ceiling_ms: u64,
}

impl Backoff {
    /// Upper bound on a single delay.
    const CEILING_MS: u64 = 10_000;

    pub(crate) fn new(base_ms: u64) -> Self {
        Self {
            base_ms,
            ceiling_ms: Self::CEILING_MS,
        }
    }

    /// Delay before retry number `retry` (1-based). `unit` is a uniform
    /// sample in `0.0..1.0`.
    pub(crate) fn delay(self, retry: u32, unit: f64) -> Duration {
        let doublings = retry.saturating_sub(1).min(16);
        let nominal = self
            .base_ms
            .saturating_mul(1u64 << doublings)
            .min(self.ceiling_ms);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let jittered = (nominal as f64 * (0.75 + unit.clamp(0.0, 1.0) * 0.5)) as u64;
        Duration::from_millis(jittered)
    }
}

/// Calls `operation` until it succeeds, fails with a permanent error, or has
/// been retried `max_retries` times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, AssistError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AssistError>>,
{
    let backoff = Backoff::new(backoff_base_ms);
    let mut retries = 0u32;

    let err = loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if retries == max_retries || !is_retriable(&err) {
            break err;
        }
        retries += 1;

        let delay = backoff.delay(retries, rand::random::<f64>());
        tracing::warn!(
            retry = retries,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "assist call failed, backing off"
        );
        tokio::time::sleep(delay).await;
    };

    if retries > 0 {
        tracing::warn!(retries, error = %err, "assist call failed after retries");
    }
    Err(err)
}
