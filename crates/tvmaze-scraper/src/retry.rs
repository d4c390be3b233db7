//! Bounded exponential-backoff retry.

use std::{fmt, future::Future, time::Duration};

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::{error::Cancelled, rate_limit::RateLimiter};

/// Classifies an error as worth another attempt.
pub trait Transient {
  fn is_transient(&self) -> bool;
}

#[derive(Debug, Error)]
pub enum RetryError<E> {
  /// The last attempt failed with a non-transient error, or retries ran out.
  #[error("failed after {attempts} attempt(s): {source}")]
  Failed {
    attempts: u32,
    #[source]
    source:   E,
  },

  #[error("cancelled while retrying")]
  Cancelled,
}

impl<E> From<Cancelled> for RetryError<E> {
  fn from(_: Cancelled) -> Self { RetryError::Cancelled }
}

/// Retry policy: after the `n`th failure (1-based) wait `base_delay * 2^n`.
///
/// With the default 1 s base that is 2 s, 4 s, 8 s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  max_retries: u32,
  base_delay:  Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self { Self::new(3, Duration::from_secs(1)) }
}

impl RetryPolicy {
  pub fn new(max_retries: u32, base_delay: Duration) -> Self {
    Self { max_retries, base_delay }
  }

  pub fn max_retries(&self) -> u32 { self.max_retries }

  /// Delay before retry number `retry` (1-based).
  pub fn backoff(&self, retry: u32) -> Duration {
    self.base_delay.saturating_mul(2u32.saturating_pow(retry))
  }

  /// Run `op` until it succeeds, fails non-transiently, or retries run out.
  pub async fn run<T, E, F, Fut>(
    &self,
    cancel: &CancellationToken,
    op: F,
  ) -> Result<T, RetryError<E>>
  where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Transient + fmt::Display,
  {
    self.run_inner(None, cancel, op).await
  }

  /// Like [`run`](Self::run), but every attempt, retries included, first
  /// waits for admission from `limiter`. Time spent waiting for admission
  /// does not count as an attempt.
  pub async fn run_limited<T, E, F, Fut>(
    &self,
    limiter: &RateLimiter,
    cancel: &CancellationToken,
    op: F,
  ) -> Result<T, RetryError<E>>
  where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Transient + fmt::Display,
  {
    self.run_inner(Some(limiter), cancel, op).await
  }

  async fn run_inner<T, E, F, Fut>(
    &self,
    limiter: Option<&RateLimiter>,
    cancel: &CancellationToken,
    mut op: F,
  ) -> Result<T, RetryError<E>>
  where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Transient + fmt::Display,
  {
    let mut attempts = 0;
    loop {
      if let Some(limiter) = limiter {
        limiter.acquire(cancel).await?;
      }

      attempts += 1;
      let error = match op().await {
        Ok(value) => return Ok(value),
        Err(e) => e,
      };

      let retry = attempts;
      if !error.is_transient() || retry > self.max_retries {
        return Err(RetryError::Failed { attempts, source: error });
      }

      let delay = self.backoff(retry);
      tracing::warn!(
        attempt = attempts,
        delay_ms = delay.as_millis() as u64,
        error = %error,
        "transient failure; retrying"
      );

      tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(RetryError::Cancelled),
        _ = tokio::time::sleep(delay) => {}
      }
    }
  }
}
