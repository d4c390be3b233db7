//! Sliding-window admission gate shared by concurrent upstream calls.

use std::{collections::VecDeque, time::Duration};

use tokio::{sync::Mutex, time::Instant};
use tokio_util::sync::CancellationToken;

use crate::error::Cancelled;

/// Admits at most `permits` operations in any window of length `window`.
///
/// The limiter keeps the instants of the last `permits` admissions. A caller
/// is admitted once the oldest of them has left the window. Waiters queue on
/// a fair mutex, so admission is first-come first-served.
#[derive(Debug)]
pub struct RateLimiter {
  permits:  usize,
  window:   Duration,
  admitted: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
  pub fn new(permits: u32, window: Duration) -> Self {
    let permits = permits.max(1) as usize;
    Self {
      permits,
      window,
      admitted: Mutex::new(VecDeque::with_capacity(permits)),
    }
  }

  /// Wait until an operation may start.
  pub async fn acquire(&self, cancel: &CancellationToken) -> Result<(), Cancelled> {
    let mut admitted = tokio::select! {
      biased;
      _ = cancel.cancelled() => return Err(Cancelled),
      guard = self.admitted.lock() => guard,
    };

    loop {
      let now = Instant::now();
      while admitted
        .front()
        .is_some_and(|t| now.duration_since(*t) >= self.window)
      {
        admitted.pop_front();
      }

      if admitted.len() < self.permits {
        admitted.push_back(now);
        return Ok(());
      }

      let Some(oldest) = admitted.front().copied() else {
        continue;
      };
      tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(Cancelled),
        _ = tokio::time::sleep_until(oldest + self.window) => {}
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;

  #[tokio::test(start_paused = true)]
  async fn never_admits_more_than_permits_per_window() {
    let limiter = Arc::new(RateLimiter::new(10, Duration::from_secs(1)));
    let cancel = CancellationToken::new();

    let handles: Vec<_> = (0..35)
      .map(|_| {
        let limiter = limiter.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
          limiter.acquire(&cancel).await.unwrap();
          Instant::now()
        })
      })
      .collect();

    let mut starts = Vec::new();
    for h in handles {
      starts.push(h.await.unwrap());
    }
    starts.sort();

    for pair in starts.windows(11) {
      assert!(pair[10] - pair[0] >= Duration::from_secs(1));
    }
    // 35 admissions at 10/s need three full windows after the first burst.
    assert!(starts[34] - starts[0] >= Duration::from_secs(3));
  }

  #[tokio::test(start_paused = true)]
  async fn first_burst_is_immediate() {
    let limiter = RateLimiter::new(3, Duration::from_secs(1));
    let cancel = CancellationToken::new();

    let before = Instant::now();
    for _ in 0..3 {
      limiter.acquire(&cancel).await.unwrap();
    }
    assert_eq!(Instant::now(), before);
  }

  #[tokio::test(start_paused = true)]
  async fn cancelled_wait_returns_error() {
    let limiter = RateLimiter::new(1, Duration::from_secs(3600));
    let cancel = CancellationToken::new();
    limiter.acquire(&cancel).await.unwrap();

    let trigger = cancel.clone();
    tokio::spawn(async move {
      tokio::time::sleep(Duration::from_millis(10)).await;
      trigger.cancel();
    });

    assert_eq!(limiter.acquire(&cancel).await, Err(Cancelled));
  }
}
