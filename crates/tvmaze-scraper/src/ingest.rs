//! The resumable page-advance loop.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tvmaze_core::store::ShowStore;

use crate::{
  catalog::Catalog,
  pipeline::{PageOutcome, Pipeline},
  Error, Result,
};

/// What the loop does when a page comes back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustedPolicy {
  /// End the loop with [`LoopExit::Exhausted`].
  Stop,
  /// Wait `interval`, then ask for the same page again.
  Poll { interval: Duration },
}

/// How [`IngestLoop::run`] ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
  /// Cancellation was observed. `next_page` has not been ingested.
  Cancelled { next_page: u32 },
  /// `page` was empty and the policy is [`ExhaustedPolicy::Stop`].
  Exhausted { page: u32 },
}

pub struct IngestLoop<C, S> {
  pipeline:       Pipeline<C, S>,
  shows_per_page: u32,
  on_exhausted:   ExhaustedPolicy,
}

impl<C, S> IngestLoop<C, S>
where
  C: Catalog,
  S: ShowStore,
{
  /// `shows_per_page` is the upstream's fixed page size.
  pub fn new(
    pipeline: Pipeline<C, S>,
    shows_per_page: u32,
    on_exhausted: ExhaustedPolicy,
  ) -> Self {
    Self { pipeline, shows_per_page: shows_per_page.max(1), on_exhausted }
  }

  /// The page holding the highest stored show id, or 0 for an empty store.
  ///
  /// That page may already be partly stored; re-ingesting it is harmless
  /// because merging is idempotent.
  pub async fn starting_page(&self) -> Result<u32> {
    let highest = self
      .pipeline
      .store()
      .highest_show()
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    Ok(match highest {
      Some(show) => {
        let page = show.id.max(0) / i64::from(self.shows_per_page);
        u32::try_from(page).unwrap_or(u32::MAX)
      }
      None => 0,
    })
  }

  /// Ingest pages from the resume point until cancelled.
  ///
  /// Cancellation is checked before each page and interrupts any backoff,
  /// rate-limit or poll wait. Pipeline errors are returned unchanged; the
  /// loop never restarts itself.
  pub async fn run(&self, cancel: &CancellationToken) -> Result<LoopExit> {
    let mut next_page = self.starting_page().await?;
    tracing::info!(next_page, "ingestion started");

    loop {
      if cancel.is_cancelled() {
        tracing::info!(next_page, "ingestion stopped");
        return Ok(LoopExit::Cancelled { next_page });
      }

      tracing::info!(page = next_page, "ingesting page");
      match self.pipeline.ingest_page(next_page, cancel).await {
        Ok(PageOutcome::Merged { shows, cast_members }) => {
          tracing::info!(page = next_page, shows, cast_members, "page merged");
          next_page = next_page.saturating_add(1);
        }
        Ok(PageOutcome::Exhausted) => match self.on_exhausted {
          ExhaustedPolicy::Stop => {
            tracing::info!(page = next_page, "catalog exhausted; stopping");
            return Ok(LoopExit::Exhausted { page: next_page });
          }
          ExhaustedPolicy::Poll { interval } => {
            tracing::info!(
              page = next_page,
              retry_in_secs = interval.as_secs(),
              "catalog exhausted; waiting for new shows"
            );
            tokio::select! {
              biased;
              _ = cancel.cancelled() => {}
              _ = tokio::time::sleep(interval) => {}
            }
          }
        },
        Err(Error::Cancelled) => {
          tracing::info!(next_page, "ingestion cancelled mid-page");
          return Ok(LoopExit::Cancelled { next_page });
        }
        Err(e) => return Err(e),
      }
    }
  }
}
