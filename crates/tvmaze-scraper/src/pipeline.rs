//! Per-page ingestion: list shows, fan out cast fetches, merge.

use std::sync::Arc;

use futures::future::try_join_all;
use tokio_util::sync::CancellationToken;
use tvmaze_core::{
  show::{Person, Show},
  store::ShowStore,
};

use crate::{
  catalog::{Catalog, ShowListing},
  rate_limit::RateLimiter,
  retry::{RetryError, RetryPolicy},
  Error, Result,
};

/// What happened to one upstream page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
  /// The page had shows and all of them were merged.
  Merged { shows: usize, cast_members: usize },
  /// The upstream has no data at or beyond this page.
  Exhausted,
}

/// Fetches one upstream page and merges it into the store.
pub struct Pipeline<C, S> {
  catalog: C,
  store:   Arc<S>,
  retry:   RetryPolicy,
  limiter: RateLimiter,
}

impl<C, S> Pipeline<C, S>
where
  C: Catalog,
  S: ShowStore,
{
  pub fn new(
    catalog: C,
    store: Arc<S>,
    retry: RetryPolicy,
    limiter: RateLimiter,
  ) -> Self {
    Self { catalog, store, retry, limiter }
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Ingest upstream page `page`.
  ///
  /// Cast fetches for every show on the page run concurrently. The first one
  /// that fails for good drops the rest, and nothing from the page is merged.
  pub async fn ingest_page(
    &self,
    page: u32,
    cancel: &CancellationToken,
  ) -> Result<PageOutcome> {
    let result = self.fetch_and_merge(page, cancel).await;
    if let Err(e) = &result
      && !matches!(e, Error::Cancelled)
    {
      tracing::error!(page, error = %e, "error ingesting page");
    }
    result
  }

  async fn fetch_and_merge(
    &self,
    page: u32,
    cancel: &CancellationToken,
  ) -> Result<PageOutcome> {
    let listings = self
      .retry
      .run(cancel, || self.catalog.list_shows(page))
      .await
      .map_err(|e| match e {
        RetryError::Cancelled => Error::Cancelled,
        RetryError::Failed { source, .. } => Error::ListShows { page, source },
      })?;

    if listings.is_empty() {
      tracing::info!(page, "no more shows upstream");
      return Ok(PageOutcome::Exhausted);
    }

    let shows =
      try_join_all(listings.into_iter().map(|l| self.with_cast(l, cancel)))
        .await?;

    let outcome = PageOutcome::Merged {
      shows:        shows.len(),
      cast_members: shows.iter().map(|s| s.cast.len()).sum(),
    };

    self
      .store
      .merge(shows)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    Ok(outcome)
  }

  /// Fetch the cast for one listed show. A show the upstream does not know
  /// gets an empty cast.
  async fn with_cast(
    &self,
    listing: ShowListing,
    cancel: &CancellationToken,
  ) -> Result<Show> {
    let show_id = listing.id;
    let fetched = self
      .retry
      .run_limited(&self.limiter, cancel, || self.catalog.list_cast(show_id))
      .await;

    let mut show = Show::new(listing.id, listing.name);
    match fetched {
      Ok(Some(cast)) => {
        show.cast = cast.into_iter().map(|m| Person::from(m.person)).collect();
        Ok(show)
      }
      Ok(None) => {
        tracing::warn!(show_id, "cannot find cast for show");
        Ok(show)
      }
      Err(RetryError::Cancelled) => Err(Error::Cancelled),
      Err(RetryError::Failed { attempts, source }) => {
        tracing::error!(
          show_id,
          name = %show.name,
          attempts,
          error = %source,
          "error fetching cast"
        );
        Err(Error::ListCast { show_id, source })
      }
    }
  }
}
