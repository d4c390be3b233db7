//! The `ShowStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `tvmaze-store-sqlite`).
//! The scraper writes through it and the read API queries through it; neither
//! depends on a concrete backend.

use std::future::Future;

use crate::{
  page::ShowPage,
  show::{Show, ShowId},
};

/// Abstraction over a show catalog backend.
///
/// The scraper is the only writer. Readers may run concurrently with it and
/// must never observe a show whose merge is only partly applied.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ShowStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Create or update each show, in order, one transaction per show.
  ///
  /// For every show: upsert its name, drop its existing cast membership, then
  /// upsert each person of the de-duplicated cast (overwriting name and
  /// birthday) and attach them. Merging the same input twice leaves the store
  /// unchanged.
  ///
  /// The first failure aborts the remaining shows and is returned; shows
  /// earlier in the batch stay committed.
  fn merge(
    &self,
    shows: Vec<Show>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// The stored show with the greatest id, or `None` for an empty store.
  fn highest_show(
    &self,
  ) -> impl Future<Output = Result<Option<Show>, Self::Error>> + Send + '_;

  /// Retrieve a single show with its cast. Returns `None` if not found.
  fn get_show(
    &self,
    id: ShowId,
  ) -> impl Future<Output = Result<Option<Show>, Self::Error>> + Send + '_;

  /// One page of shows in ascending id order. Each cast is ordered by
  /// birthday, newest first, with unknown birthdays last.
  fn list_shows(
    &self,
    page: ShowPage,
  ) -> impl Future<Output = Result<Vec<Show>, Self::Error>> + Send + '_;
}
