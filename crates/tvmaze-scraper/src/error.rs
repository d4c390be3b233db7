//! Error types for `tvmaze-scraper`.

use thiserror::Error;
use tvmaze_core::show::ShowId;

use crate::catalog::CatalogError;

/// Returned by any wait that observed a cancellation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation cancelled")]
pub struct Cancelled;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to list shows for page {page}: {source}")]
  ListShows {
    page:   u32,
    #[source]
    source: CatalogError,
  },

  #[error("failed to fetch cast for show {show_id}: {source}")]
  ListCast {
    show_id: ShowId,
    #[source]
    source:  CatalogError,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("ingestion cancelled")]
  Cancelled,
}

impl From<Cancelled> for Error {
  fn from(_: Cancelled) -> Self { Error::Cancelled }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
