//! Error types for `tvmaze-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Page number {0} is invalid.")]
  InvalidPage(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
