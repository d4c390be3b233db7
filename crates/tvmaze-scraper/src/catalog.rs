//! The upstream catalog boundary: the `Catalog` trait and its wire types.
//!
//! Implementations perform a single request per call. Retrying and rate
//! limiting are the caller's job (see [`crate::retry`] and
//! [`crate::rate_limit`]).

use std::future::Future;

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tvmaze_core::show::{Person, PersonId, ShowId};

use crate::retry::Transient;

// ─── Wire types ──────────────────────────────────────────────────────────────

/// One entry of `GET /shows?page=n`. The cast is not included.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShowListing {
  pub id:   ShowId,
  pub name: String,
}

/// A person as embedded in a cast entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersonListing {
  pub id:       PersonId,
  pub name:     String,
  #[serde(default)]
  pub birthday: Option<NaiveDate>,
}

/// One entry of `GET /shows/{id}/cast`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CastMember {
  pub person: PersonListing,
}

impl From<PersonListing> for Person {
  fn from(p: PersonListing) -> Self {
    Person { id: p.id, name: p.name, birthday: p.birthday }
  }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CatalogError {
  /// The request never produced a response (connect failure, timeout, ...).
  #[error("request failed: {0}")]
  Transport(#[source] reqwest::Error),

  #[error("upstream returned {0}")]
  Status(StatusCode),

  #[error("invalid response body: {0}")]
  Decode(#[source] reqwest::Error),
}

impl Transient for CatalogError {
  fn is_transient(&self) -> bool {
    match self {
      CatalogError::Transport(_) => true,
      CatalogError::Status(s) => {
        s.is_server_error() || *s == StatusCode::TOO_MANY_REQUESTS
      }
      CatalogError::Decode(_) => false,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Read access to the upstream show catalog.
pub trait Catalog: Send + Sync {
  /// The shows on a 0-based upstream page. An empty list means there is no
  /// data at or beyond `page`.
  fn list_shows(
    &self,
    page: u32,
  ) -> impl Future<Output = Result<Vec<ShowListing>, CatalogError>> + Send + '_;

  /// The cast of a show, or `None` when the upstream does not know the show.
  fn list_cast(
    &self,
    show_id: ShowId,
  ) -> impl Future<Output = Result<Option<Vec<CastMember>>, CatalogError>>
  + Send
  + '_;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn server_errors_and_throttling_are_transient() {
    assert!(CatalogError::Status(StatusCode::BAD_GATEWAY).is_transient());
    assert!(CatalogError::Status(StatusCode::TOO_MANY_REQUESTS).is_transient());
    assert!(!CatalogError::Status(StatusCode::BAD_REQUEST).is_transient());
    assert!(!CatalogError::Status(StatusCode::FORBIDDEN).is_transient());
  }

  #[test]
  fn cast_entry_ignores_extra_fields() {
    let body = r#"[{
      "person": {
        "id": 1, "name": "Mike Vogel", "birthday": "1979-07-17",
        "country": {"name": "United States"}, "gender": "Male"
      },
      "character": {"id": 1, "name": "Dale \"Barbie\" Barbara"},
      "self": false, "voice": false
    }, {
      "person": {"id": 2, "name": "Nobody", "birthday": null}
    }]"#;

    let cast: Vec<CastMember> = serde_json::from_str(body).unwrap();
    assert_eq!(cast[0].person.birthday, NaiveDate::from_ymd_opt(1979, 7, 17));
    assert_eq!(cast[1].person.birthday, None);
  }
}
