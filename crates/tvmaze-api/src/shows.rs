//! Handler for `/tvshowsmaze`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/tvshowsmaze` | `?page` required (≥ 1); optional `itensPerPage` (default 25) |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tvmaze_core::{
  page::{DEFAULT_PER_PAGE, ShowPage},
  show::{Person, PersonId, Show, ShowId},
  store::ShowStore,
};

use crate::error::ApiError;

// ─── Wire models ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonResponse {
  pub id:       PersonId,
  pub name:     String,
  /// `YYYY-MM-DD`, or `null` when unknown.
  pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowResponse {
  pub id:   ShowId,
  pub name: String,
  pub cast: Vec<PersonResponse>,
}

impl From<Person> for PersonResponse {
  fn from(p: Person) -> Self {
    Self { id: p.id, name: p.name, birthday: p.birthday }
  }
}

impl From<Show> for ShowResponse {
  fn from(s: Show) -> Self {
    Self {
      id:   s.id,
      name: s.name,
      cast: s.cast.into_iter().map(PersonResponse::from).collect(),
    }
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// 1-based page number. A missing page is treated as page 0 and rejected.
  pub page:           Option<i64>,
  /// Page size; non-positive values fall back to the default.
  #[serde(rename = "itensPerPage")]
  pub itens_per_page: Option<i64>,
}

/// `GET /tvshowsmaze?page=<p>[&itensPerPage=<k>]`
///
/// Shows in ascending id order; each cast newest birthday first, unknown
/// birthdays last.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<ShowResponse>>, ApiError>
where
  S: ShowStore,
{
  let raw_page = params.page.unwrap_or(0);
  let per_page = params.itens_per_page.unwrap_or(i64::from(DEFAULT_PER_PAGE));

  let page = ShowPage::new(raw_page, per_page).map_err(|e| {
    tracing::error!(page = raw_page, "{e}");
    ApiError::from(e)
  })?;

  let shows = store.list_shows(page).await.map_err(|e| {
    tracing::error!(page = raw_page, error = %e, "failed to fetch page");
    ApiError::Store(Box::new(e))
  })?;

  Ok(Json(shows.into_iter().map(ShowResponse::from).collect()))
}
