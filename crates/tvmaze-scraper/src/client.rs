//! Async HTTP client for the upstream TVmaze REST API.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tvmaze_core::show::ShowId;

use crate::catalog::{CastMember, Catalog, CatalogError, ShowListing};

const USER_AGENT: &str = concat!("tvmaze-scraper/", env!("CARGO_PKG_VERSION"));

/// [`Catalog`] over HTTP.
///
/// Clones share the inner [`reqwest::Client`] connection pool.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
  client:   Client,
  base_url: String,
}

impl HttpCatalog {
  pub fn new(
    base_url: impl Into<String>,
    timeout: Duration,
  ) -> Result<Self, CatalogError> {
    let client = Client::builder()
      .timeout(timeout)
      .user_agent(USER_AGENT)
      .build()
      .map_err(CatalogError::Transport)?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url.trim_end_matches('/'), path)
  }

  /// GET `path` and decode a JSON body. A 404 yields `None`.
  async fn get_json<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, String)],
  ) -> Result<Option<T>, CatalogError> {
    let resp = self
      .client
      .get(self.url(path))
      .query(query)
      .send()
      .await
      .map_err(CatalogError::Transport)?;

    match resp.status() {
      StatusCode::NOT_FOUND => Ok(None),
      s if s.is_success() => resp.json().await.map(Some).map_err(|e| {
        // A body cut short by the timeout is a transport failure.
        if e.is_decode() {
          CatalogError::Decode(e)
        } else {
          CatalogError::Transport(e)
        }
      }),
      s => Err(CatalogError::Status(s)),
    }
  }
}

impl Catalog for HttpCatalog {
  /// `GET /shows?page=<n>`
  ///
  /// TVmaze answers 404 past the last page; that is reported as an empty page.
  async fn list_shows(&self, page: u32) -> Result<Vec<ShowListing>, CatalogError> {
    let shows = self
      .get_json::<Vec<ShowListing>>("/shows", &[("page", page.to_string())])
      .await?;
    Ok(shows.unwrap_or_default())
  }

  /// `GET /shows/<id>/cast`
  async fn list_cast(
    &self,
    show_id: ShowId,
  ) -> Result<Option<Vec<CastMember>>, CatalogError> {
    self.get_json(&format!("/shows/{show_id}/cast"), &[]).await
  }
}
