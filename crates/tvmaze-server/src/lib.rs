//! HTTP front end for the stored catalog: configuration and router assembly
//! for the `tvmaze-server` binary.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tvmaze_core::store::ShowStore;

// ─── Configuration ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Must point at the database the scraper writes to.
  pub store_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".into(),
      port:       8080,
      store_path: PathBuf::from("tvmaze.db"),
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `TVMAZE_*` environment
  /// variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("TVMAZE"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// `store_path` with a leading `~` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> PathBuf {
    tvmaze_store_sqlite::expand_tilde(&self.store_path)
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router wrapped in request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: ShowStore + 'static,
{
  tvmaze_api::api_router(store).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use tower::ServiceExt as _;
  use tvmaze_core::show::Show;
  use tvmaze_store_sqlite::SqliteStore;

  use super::*;

  fn from_toml(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn defaults_and_overrides() {
    let cfg = from_toml("");
    assert_eq!(cfg.address(), "127.0.0.1:8080");
    assert_eq!(cfg.store_path, PathBuf::from("tvmaze.db"));

    let cfg = from_toml("port = 9999\nstore_path = \"/var/lib/tvmaze.db\"");
    assert_eq!(cfg.address(), "127.0.0.1:9999");
    assert_eq!(cfg.resolved_store_path(), PathBuf::from("/var/lib/tvmaze.db"));
  }

  #[tokio::test]
  async fn serves_listing_and_404s_elsewhere() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store.merge(vec![Show::new(1, "Pilot")]).await.unwrap();
    let app = app(Arc::new(store));

    let ok = app
      .clone()
      .oneshot(
        Request::builder()
          .uri("/tvshowsmaze?page=1")
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);

    let missing = app
      .oneshot(Request::builder().uri("/shows").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
  }
}
