//! tvmaze-server binary.
//!
//! Reads `server.toml` (or the path given with `--config`) plus `TVMAZE_*`
//! environment variables, opens the SQLite store populated by
//! `tvmaze-scraper`, and serves the paged listing over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tvmaze_server::ServerConfig;
use tvmaze_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Serve the ingested TVmaze catalog")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "server.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = ServerConfig::load(&cli.config)
    .context("failed to load server configuration")?;

  let store_path = cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let app = tvmaze_server::app(Arc::new(store));
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown requested");
      }
    })
    .await
    .context("server error")?;

  Ok(())
}
